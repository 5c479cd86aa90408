//! Error types for the GraphQL client

use thiserror::Error;

use crate::pagination::FetchError;

#[derive(Error, Debug)]
pub enum GraphqlError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unexpected status {status}: {body}")]
    StatusError { status: u16, body: String },

    #[error("GraphQL error: {0}")]
    ApiError(String),

    #[error("Response carried no data")]
    MissingData,
}

pub type GraphqlResult<T> = Result<T, GraphqlError>;

impl From<GraphqlError> for FetchError {
    fn from(error: GraphqlError) -> Self {
        FetchError::failed(error)
    }
}
