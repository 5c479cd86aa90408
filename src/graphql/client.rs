use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::{
    errors::{GraphqlError, GraphqlResult},
    types::{
        album_variables, albums_variables, decode_response, Album, AlbumData, AlbumsData,
        ALBUMS_QUERY, ALBUM_QUERY,
    },
};
use crate::config::Config;
use crate::pagination::{FetchResult, Page, PageRequest, PageSource};

/// HTTP client for the albums GraphQL endpoint
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    client: Client,
    endpoint: String,
}

impl GraphqlClient {
    /// Create a client for `endpoint` with a per-request timeout
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> GraphqlResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("album-feed/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &Config) -> GraphqlResult<Self> {
        Self::new(config.endpoint.clone(), config.timeout())
    }

    /// Fetch one page of albums
    pub async fn fetch_albums(&self, request: PageRequest) -> GraphqlResult<Page<Album>> {
        let data: AlbumsData = self.execute(ALBUMS_QUERY, albums_variables(request)).await?;
        Ok(data.into())
    }

    /// Fetch a single album by id. `None` when the server has no such album.
    pub async fn fetch_album(&self, id: &str) -> GraphqlResult<Option<Album>> {
        let data: AlbumData = self.execute(ALBUM_QUERY, album_variables(id)).await?;
        Ok(data.into_album())
    }

    async fn execute<D: DeserializeOwned>(&self, query: &str, variables: Value) -> GraphqlResult<D> {
        debug!("POST {} variables={}", self.endpoint, variables);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("GraphQL endpoint returned {}", status);
            return Err(GraphqlError::StatusError {
                status: status.as_u16(),
                body,
            });
        }

        decode_response(&body)
    }
}

#[async_trait]
impl PageSource<Album> for GraphqlClient {
    async fn fetch_page(&self, request: PageRequest) -> FetchResult<Page<Album>> {
        Ok(self.fetch_albums(request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned HTTP response and hand back the request body
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/api", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buffer = Vec::new();
            let mut chunk = [0u8; 4096];

            let request_body = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                buffer.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&buffer).to_string();
                if let Some(split) = text.find("\r\n\r\n") {
                    let content_length = text[..split]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if buffer.len() >= split + 4 + content_length {
                        break text[split + 4..].to_string();
                    }
                }
                if n == 0 {
                    break String::new();
                }
            };

            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            request_body
        });

        (endpoint, handle)
    }

    fn local_client(endpoint: String) -> GraphqlClient {
        let client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        GraphqlClient::with_client(client, endpoint)
    }

    #[tokio::test]
    async fn test_fetch_page_posts_pagination_variables() {
        let (endpoint, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"data":{"albums":{"data":[{"id":"11","title":"eleven","photos":{"data":[]}}],"links":{"next":null},"meta":{"totalCount":11}}}}"#,
        )
        .await;
        let client = local_client(endpoint);

        let page = client.fetch_page(PageRequest::new(10, 2)).await.unwrap();

        assert_eq!(page.items[0].id, "11");
        assert!(page.is_last());

        let sent: Value = serde_json::from_str(&server.await.unwrap()).unwrap();
        assert_eq!(sent["variables"]["options"]["paginate"]["limit"], 10);
        assert_eq!(sent["variables"]["options"]["paginate"]["page"], 2);
        assert!(sent["query"].as_str().unwrap().contains("query Albums"));
    }

    #[tokio::test]
    async fn test_fetch_album_by_id() {
        let (endpoint, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"data":{"album":{"id":"3","title":"omnis laborum","photos":{"data":[{"id":"101","title":"p","url":"https://x/600","thumbnailUrl":"https://x/150"}]}}}}"#,
        )
        .await;
        let client = local_client(endpoint);

        let album = client.fetch_album("3").await.unwrap().unwrap();

        assert_eq!(album.title, "omnis laborum");
        assert_eq!(album.cover_thumbnail(), Some("https://x/150"));
        let sent: Value = serde_json::from_str(&server.await.unwrap()).unwrap();
        assert_eq!(sent["variables"]["id"], "3");
    }

    #[tokio::test]
    async fn test_server_error_becomes_fetch_failed() {
        let (endpoint, _server) =
            serve_once("HTTP/1.1 503 Service Unavailable", r#"{"error":"down"}"#).await;
        let client = local_client(endpoint);

        let err = client.fetch_page(PageRequest::new(10, 1)).await.unwrap_err();

        assert!(err.to_string().contains("503"));
    }
}
