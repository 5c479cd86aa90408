//! GraphQL data source for the albums collection
//!
//! Posts the `Albums` and `Album` queries to the configured endpoint and
//! decodes the results into pagination pages.

pub mod client;
pub mod errors;
pub mod types;

pub use client::*;
pub use errors::*;
pub use types::*;
