//! Incremental pagination core
//!
//! A [`PageStore`] accumulates pages for one collection under an explicit
//! replace/append policy, and a [`FetchController`] decides which page to
//! request next from a [`PageSource`], tracking whether more pages exist.

pub mod types;
pub mod store;
pub mod source;
pub mod controller;

pub use types::*;
pub use store::*;
pub use source::*;
pub use controller::*;
