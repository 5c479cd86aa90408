//! Data types shared by the page store and the fetch controller

use serde::{Deserialize, Serialize};

/// Navigation cursor as delivered by the server.
///
/// Both fields are optional on the wire. A field that is absent or zero is
/// treated as missing when a request is derived from the cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

impl Cursor {
    pub fn new(limit: u32, page: u32) -> Self {
        Self {
            limit: Some(limit),
            page: Some(page),
        }
    }

    /// Resolve this cursor into a concrete request, filling missing fields
    /// from the supplied defaults.
    pub fn resolve(&self, fallback_limit: u32, fallback_page: u32) -> PageRequest {
        PageRequest {
            limit: self.limit.filter(|v| *v > 0).unwrap_or(fallback_limit),
            page: self.page.filter(|v| *v > 0).unwrap_or(fallback_page),
        }
    }
}

/// The four navigation cursors attached to a page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSet {
    #[serde(default)]
    pub first: Option<Cursor>,
    #[serde(default)]
    pub prev: Option<Cursor>,
    #[serde(default)]
    pub next: Option<Cursor>,
    #[serde(default)]
    pub last: Option<Cursor>,
}

impl LinkSet {
    /// Whether the server advertised a following page
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// Aggregate metadata reported alongside a page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(default)]
    pub total_count: Option<u64>,
}

/// One fetch result: items plus navigation cursors
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub links: LinkSet,
    pub meta: Option<PageMeta>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, links: LinkSet) -> Self {
        Self {
            items,
            links,
            meta: None,
        }
    }

    pub fn with_meta(mut self, meta: PageMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// A page without a `next` cursor is the last one
    pub fn is_last(&self) -> bool {
        !self.links.has_next()
    }
}

/// Concrete `(limit, page)` pair sent to a page source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: u32,
    pub page: u32,
}

impl PageRequest {
    pub fn new(limit: u32, page: u32) -> Self {
        Self { limit, page }
    }
}

/// Accumulated view of every merged page
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionState<T> {
    pub items: Vec<T>,
    pub links: LinkSet,
    pub meta: Option<PageMeta>,
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            links: LinkSet::default(),
            meta: None,
        }
    }
}

/// What the controller is currently doing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Refreshing,
}

impl FetchStatus {
    pub fn is_busy(&self) -> bool {
        !matches!(self, FetchStatus::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_resolve_prefers_server_values() {
        let cursor = Cursor::new(25, 4);
        assert_eq!(cursor.resolve(10, 2), PageRequest::new(25, 4));
    }

    #[test]
    fn test_cursor_resolve_treats_zero_as_missing() {
        let cursor = Cursor {
            limit: Some(0),
            page: None,
        };
        assert_eq!(cursor.resolve(10, 2), PageRequest::new(10, 2));
    }

    #[test]
    fn test_link_set_deserializes_null_next() {
        let links: LinkSet = serde_json::from_str(
            r#"{"first":{"page":1,"limit":10},"prev":null,"next":null,"last":{"page":10,"limit":10}}"#,
        )
        .unwrap();
        assert!(!links.has_next());
        assert_eq!(links.last, Some(Cursor::new(10, 10)));
    }

    #[test]
    fn test_status_busy() {
        assert!(!FetchStatus::Idle.is_busy());
        assert!(FetchStatus::Loading.is_busy());
        assert!(FetchStatus::Refreshing.is_busy());
    }
}
