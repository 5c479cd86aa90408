//! Page accumulation for one logical collection.

use super::types::{CollectionState, Cursor, Page};

/// Holds every item merged so far plus the latest cursors.
///
/// The merge strategy is chosen by the caller; the store never inspects page
/// contents to decide. Items are kept in arrival order and are never
/// deduplicated, removed, or reordered.
#[derive(Debug, Clone)]
pub struct PageStore<T> {
    state: CollectionState<T>,
}

impl<T> PageStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            state: CollectionState::default(),
        }
    }

    /// Discard everything accumulated and take the incoming page wholesale
    pub fn replace(&mut self, incoming: Page<T>) -> &CollectionState<T> {
        self.state = CollectionState {
            items: incoming.items,
            links: incoming.links,
            meta: incoming.meta,
        };
        &self.state
    }

    /// Concatenate the incoming items after the existing ones.
    ///
    /// Links and metadata are taken from the incoming page; earlier cursors
    /// are not retained.
    pub fn append(&mut self, incoming: Page<T>) -> &CollectionState<T> {
        self.state.items.extend(incoming.items);
        self.state.links = incoming.links;
        self.state.meta = incoming.meta;
        &self.state
    }

    pub fn state(&self) -> &CollectionState<T> {
        &self.state
    }

    pub fn into_state(self) -> CollectionState<T> {
        self.state
    }

    pub fn len(&self) -> usize {
        self.state.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.items.is_empty()
    }

    pub fn next_cursor(&self) -> Option<Cursor> {
        self.state.links.next
    }
}

impl<T> Default for PageStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
