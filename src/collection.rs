//! # Resource Collections
//!
//! [`ResourceArray`] holds one page of hydrated resources together with the
//! pagination metadata and navigation links the server sent alongside it.

/// Key under which HAL collection representations embed their items.
pub const EMBEDDED_KEY: &str = "_embedded";

/// Default page size assumed when the server sends no `page` object.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// One page of a collection-valued relation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceArray<T> {
    /// Items in server order.
    pub result: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub page_number: u64,
    pub page_size: u64,
    pub self_uri: Option<String>,
    pub next_uri: Option<String>,
    pub prev_uri: Option<String>,
    pub first_uri: Option<String>,
    pub last_uri: Option<String>,
}

impl<T> Default for ResourceArray<T> {
    fn default() -> Self {
        Self {
            result: Vec::new(),
            total_elements: 0,
            total_pages: 1,
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
            self_uri: None,
            next_uri: None,
            prev_uri: None,
            first_uri: None,
            last_uri: None,
        }
    }
}

impl<T> ResourceArray<T> {
    /// An empty page, used as the hydration seed.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T) {
        self.result.push(item);
    }

    pub fn len(&self) -> usize {
        self.result.len()
    }

    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.result.iter()
    }

    pub fn has_next(&self) -> bool {
        self.next_uri.is_some()
    }

    pub fn has_prev(&self) -> bool {
        self.prev_uri.is_some()
    }

    /// Drops the page metadata.
    pub fn into_result(self) -> Vec<T> {
        self.result
    }
}

impl<T> IntoIterator for ResourceArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.result.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ResourceArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.result.iter()
    }
}
