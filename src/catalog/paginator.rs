use crate::models::{Property, PropertyId};
use tracing::debug;

/// Fixed-size sliding window over the property catalog.
///
/// Pages are numbered from 1. The collection is replaced wholesale on every
/// load and never edited in place.
#[derive(Debug, Clone)]
pub struct Paginator {
    properties: Vec<Property>,
    page_size: usize,
    current_page: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            properties: Vec::new(),
            page_size: page_size.max(1),
            current_page: 1,
        }
    }

    /// Replace the collection.
    ///
    /// A page index past the end of the new collection is pulled back to its
    /// last page. An empty collection leaves the index where it was.
    pub fn load(&mut self, properties: Vec<Property>) {
        self.properties = properties;

        if !self.properties.is_empty() && self.current_page > self.page_count() {
            debug!(
                from = self.current_page,
                to = self.page_count(),
                "Clamping page index after reload"
            );
            self.current_page = self.page_count();
        }
    }

    /// Properties on the current page
    pub fn current_window(&self) -> &[Property] {
        let len = self.properties.len();
        let end = (self.current_page * self.page_size).min(len);
        let start = ((self.current_page - 1) * self.page_size).min(end);
        &self.properties[start..end]
    }

    /// Advance one page if the current page does not already reach the end
    pub fn next(&mut self) -> bool {
        if self.current_page * self.page_size < self.properties.len() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page unless already on the first
    pub fn prev(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages, never less than one
    pub fn page_count(&self) -> usize {
        self.properties.len().div_ceil(self.page_size).max(1)
    }

    /// 1-based ordinal of the first property on the current page
    pub fn window_start(&self) -> usize {
        (self.current_page - 1) * self.page_size + 1
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Look a property up among those on the current page
    pub fn find_on_page(&self, id: PropertyId) -> Option<&Property> {
        self.current_window().iter().find(|p| p.id == id)
    }
}
