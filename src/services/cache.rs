//! Last successfully fetched result set.

use crate::domain::employee::Employee;
use crate::pagination::Page;

/// Shape of the displayed result set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Listing {
    /// One page from the search endpoint.
    Paged(Page<Employee>),
    /// Full, unpaginated match set of the hire-date endpoint.
    Unpaged(Vec<Employee>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultCache {
    listing: Listing,
    /// Request generation that produced `listing`; 0 before the first fetch.
    generation: u64,
    error: Option<String>,
}

impl ResultCache {
    pub fn new(page_size: u32) -> Self {
        Self {
            listing: Listing::Paged(Page::empty(page_size)),
            generation: 0,
            error: None,
        }
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn employees(&self) -> &[Employee] {
        match &self.listing {
            Listing::Paged(page) => &page.content,
            Listing::Unpaged(employees) => employees,
        }
    }

    /// Page metadata, absent in date-range mode.
    pub fn page(&self) -> Option<&Page<Employee>> {
        match &self.listing {
            Listing::Paged(page) => Some(page),
            Listing::Unpaged(_) => None,
        }
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.page().map(|page| page.total_pages)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// User-facing message of the last failed request, cleared by the next
    /// successful one.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub(crate) fn replace(&mut self, listing: Listing, generation: u64) {
        self.listing = listing;
        self.generation = generation;
        self.error = None;
    }

    pub(crate) fn record_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }
}
