//! Snapshot of the employee listing handed to the view.

use crate::domain::employee::Employee;
use crate::domain::query::SearchQuery;
use crate::services::cache::ResultCache;

/// Pagination strip for a paged listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageSummary {
    /// Zero-based.
    pub page_number: u32,
    pub total_pages: u32,
    pub total_elements: u64,
    /// One-based page numbers; `None` marks a gap.
    pub links: Vec<Option<u32>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryView {
    pub query: SearchQuery,
    pub employees: Vec<Employee>,
    /// Absent while the hire-date filter shows its full match set.
    pub pagination: Option<PageSummary>,
    pub error: Option<String>,
}

impl DirectoryView {
    pub fn new(query: SearchQuery, results: &ResultCache) -> Self {
        let pagination = results.page().map(|page| PageSummary {
            page_number: page.page_number,
            total_pages: page.total_pages,
            total_elements: page.total_elements,
            links: page.links(),
        });
        Self {
            query,
            employees: results.employees().to_vec(),
            pagination,
            error: results.error().map(str::to_string),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}
