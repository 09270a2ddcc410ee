use serde::{Deserialize, Serialize};

/// Builds the page-link strip shown under a listing.
///
/// Pages are 1-based here; `None` marks a gap rendered as an ellipsis.
fn page_links(
    total_pages: u32,
    current_page: u32,
    left_edge: u32,
    left_current: u32,
    right_current: u32,
    right_edge: u32,
) -> Vec<Option<u32>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// One page of results as returned by the search endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Zero-based index of this page.
    pub page_number: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, page_number: u32, page_size: u32, total_elements: u64) -> Self {
        let total_pages = if page_size > 0 {
            total_elements.div_ceil(u64::from(page_size)) as u32
        } else {
            0
        };

        Self {
            content,
            page_number,
            page_size,
            total_elements,
            total_pages,
        }
    }

    /// Page with no results.
    pub fn empty(page_size: u32) -> Self {
        Self::new(Vec::new(), 0, page_size, 0)
    }

    /// Whether the page number lies inside the reported page count.
    pub fn is_consistent(&self) -> bool {
        self.total_elements == 0 || self.page_number < self.total_pages
    }

    /// 1-based links around the current page, with gaps as `None`.
    pub fn links(&self) -> Vec<Option<u32>> {
        page_links(self.total_pages, self.page_number + 1, 2, 2, 4, 2)
    }
}
