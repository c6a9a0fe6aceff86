use crate::models::PageInfo;

/// Outcome of inspecting a page's pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Fetch again with the carried cursor.
    Continue,
    Done,
}

/// Pagination bookkeeping across one run.
///
/// The first page is special twice over: it is the only page whose
/// `totalCount` is recorded and the only page preceded by the CSV header.
#[derive(Debug, Clone)]
pub struct PaginationState {
    cursor: Option<String>,
    first_page: bool,
    total_count: Option<u64>,
    pages_fetched: usize,
}

impl PaginationState {
    pub fn new() -> Self {
        Self {
            cursor: None,
            first_page: true,
            total_count: None,
            pages_fetched: 0,
        }
    }

    /// Cursor for the next fetch; `None` before the first page.
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    pub fn is_first_page(&self) -> bool {
        self.first_page
    }

    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Record a successfully fetched page's total. Only the first page counts.
    pub fn record_page(&mut self, total_count: u64) {
        self.pages_fetched += 1;
        if self.first_page && self.total_count.is_none() {
            self.total_count = Some(total_count);
        }
    }

    /// Decide whether to fetch again. Continuing carries `endCursor` forward
    /// and clears the first-page flag.
    pub fn advance(&mut self, page_info: &PageInfo) -> Transition {
        if page_info.has_next_page {
            self.cursor = page_info.end_cursor.clone();
            self.first_page = false;
            Transition::Continue
        } else {
            Transition::Done
        }
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new()
    }
}
