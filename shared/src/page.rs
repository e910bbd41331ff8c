use serde::{Deserialize, Serialize};

use crate::filter::Filter;
use crate::sort::SortDirection;

/// Parameters passed to a [`PageLoader`](crate::PageLoader).
///
/// `page` is 1-based even though the grid stores it 0-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page: usize,
    pub rows_per_page: usize,
    pub order_by: Option<String>,
    pub sort_direction: Option<SortDirection>,
    pub filter: Filter,
}

impl PageRequest {
    pub fn is_desc(&self) -> bool {
        SortDirection::is_desc(self.sort_direction)
    }

    /// Zero-based index of the first row on this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.rows_per_page)
    }
}

/// One page of rows together with the total row count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<R> {
    pub total: usize,
    pub data: Vec<R>,
}

impl<R> PageResult<R> {
    pub fn new(total: usize, data: Vec<R>) -> Self {
        Self { total, data }
    }
}
