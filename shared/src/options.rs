//! Grid configuration.
//!
//! [`GridOptions`] is plain data: it can be built in code with the `with_*`
//! methods or deserialized from JSON, where every field is optional.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::filter::Filter;
use crate::sort::SortDirection;

pub const DEFAULT_ROWS_PER_PAGE: usize = 10;
pub const DEFAULT_ROWS_PER_PAGE_OPTIONS: [usize; 3] = [5, 10, 25];

/// What happens to the current page when the page size changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowsPerPagePolicy {
    #[default]
    KeepPage,
    ResetToFirstPage,
}

/// How completions of overlapping loads are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseOrdering {
    /// Completions older than the latest settled load are discarded.
    #[default]
    Sequenced,
    /// Every completion is applied in arrival order.
    LastWriteWins,
}

/// Backing store for persisted snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StoreKind {
    #[serde(alias = "localStorage")]
    Local,
    #[serde(alias = "sessionStorage")]
    Session,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistOptions {
    pub store: StoreKind,
    pub unique_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    pub initial_rows_per_page: Option<usize>,
    pub initial_order_by: Option<String>,
    pub initial_sort: Option<SortDirection>,
    pub initial_filter: Filter,
    /// When false the load due at mount is skipped; the next change loads.
    pub initial_load: bool,
    pub rows_per_page_options: Vec<usize>,
    pub rows_per_page_policy: RowsPerPagePolicy,
    pub response_ordering: ResponseOrdering,
    pub persist: Option<PersistOptions>,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            initial_rows_per_page: None,
            initial_order_by: None,
            initial_sort: None,
            initial_filter: Filter::default(),
            initial_load: true,
            rows_per_page_options: DEFAULT_ROWS_PER_PAGE_OPTIONS.to_vec(),
            rows_per_page_policy: RowsPerPagePolicy::default(),
            response_ordering: ResponseOrdering::default(),
            persist: None,
        }
    }
}

impl GridOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows_per_page(mut self, rows: usize) -> Self {
        self.initial_rows_per_page = Some(rows);
        self
    }

    pub fn with_order_by(mut self, column: impl Into<String>) -> Self {
        self.initial_order_by = Some(column.into());
        self
    }

    pub fn with_sort(mut self, direction: SortDirection) -> Self {
        self.initial_sort = Some(direction);
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.initial_filter = filter;
        self
    }

    pub fn with_initial_load(mut self, initial_load: bool) -> Self {
        self.initial_load = initial_load;
        self
    }

    pub fn with_rows_per_page_options(mut self, options: Vec<usize>) -> Self {
        self.rows_per_page_options = options;
        self
    }

    pub fn with_rows_per_page_policy(mut self, policy: RowsPerPagePolicy) -> Self {
        self.rows_per_page_policy = policy;
        self
    }

    pub fn with_response_ordering(mut self, ordering: ResponseOrdering) -> Self {
        self.response_ordering = ordering;
        self
    }

    pub fn with_persist(mut self, store: StoreKind, unique_id: impl Into<String>) -> Self {
        self.persist = Some(PersistOptions {
            store,
            unique_id: unique_id.into(),
        });
        self
    }

    /// Page size used when nothing was restored.
    pub fn rows_per_page(&self) -> usize {
        self.initial_rows_per_page
            .filter(|rows| *rows > 0)
            .unwrap_or(DEFAULT_ROWS_PER_PAGE)
    }

    /// Key under which snapshots are stored, if persistence is enabled.
    pub fn persist_key(&self) -> Option<&str> {
        self.persist
            .as_ref()
            .map(|persist| persist.unique_id.as_str())
            .filter(|id| !id.is_empty())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_rows_per_page == Some(0) || self.rows_per_page_options.contains(&0) {
            return Err(ConfigError::ZeroRowsPerPage);
        }
        if self.rows_per_page_options.is_empty() {
            return Err(ConfigError::EmptyRowsPerPageOptions);
        }
        if matches!(&self.persist, Some(persist) if persist.unique_id.trim().is_empty()) {
            return Err(ConfigError::EmptyPersistId);
        }
        Ok(())
    }
}
