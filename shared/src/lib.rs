//! Framework-agnostic core of the data grid.
//!
//! The grid keeps paging, sort and filter state for a tabular view and
//! fetches page data on demand from a caller-supplied [`PageLoader`]. The
//! renderer (see the `datagrid-frontend` crate) only reads the state and
//! calls the handlers exposed here.
//!
//! ## Core Components
//!
//! - **GridController**: state owner and reload decision, no I/O
//! - **GridHandle**: shared single-threaded owner that also runs loads
//! - **GridOptions**: initial values, policies and persistence settings
//! - **SnapshotStore**: key-value seam for persisting grid state
//! - **source**: URL builders for HTTP backends and an in-memory loader

pub mod controller;
pub mod error;
pub mod filter;
pub mod handle;
pub mod loader;
pub mod options;
pub mod page;
pub mod persist;
pub mod sort;
pub mod source;
pub mod state;
pub mod view;

pub use controller::{GridController, LoadOutcome, LoadTicket};
pub use error::{ConfigError, LoadError, PersistError};
pub use filter::Filter;
pub use handle::{GridHandle, ListenerId, PendingLoad};
pub use loader::PageLoader;
pub use options::{
    GridOptions, PersistOptions, ResponseOrdering, RowsPerPagePolicy, StoreKind,
    DEFAULT_ROWS_PER_PAGE, DEFAULT_ROWS_PER_PAGE_OPTIONS,
};
pub use page::{PageRequest, PageResult};
pub use persist::{MemoryStore, SnapshotStore};
pub use sort::SortDirection;
pub use state::{GridSnapshot, GridState};
pub use view::{cell_text, value_text, PagingLabels, PagingView};
