//! Grid state controller.
//!
//! [`GridController`] is the single owner of a [`GridState`]. Every handler
//! mutates the state and then re-evaluates whether the change warrants a new
//! fetch. When it does, the handler returns a [`LoadTicket`] describing the
//! request; whoever drives the loader reports the result back through
//! [`GridController::complete`]. The controller never performs I/O itself,
//! which keeps the reload decision and the ordering of overlapping responses
//! deterministic and testable.
//!
//! ## Reload decision
//!
//! A [`ReloadKey`] captures the inputs that change what the loader would
//! return: page, page size, sort column, whether the sort is descending,
//! the filter (compared by content) and the reload token. A load is issued
//! only when the key differs from the last evaluated one. Nothing is
//! evaluated before [`GridController::mount`]: changes made earlier only
//! shape the state the first evaluation sees. If the grid was configured
//! with `initial_load = false`, that first evaluation opens the gate instead
//! of loading.
//!
//! ## Overlapping loads
//!
//! Each ticket carries a sequence number. With
//! [`ResponseOrdering::Sequenced`] a completion older than the latest settled
//! one is dropped, and `loading` stays set until the newest ticket settles.
//! A failure of a ticket that a newer one has already replaced is dropped
//! too, so `error` is only ever raised by the newest load.

use std::rc::Rc;
use tracing::{debug, warn};

use crate::error::LoadError;
use crate::filter::Filter;
use crate::options::{GridOptions, ResponseOrdering, RowsPerPagePolicy};
use crate::page::{PageRequest, PageResult};
use crate::persist::{restore_snapshot, write_snapshot, SnapshotStore};
use crate::sort::SortDirection;
use crate::state::GridState;
use crate::view::PagingView;

/// A load the controller wants performed.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadTicket {
    pub seq: u64,
    pub request: PageRequest,
}

/// What [`GridController::complete`] did with a loader result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Failed,
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ReloadKey {
    page: usize,
    rows_per_page: usize,
    order_by: Option<String>,
    descending: bool,
    filter: String,
    reload_token: u64,
}

impl ReloadKey {
    fn of<R>(state: &GridState<R>) -> Self {
        Self {
            page: state.page,
            rows_per_page: state.rows_per_page,
            order_by: state.order_by.clone(),
            descending: state.is_desc(),
            filter: state.filter.canonical(),
            reload_token: state.reload_token,
        }
    }
}

pub struct GridController<R> {
    state: GridState<R>,
    options: GridOptions,
    store: Option<Rc<dyn SnapshotStore>>,
    last_key: Option<ReloadKey>,
    mounted: bool,
    latest_issued: u64,
    latest_settled: u64,
}

impl<R> GridController<R> {
    pub fn new(options: GridOptions) -> Self {
        let state = GridState::initial(&options, None);
        Self {
            state,
            options,
            store: None,
            last_key: None,
            mounted: false,
            latest_issued: 0,
            latest_settled: 0,
        }
    }

    /// Create a controller that restores from and writes back to `store`.
    ///
    /// Persistence is only active when the options carry a non-empty
    /// unique id.
    pub fn with_store(options: GridOptions, store: Rc<dyn SnapshotStore>) -> Self {
        let restored = options
            .persist_key()
            .and_then(|key| restore_snapshot(store.as_ref(), key));
        let state = GridState::initial(&options, restored);
        Self {
            state,
            options,
            store: Some(store),
            last_key: None,
            mounted: false,
            latest_issued: 0,
            latest_settled: 0,
        }
    }

    pub fn state(&self) -> &GridState<R> {
        &self.state
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn paging(&self) -> PagingView {
        self.state.paging(&self.options.rows_per_page_options)
    }

    /// The request a load issued now would carry.
    pub fn request(&self) -> PageRequest {
        PageRequest {
            page: self.state.page.saturating_add(1),
            rows_per_page: self.state.rows_per_page,
            order_by: self.state.order_by.clone(),
            sort_direction: self.state.sort_direction,
            filter: self.state.filter.clone(),
        }
    }

    /// First evaluation of the reload condition, run when the grid is shown.
    pub fn mount(&mut self) -> Option<LoadTicket> {
        self.mounted = true;
        self.changed()
    }

    pub fn set_page(&mut self, page: usize) -> Option<LoadTicket> {
        self.state.page = page;
        self.changed()
    }

    pub fn set_rows_per_page(&mut self, rows: usize) -> Option<LoadTicket> {
        if rows == 0 {
            warn!("Ignoring rows per page of 0");
            return None;
        }
        if self.options.rows_per_page_policy == RowsPerPagePolicy::ResetToFirstPage
            && rows != self.state.rows_per_page
        {
            self.state.page = 0;
        }
        self.state.rows_per_page = rows;
        self.changed()
    }

    /// Set sort column and direction as one change.
    pub fn set_order_by(
        &mut self,
        column: impl Into<String>,
        direction: Option<SortDirection>,
    ) -> Option<LoadTicket> {
        self.state.order_by = Some(column.into());
        self.state.sort_direction = direction;
        self.changed()
    }

    /// Same column flips the direction; another column starts over at the
    /// initial direction.
    pub fn toggle_sort(&mut self, column: &str) -> Option<LoadTicket> {
        let direction = match self.state.order_by.as_deref() {
            Some(current) if current == column => {
                self.state.sort_direction.unwrap_or_default().toggled()
            }
            _ => self.options.initial_sort.unwrap_or_default(),
        };
        self.set_order_by(column, Some(direction))
    }

    /// Merge `filter` into the active filter.
    pub fn set_filter(&mut self, filter: Filter) -> Option<LoadTicket> {
        self.state.filter.merge(filter);
        self.changed()
    }

    pub fn change_filter(
        &mut self,
        column: impl Into<String>,
        value: serde_json::Value,
    ) -> Option<LoadTicket> {
        self.state.filter.set(column, value);
        self.changed()
    }

    pub fn replace_filter(&mut self, filter: Filter) -> Option<LoadTicket> {
        self.state.filter = filter;
        self.changed()
    }

    pub fn clear_filter(&mut self) -> Option<LoadTicket> {
        self.replace_filter(Filter::new())
    }

    pub fn force_reload(&mut self) -> Option<LoadTicket> {
        self.state.reload_token = self.state.reload_token.wrapping_add(1);
        self.changed()
    }

    /// Issue a load against the current state, regardless of what changed.
    pub fn load(&mut self) -> LoadTicket {
        self.state.error = false;
        self.state.loading = true;
        self.latest_issued += 1;

        let ticket = LoadTicket {
            seq: self.latest_issued,
            request: self.request(),
        };
        debug!(
            seq = ticket.seq,
            page = ticket.request.page,
            rows_per_page = ticket.request.rows_per_page,
            "Issuing page load"
        );
        ticket
    }

    /// Apply the result of the load identified by `seq`.
    pub fn complete(&mut self, seq: u64, result: Result<PageResult<R>, LoadError>) -> LoadOutcome {
        let sequenced = self.options.response_ordering == ResponseOrdering::Sequenced;
        if sequenced && seq < self.latest_settled {
            debug!(seq, latest = self.latest_settled, "Discarding stale page response");
            return LoadOutcome::Discarded;
        }

        self.latest_settled = self.latest_settled.max(seq);
        let superseded = sequenced && seq < self.latest_issued;

        if superseded {
            if let Err(e) = &result {
                debug!(seq, latest = self.latest_issued, "Dropping failure of replaced load: {}", e);
                return LoadOutcome::Discarded;
            }
        }
        self.state.loading = superseded;

        let outcome = match result {
            Ok(page) => {
                debug!(seq, total = page.total, rows = page.data.len(), "Page loaded");
                self.state.total = page.total;
                self.state.data = page.data;
                self.state.error = false;
                LoadOutcome::Applied
            }
            Err(e) => {
                warn!(seq, "Page load failed: {}", e);
                self.state.error = true;
                LoadOutcome::Failed
            }
        };

        self.settle();
        outcome
    }

    fn changed(&mut self) -> Option<LoadTicket> {
        let ticket = self.evaluate();
        self.settle();
        ticket
    }

    fn evaluate(&mut self) -> Option<LoadTicket> {
        if !self.mounted {
            return None;
        }
        let key = ReloadKey::of(&self.state);
        if self.last_key.as_ref() == Some(&key) {
            return None;
        }
        self.last_key = Some(key);

        if !self.state.allow_initial_load {
            debug!("Initial load deferred");
            self.state.allow_initial_load = true;
            return None;
        }

        Some(self.load())
    }

    fn settle(&self) {
        let (Some(store), Some(key)) = (self.store.as_ref(), self.options.persist_key()) else {
            return;
        };
        if let Err(e) = write_snapshot(store.as_ref(), key, &self.state.snapshot()) {
            warn!("Failed to persist grid state '{}': {}", key, e);
        }
    }
}
