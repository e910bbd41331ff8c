use std::rc::Rc;

use datagrid_shared::source::MemorySource;
use datagrid_shared::{
    GridController, GridHandle, GridOptions, GridState, LoadError, PageLoader, PagingView,
    PendingLoad,
};
use serde_json::Value;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::logging::Logger;
use crate::services::storage::BrowserStore;

/// Rows are opaque JSON records to the grid.
pub type Row = Value;

/// Loader passed through component props; compared by identity.
#[derive(Clone)]
pub struct LoaderRef(Rc<dyn PageLoader<Row>>);

impl LoaderRef {
    pub fn new(loader: impl PageLoader<Row> + 'static) -> Self {
        Self(Rc::new(loader))
    }
}

impl PartialEq for LoaderRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// A new `grid` or `loader` replaces the grid the hook renders. `options`
/// only seed a private grid and are read when that grid is created.
#[derive(Clone, PartialEq)]
pub struct UseDataGridProps {
    /// Loader for a privately owned grid. Ignored when `grid` is set.
    pub loader: Option<LoaderRef>,
    pub options: GridOptions,
    /// Grid shared with other views, created by the owner.
    pub grid: Option<GridHandle<Row>>,
}

pub struct UseDataGridResult {
    pub grid: GridHandle<Row>,
    pub state: GridState<Row>,
    pub paging: PagingView,
    pub actions: UseDataGridActions,
}

#[derive(Clone, PartialEq)]
pub struct UseDataGridActions {
    pub on_change_page: Callback<usize>,
    pub on_change_rows_per_page: Callback<usize>,
    pub on_change_order_by: Callback<String>,
    pub on_change_filter: Callback<(String, Value)>,
    pub reload: Callback<()>,
    pub load: Callback<()>,
}

/// Create a grid owned by a single view, restoring persisted state when the
/// options ask for it.
pub fn create_grid(options: GridOptions, loader: Option<LoaderRef>) -> GridHandle<Row> {
    if let Err(e) = options.validate() {
        Logger::warn_with_component("data-grid", &format!("Invalid grid options: {}", e));
    }

    let loader = loader.map(|loader| loader.0).unwrap_or_else(|| {
        Logger::error_with_component("data-grid", "No loader or shared grid given; grid stays empty");
        Rc::new(MemorySource::default())
    });

    let controller = match options.persist.as_ref().map(|persist| persist.store) {
        Some(kind) => GridController::with_store(options, Rc::new(BrowserStore::new(kind))),
        None => GridController::new(options),
    };
    GridHandle::new(controller, loader)
}

fn load_failure_line(page: usize, error: &LoadError) -> String {
    format!("Page {} failed to load: {}", page, error)
}

/// Run a load issued by a handler on the local event loop.
pub fn spawn_pending(pending: Option<PendingLoad<Row>>) {
    if let Some(pending) = pending {
        let page = pending.ticket().request.page;
        spawn_local(async move {
            let outcome = pending
                .run_with(|e| Logger::warn_with_component("data-grid", &load_failure_line(page, e)))
                .await;
            Logger::debug_with_component("data-grid", &format!("Page {} load: {:?}", page, outcome));
        });
    }
}

/// The handle a view renders: the shared one when given, otherwise a new
/// private grid.
fn resolve_grid(
    shared: Option<GridHandle<Row>>,
    loader: Option<LoaderRef>,
    options: GridOptions,
) -> GridHandle<Row> {
    shared.unwrap_or_else(|| create_grid(options, loader))
}

#[hook]
pub fn use_data_grid(props: &UseDataGridProps) -> UseDataGridResult {
    let grid = {
        let options = props.options.clone();
        use_memo(
            (props.grid.clone(), props.loader.clone()),
            move |(shared, loader)| resolve_grid(shared.clone(), loader.clone(), options),
        )
    };
    let grid: GridHandle<Row> = (*grid).clone();
    let force_update = use_force_update();

    // Re-render on every change and issue the first load
    use_effect_with(grid.clone(), move |grid| {
        let id = grid.subscribe(move || force_update.force_update());
        spawn_pending(grid.mount());
        let grid = grid.clone();
        move || grid.unsubscribe(id)
    });

    let on_change_page = use_callback(grid.clone(), |page: usize, grid| {
        spawn_pending(grid.set_page(page))
    });

    let on_change_rows_per_page = use_callback(grid.clone(), |rows: usize, grid| {
        spawn_pending(grid.set_rows_per_page(rows))
    });

    let on_change_order_by = use_callback(grid.clone(), |column: String, grid| {
        spawn_pending(grid.toggle_sort(&column))
    });

    let on_change_filter = use_callback(grid.clone(), |(column, value): (String, Value), grid| {
        spawn_pending(grid.change_filter(column, value))
    });

    let reload = use_callback(grid.clone(), |_: (), grid| spawn_pending(grid.force_reload()));

    let load = use_callback(grid.clone(), |_: (), grid| spawn_pending(Some(grid.load())));

    let state = grid.state();
    let paging = grid.paging();

    UseDataGridResult {
        grid,
        state,
        paging,
        actions: UseDataGridActions {
            on_change_page,
            on_change_rows_per_page,
            on_change_order_by,
            on_change_filter,
            reload,
            load,
        },
    }
}
