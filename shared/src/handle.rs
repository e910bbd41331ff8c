use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::controller::{GridController, LoadOutcome, LoadTicket};
use crate::error::LoadError;
use crate::filter::Filter;
use crate::loader::PageLoader;
use crate::sort::SortDirection;
use crate::state::GridState;
use crate::view::PagingView;

/// Identifies a listener registered with [`GridHandle::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(usize);

struct Inner<R> {
    controller: RefCell<GridController<R>>,
    loader: Rc<dyn PageLoader<R>>,
    listeners: RefCell<Vec<(ListenerId, Rc<dyn Fn()>)>>,
    next_listener: Cell<usize>,
}

/// Shared, single-threaded owner of a grid controller and its loader.
///
/// Clones refer to the same grid, so one handle can back several views.
/// Handlers return a [`PendingLoad`] when the change needs fresh data; the
/// caller decides where to run it.
pub struct GridHandle<R> {
    inner: Rc<Inner<R>>,
}

impl<R> Clone for GridHandle<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<R> PartialEq for GridHandle<R> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<R> GridHandle<R> {
    pub fn new(controller: GridController<R>, loader: Rc<dyn PageLoader<R>>) -> Self {
        Self {
            inner: Rc::new(Inner {
                controller: RefCell::new(controller),
                loader,
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
            }),
        }
    }

    /// Run `f` against the current state.
    pub fn read<T>(&self, f: impl FnOnce(&GridState<R>) -> T) -> T {
        f(self.inner.controller.borrow().state())
    }

    pub fn state(&self) -> GridState<R>
    where
        R: Clone,
    {
        self.read(GridState::clone)
    }

    pub fn paging(&self) -> PagingView {
        self.inner.controller.borrow().paging()
    }

    /// Register a callback run after every change, including load completions.
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> ListenerId {
        let id = ListenerId(self.inner.next_listener.get());
        self.inner.next_listener.set(id.0 + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.inner
            .listeners
            .borrow_mut()
            .retain(|(listener_id, _)| *listener_id != id);
    }

    pub fn mount(&self) -> Option<PendingLoad<R>> {
        self.apply(GridController::mount)
    }

    pub fn set_page(&self, page: usize) -> Option<PendingLoad<R>> {
        self.apply(|grid| grid.set_page(page))
    }

    pub fn set_rows_per_page(&self, rows: usize) -> Option<PendingLoad<R>> {
        self.apply(|grid| grid.set_rows_per_page(rows))
    }

    pub fn set_order_by(
        &self,
        column: impl Into<String>,
        direction: Option<SortDirection>,
    ) -> Option<PendingLoad<R>> {
        self.apply(|grid| grid.set_order_by(column, direction))
    }

    pub fn toggle_sort(&self, column: &str) -> Option<PendingLoad<R>> {
        self.apply(|grid| grid.toggle_sort(column))
    }

    pub fn set_filter(&self, filter: Filter) -> Option<PendingLoad<R>> {
        self.apply(|grid| grid.set_filter(filter))
    }

    pub fn change_filter(
        &self,
        column: impl Into<String>,
        value: serde_json::Value,
    ) -> Option<PendingLoad<R>> {
        self.apply(|grid| grid.change_filter(column, value))
    }

    pub fn replace_filter(&self, filter: Filter) -> Option<PendingLoad<R>> {
        self.apply(|grid| grid.replace_filter(filter))
    }

    pub fn clear_filter(&self) -> Option<PendingLoad<R>> {
        self.apply(GridController::clear_filter)
    }

    pub fn force_reload(&self) -> Option<PendingLoad<R>> {
        self.apply(GridController::force_reload)
    }

    /// Issue a load unconditionally, e.g. from a retry button.
    pub fn load(&self) -> PendingLoad<R> {
        let ticket = self.inner.controller.borrow_mut().load();
        self.notify();
        PendingLoad {
            handle: self.clone(),
            ticket,
        }
    }

    fn apply(
        &self,
        change: impl FnOnce(&mut GridController<R>) -> Option<LoadTicket>,
    ) -> Option<PendingLoad<R>> {
        let ticket = {
            let mut controller = self.inner.controller.borrow_mut();
            change(&mut *controller)
        };
        self.notify();
        ticket.map(|ticket| PendingLoad {
            handle: self.clone(),
            ticket,
        })
    }

    fn notify(&self) {
        // Listeners may read the handle, so call them on a copy of the list.
        let listeners: Vec<Rc<dyn Fn()>> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener();
        }
    }
}

/// A load issued by the controller, waiting to be run.
#[must_use = "a pending load does nothing unless run"]
pub struct PendingLoad<R> {
    handle: GridHandle<R>,
    ticket: LoadTicket,
}

impl<R> PendingLoad<R> {
    pub fn ticket(&self) -> &LoadTicket {
        &self.ticket
    }

    /// Call the loader and apply its result. No borrow of the grid is held
    /// while the loader runs.
    pub async fn run(self) -> LoadOutcome {
        self.run_with(|_| {}).await
    }

    /// Like [`run`](Self::run), handing a loader failure to `on_error`
    /// before the grid sees it.
    pub async fn run_with(self, on_error: impl FnOnce(&LoadError)) -> LoadOutcome {
        let loader = Rc::clone(&self.handle.inner.loader);
        let result = loader.load_page(self.ticket.request.clone()).await;
        if let Err(e) = &result {
            on_error(e);
        }
        let outcome = self
            .handle
            .inner
            .controller
            .borrow_mut()
            .complete(self.ticket.seq, result);
        self.handle.notify();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use crate::options::GridOptions;
    use crate::page::{PageRequest, PageResult};
    use crate::source::MemorySource;
    use async_trait::async_trait;
    use futures::channel::oneshot;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;
    use serde_json::{json, Value};
    use std::collections::HashMap;

    type Reply = Result<PageResult<i32>, LoadError>;

    /// Loader whose responses are released by the test, one page at a time.
    #[derive(Default)]
    struct ControlledLoader {
        pending: RefCell<HashMap<usize, oneshot::Receiver<Reply>>>,
        calls: RefCell<Vec<PageRequest>>,
    }

    impl ControlledLoader {
        fn expect(&self, page: usize) -> oneshot::Sender<Reply> {
            let (tx, rx) = oneshot::channel();
            self.pending.borrow_mut().insert(page, rx);
            tx
        }
    }

    #[async_trait(?Send)]
    impl PageLoader<i32> for ControlledLoader {
        async fn load_page(&self, request: PageRequest) -> Reply {
            self.calls.borrow_mut().push(request.clone());
            let rx = self.pending.borrow_mut().remove(&request.page);
            match rx {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(LoadError::Other("cancelled".to_string()))),
                None => Err(LoadError::Other("unexpected page".to_string())),
            }
        }
    }

    fn people() -> Vec<Value> {
        (1..=25)
            .map(|n| json!({ "name": format!("P{:02}", n), "number": n }))
            .collect()
    }

    #[tokio::test]
    async fn test_memory_source_scenario() {
        let source: Rc<dyn PageLoader<Value>> = Rc::new(MemorySource::new(people()));
        let grid = GridHandle::new(GridController::new(GridOptions::default()), source);

        let outcome = grid.mount().unwrap().run().await;
        assert_eq!(outcome, LoadOutcome::Applied);

        grid.read(|state| {
            assert_eq!(state.total, 25);
            assert_eq!(state.data.len(), 10);
            assert!(!state.loading);
            assert!(!state.error);
        });
    }

    #[tokio::test]
    async fn test_closure_loader_and_retry() {
        let attempts = Rc::new(Cell::new(0));
        let counter = attempts.clone();
        let loader = move |request: PageRequest| {
            counter.set(counter.get() + 1);
            let fail = counter.get() == 1;
            async move {
                if fail {
                    Err(LoadError::Status {
                        status: 500,
                        message: "down".to_string(),
                    })
                } else {
                    Ok(PageResult::new(1, vec![request.page as i32]))
                }
            }
        };
        let loader: Rc<dyn PageLoader<i32>> = Rc::new(loader);
        let grid = GridHandle::new(GridController::new(GridOptions::default()), loader);

        assert_eq!(grid.mount().unwrap().run().await, LoadOutcome::Failed);
        assert!(grid.read(|state| state.error));

        assert_eq!(grid.load().run().await, LoadOutcome::Applied);
        let state = grid.state();
        assert!(!state.error);
        assert_eq!(state.data, vec![1]);
        assert_eq!(attempts.get(), 2);
    }

    #[tokio::test]
    async fn test_run_with_reports_failure_detail() {
        let loader = |_: PageRequest| async {
            Err::<PageResult<i32>, _>(LoadError::Status {
                status: 503,
                message: "maintenance".to_string(),
            })
        };
        let loader: Rc<dyn PageLoader<i32>> = Rc::new(loader);
        let grid = GridHandle::new(GridController::new(GridOptions::default()), loader);

        let reported = Rc::new(RefCell::new(None));
        let sink = reported.clone();
        let outcome = grid
            .mount()
            .unwrap()
            .run_with(move |e| *sink.borrow_mut() = Some(e.to_string()))
            .await;

        assert_eq!(outcome, LoadOutcome::Failed);
        let detail = reported.borrow().clone().unwrap();
        assert!(detail.contains("503"), "{}", detail);
        assert!(detail.contains("maintenance"), "{}", detail);
    }

    #[test]
    fn test_listeners_see_every_change() {
        let loader = Rc::new(ControlledLoader::default());
        let grid: GridHandle<i32> = GridHandle::new(GridController::new(GridOptions::default()), loader);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let id = {
            let grid_for_listener = grid.clone();
            let seen = seen.clone();
            grid.subscribe(move || {
                let page = grid_for_listener.read(|state| state.page);
                seen.borrow_mut().push(page);
            })
        };

        let _ = grid.set_page(1);
        let _ = grid.set_page(2);
        grid.unsubscribe(id);
        let _ = grid.set_page(3);

        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_shared_handle_is_one_grid() {
        let loader = Rc::new(ControlledLoader::default());
        let grid: GridHandle<i32> = GridHandle::new(GridController::new(GridOptions::default()), loader);
        let other_view = grid.clone();

        let _ = other_view.set_page(4);
        assert_eq!(grid.read(|state| state.page), 4);
        assert!(grid == other_view);
    }

    fn spawn_all(
        pool: &LocalPool,
        loads: Vec<PendingLoad<i32>>,
    ) -> Rc<RefCell<Vec<(usize, LoadOutcome)>>> {
        let outcomes = Rc::new(RefCell::new(Vec::new()));
        let spawner = pool.spawner();
        for pending in loads {
            let outcomes = outcomes.clone();
            spawner
                .spawn_local(async move {
                    let page = pending.ticket().request.page;
                    let outcome = pending.run().await;
                    outcomes.borrow_mut().push((page, outcome));
                })
                .unwrap();
        }
        outcomes
    }

    #[test]
    fn test_later_page_resolving_last_wins() {
        let loader = Rc::new(ControlledLoader::default());
        let page0 = loader.expect(1);
        let page2 = loader.expect(3);
        let grid: GridHandle<i32> = GridHandle::new(GridController::new(GridOptions::default()), loader.clone());

        let mut pool = LocalPool::new();
        let first = grid.mount().unwrap();
        let second = grid.set_page(2).unwrap();
        let outcomes = spawn_all(&pool, vec![first, second]);

        pool.run_until_stalled();
        assert_eq!(loader.calls.borrow().len(), 2);
        assert!(grid.read(|state| state.loading));

        page0.send(Ok(PageResult::new(30, vec![0]))).unwrap();
        pool.run_until_stalled();
        assert_eq!(grid.read(|state| state.data.clone()), vec![0]);
        assert!(grid.read(|state| state.loading), "page 2 still pending");

        page2.send(Ok(PageResult::new(30, vec![20]))).unwrap();
        pool.run_until_stalled();

        let state = grid.state();
        assert_eq!(state.page, 2);
        assert_eq!(state.data, vec![20]);
        assert_eq!(state.total, 30);
        assert!(!state.loading);
        assert_eq!(
            *outcomes.borrow(),
            vec![(1, LoadOutcome::Applied), (3, LoadOutcome::Applied)]
        );
    }

    #[test]
    fn test_earlier_page_resolving_last_is_discarded() {
        let loader = Rc::new(ControlledLoader::default());
        let page0 = loader.expect(1);
        let page2 = loader.expect(3);
        let grid: GridHandle<i32> = GridHandle::new(GridController::new(GridOptions::default()), loader);

        let mut pool = LocalPool::new();
        let first = grid.mount().unwrap();
        let second = grid.set_page(2).unwrap();
        let outcomes = spawn_all(&pool, vec![first, second]);
        pool.run_until_stalled();

        page2.send(Ok(PageResult::new(30, vec![20]))).unwrap();
        pool.run_until_stalled();
        assert!(!grid.read(|state| state.loading));

        page0.send(Ok(PageResult::new(30, vec![0]))).unwrap();
        pool.run_until_stalled();

        assert_eq!(grid.read(|state| state.data.clone()), vec![20]);
        assert_eq!(
            *outcomes.borrow(),
            vec![(3, LoadOutcome::Applied), (1, LoadOutcome::Discarded)]
        );
    }
}
