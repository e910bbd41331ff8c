use serde::{Deserialize, Serialize};

use crate::filter::Filter;
use crate::options::GridOptions;
use crate::sort::SortDirection;
use crate::view::PagingView;

/// Full state of one grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridState<R> {
    /// Zero-based page index.
    pub page: usize,
    pub rows_per_page: usize,
    pub total: usize,
    pub order_by: Option<String>,
    pub sort_direction: Option<SortDirection>,
    pub filter: Filter,
    pub data: Vec<R>,
    pub loading: bool,
    pub error: bool,
    pub allow_initial_load: bool,
    pub reload_token: u64,
}

impl<R> GridState<R> {
    /// Initial state from options, seeded by a restored snapshot if any.
    pub fn initial(options: &GridOptions, restored: Option<GridSnapshot>) -> Self {
        let restored = restored.unwrap_or_default();
        let filter = if restored.filter.is_empty() {
            options.initial_filter.clone()
        } else {
            restored.filter
        };

        Self {
            page: restored.page,
            rows_per_page: restored
                .rows_per_page
                .filter(|rows| *rows > 0)
                .unwrap_or_else(|| options.rows_per_page()),
            total: restored.total,
            order_by: restored.order_by.or_else(|| options.initial_order_by.clone()),
            sort_direction: restored.sort_direction.or(options.initial_sort),
            filter,
            data: Vec::new(),
            loading: false,
            error: false,
            allow_initial_load: options.initial_load,
            reload_token: 0,
        }
    }

    pub fn is_desc(&self) -> bool {
        SortDirection::is_desc(self.sort_direction)
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            page: self.page,
            rows_per_page: Some(self.rows_per_page),
            total: self.total,
            order_by: self.order_by.clone(),
            sort_direction: self.sort_direction,
            filter: self.filter.clone(),
        }
    }

    pub fn paging(&self, rows_per_page_options: &[usize]) -> PagingView {
        PagingView {
            page: self.page,
            rows_per_page: self.rows_per_page,
            total: self.total,
            rows_per_page_options: rows_per_page_options.to_vec(),
        }
    }
}

/// The persisted part of [`GridState`].
///
/// Key names match the snapshots written by the browser grid so existing
/// stored state keeps working; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridSnapshot {
    pub page: usize,
    pub rows_per_page: Option<usize>,
    pub total: usize,
    pub order_by: Option<String>,
    #[serde(rename = "sort")]
    pub sort_direction: Option<SortDirection>,
    pub filter: Filter,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_initial_from_options() {
        let options = GridOptions::new()
            .with_rows_per_page(25)
            .with_order_by("name")
            .with_initial_load(false);
        let state: GridState<()> = GridState::initial(&options, None);

        assert_eq!(state.page, 0);
        assert_eq!(state.rows_per_page, 25);
        assert_eq!(state.order_by.as_deref(), Some("name"));
        assert_eq!(state.sort_direction, None);
        assert!(!state.allow_initial_load);
        assert!(!state.loading);
        assert!(!state.error);
    }

    #[test]
    fn test_snapshot_overrides_options() {
        let options = GridOptions::new()
            .with_rows_per_page(25)
            .with_order_by("name")
            .with_filter([("kind", json!("a"))].into_iter().collect());
        let snapshot = GridSnapshot {
            page: 3,
            rows_per_page: Some(5),
            total: 40,
            order_by: Some("number".to_string()),
            sort_direction: Some(SortDirection::Desc),
            filter: [("kind", json!("b"))].into_iter().collect(),
        };
        let state: GridState<()> = GridState::initial(&options, Some(snapshot));

        assert_eq!(state.page, 3);
        assert_eq!(state.rows_per_page, 5);
        assert_eq!(state.total, 40);
        assert_eq!(state.order_by.as_deref(), Some("number"));
        assert_eq!(state.sort_direction, Some(SortDirection::Desc));
        assert_eq!(state.filter.get("kind"), Some(&json!("b")));
    }

    #[test]
    fn test_zero_rows_in_snapshot_falls_back() {
        let options = GridOptions::new().with_rows_per_page(25);
        let snapshot = GridSnapshot {
            rows_per_page: Some(0),
            ..GridSnapshot::default()
        };
        let state: GridState<()> = GridState::initial(&options, Some(snapshot));
        assert_eq!(state.rows_per_page, 25);
    }

    #[test]
    fn test_snapshot_reads_legacy_json() {
        let snapshot: GridSnapshot = serde_json::from_str(
            r#"{"rowsPerPage":25,"page":2,"total":90,"orderBy":"name","sort":"desc",
                "filter":{"name":"A"},"data":[{"name":"A"}],"loading":false,"error":false}"#,
        )
        .unwrap();

        assert_eq!(snapshot.page, 2);
        assert_eq!(snapshot.rows_per_page, Some(25));
        assert_eq!(snapshot.total, 90);
        assert_eq!(snapshot.order_by.as_deref(), Some("name"));
        assert_eq!(snapshot.sort_direction, Some(SortDirection::Desc));
        assert_eq!(snapshot.filter.get("name"), Some(&json!("A")));
    }
}
