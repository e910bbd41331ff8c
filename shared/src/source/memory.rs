use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;

use crate::error::LoadError;
use crate::loader::PageLoader;
use crate::page::{PageRequest, PageResult};
use crate::view::{cell_text, value_text};

/// Loader over a fixed set of JSON rows.
///
/// String filters match case-insensitively by substring, other filter values
/// by equality. Numbers sort numerically, everything else by its text.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    rows: Vec<Value>,
}

impl MemorySource {
    pub fn new(rows: Vec<Value>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Value] {
        &self.rows
    }

    pub fn query(&self, request: &PageRequest) -> PageResult<Value> {
        let mut matching: Vec<&Value> = self
            .rows
            .iter()
            .filter(|row| matches_filter(row, request))
            .collect();

        if let Some(column) = &request.order_by {
            matching.sort_by(|a, b| compare_cells(a.get(column), b.get(column)));
            if request.is_desc() {
                matching.reverse();
            }
        }

        let total = matching.len();
        let data = matching
            .into_iter()
            .skip(request.offset())
            .take(request.rows_per_page)
            .cloned()
            .collect();

        PageResult::new(total, data)
    }
}

#[async_trait(?Send)]
impl PageLoader<Value> for MemorySource {
    async fn load_page(&self, request: PageRequest) -> Result<PageResult<Value>, LoadError> {
        Ok(self.query(&request))
    }
}

fn matches_filter(row: &Value, request: &PageRequest) -> bool {
    request.filter.active().all(|(column, expected)| match expected {
        Value::String(needle) => cell_text(row, column)
            .to_lowercase()
            .contains(&needle.to_lowercase()),
        other => row.get(column) == Some(other),
    })
}

fn compare_cells(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or_default(), y.as_f64().unwrap_or_default());
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => value_text(x).cmp(&value_text(y)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Filter;
    use crate::sort::SortDirection;
    use serde_json::json;

    fn source() -> MemorySource {
        MemorySource::new(vec![
            json!({ "name": "Carla", "number": 10 }),
            json!({ "name": "anna", "number": 2 }),
            json!({ "name": "Bert", "number": 33 }),
            json!({ "name": "Anton", "number": 4 }),
        ])
    }

    fn request(order_by: Option<&str>, direction: Option<SortDirection>, filter: Filter) -> PageRequest {
        PageRequest {
            page: 1,
            rows_per_page: 10,
            order_by: order_by.map(str::to_string),
            sort_direction: direction,
            filter,
        }
    }

    fn names(result: &PageResult<Value>) -> Vec<&str> {
        result
            .data
            .iter()
            .map(|row| row["name"].as_str().unwrap())
            .collect()
    }

    #[test]
    fn test_numeric_sort() {
        let result = source().query(&request(Some("number"), Some(SortDirection::Desc), Filter::new()));
        assert_eq!(names(&result), vec!["Bert", "Carla", "Anton", "anna"]);
    }

    #[test]
    fn test_substring_filter_is_case_insensitive() {
        let filter = [("name", json!("AN"))].into_iter().collect();
        let result = source().query(&request(Some("name"), None, filter));
        assert_eq!(result.total, 2);
        assert_eq!(names(&result), vec!["Anton", "anna"]);
    }

    #[test]
    fn test_exact_and_null_filters() {
        let filter = [("number", json!(33)), ("name", json!(null))].into_iter().collect();
        let result = source().query(&request(None, None, filter));
        assert_eq!(names(&result), vec!["Bert"]);
    }

    #[test]
    fn test_pages_are_sliced() {
        let rows = (0..25).map(|n| json!({ "name": format!("row{}", n) })).collect();
        let source = MemorySource::new(rows);
        let last = PageRequest {
            page: 3,
            ..request(None, None, Filter::new())
        };
        let result = source.query(&last);
        assert_eq!(result.total, 25);
        assert_eq!(result.data.len(), 5);
        assert_eq!(result.data[0]["name"], "row20");
    }
}
