use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Paging information handed to the paging renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagingView {
    /// Zero-based page index.
    pub page: usize,
    pub rows_per_page: usize,
    pub total: usize,
    pub rows_per_page_options: Vec<usize>,
}

impl PagingView {
    /// 1-based index of the first row shown, or 0 when there is nothing to show.
    pub fn first_row(&self) -> usize {
        if self.total == 0 {
            return 0;
        }
        self.page
            .saturating_mul(self.rows_per_page)
            .saturating_add(1)
            .min(self.total)
    }

    /// 1-based index of the last row shown.
    pub fn last_row(&self) -> usize {
        self.page
            .saturating_add(1)
            .saturating_mul(self.rows_per_page)
            .min(self.total)
    }

    pub fn page_count(&self) -> usize {
        if self.rows_per_page == 0 {
            return 0;
        }
        self.total.div_ceil(self.rows_per_page)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.page_count()
    }
}

/// Display text for the paging renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingLabels {
    pub rows_per_page: String,
    pub previous: String,
    pub next: String,
    /// Template with `{from}`, `{to}` and `{total}` placeholders.
    pub range: String,
}

impl Default for PagingLabels {
    fn default() -> Self {
        Self {
            rows_per_page: "Rows per page:".to_string(),
            previous: "Previous".to_string(),
            next: "Next".to_string(),
            range: "{from}-{to} of {total}".to_string(),
        }
    }
}

impl PagingLabels {
    pub fn format_range(&self, view: &PagingView) -> String {
        self.range
            .replace("{from}", &view.first_row().to_string())
            .replace("{to}", &view.last_row().to_string())
            .replace("{total}", &view.total.to_string())
    }
}

/// Display text of a single JSON value; strings unquoted, `null` empty.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Display text of `row[column]`, empty when the column is missing.
pub fn cell_text(row: &Value, column: &str) -> String {
    row.get(column).map(value_text).unwrap_or_default()
}
