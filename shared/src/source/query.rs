use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::filter::Filter;
use crate::page::PageRequest;

/// Query-string convention of the backend a grid talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryConvention {
    /// `page`, `count`, `orderBy`, `desc`; response `{ "total", "data" }`.
    #[default]
    Standard,
    /// json-server: `_page`, `_limit`, `_sort`, `_order`; response is a bare array.
    JsonServer,
}

/// Append paging, sort and filter parameters for `request` to `base`.
///
/// Sort parameters are left out when no sort column is set. Filter entries
/// with a `null` value are skipped.
pub fn build_page_url(base: &str, request: &PageRequest, convention: QueryConvention) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    let mut url = format!("{}{}", base, separator);

    match convention {
        QueryConvention::Standard => {
            url.push_str(&format!("page={}&count={}", request.page, request.rows_per_page));
            if let Some(order_by) = &request.order_by {
                url.push_str(&format!(
                    "&orderBy={}&desc={}",
                    urlencoding::encode(order_by),
                    request.is_desc()
                ));
            }
        }
        QueryConvention::JsonServer => {
            url.push_str(&format!("_page={}&_limit={}", request.page, request.rows_per_page));
            if let Some(order_by) = &request.order_by {
                let order = if request.is_desc() { "desc" } else { "asc" };
                url.push_str(&format!(
                    "&_sort={}&_order={}",
                    urlencoding::encode(order_by),
                    order
                ));
            }
        }
    }

    url.push_str(&serialize_filter(&request.filter));
    url
}

fn serialize_filter(filter: &Filter) -> String {
    filter
        .active()
        .map(|(key, value)| {
            format!(
                "&{}={}",
                urlencoding::encode(key),
                urlencoding::encode(&filter_value_text(value))
            )
        })
        .collect()
}

fn filter_value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortDirection;
    use serde_json::json;

    fn request() -> PageRequest {
        PageRequest {
            page: 2,
            rows_per_page: 10,
            order_by: Some("name".to_string()),
            sort_direction: Some(SortDirection::Desc),
            filter: [
                ("city", json!("Graz & Wien")),
                ("active", json!(true)),
                ("deleted", json!(null)),
            ]
            .into_iter()
            .collect(),
        }
    }

    #[test]
    fn test_standard_convention() {
        let url = build_page_url("/api/people", &request(), QueryConvention::Standard);
        assert_eq!(
            url,
            "/api/people?page=2&count=10&orderBy=name&desc=true&active=true&city=Graz%20%26%20Wien"
        );
    }

    #[test]
    fn test_json_server_convention() {
        let url = build_page_url("/people?embed=x", &request(), QueryConvention::JsonServer);
        assert_eq!(
            url,
            "/people?embed=x&_page=2&_limit=10&_sort=name&_order=desc&active=true&city=Graz%20%26%20Wien"
        );
    }

    #[test]
    fn test_unsorted_request_omits_sort_params() {
        let request = PageRequest {
            order_by: None,
            sort_direction: None,
            filter: Filter::new(),
            ..request()
        };
        assert_eq!(
            build_page_url("/people", &request, QueryConvention::JsonServer),
            "/people?_page=2&_limit=10"
        );
        assert_eq!(
            build_page_url("/people", &request, QueryConvention::Standard),
            "/people?page=2&count=10"
        );
    }
}
