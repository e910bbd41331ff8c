use async_trait::async_trait;
use datagrid_shared::source::{build_page_url, QueryConvention};
use datagrid_shared::{LoadError, PageLoader, PageRequest, PageResult};
use gloo::net::http::Request;
use serde_json::Value;

/// Page loader that fetches rows from an HTTP backend
#[derive(Debug, Clone, PartialEq)]
pub struct HttpSource {
    base_url: String,
    convention: QueryConvention,
}

impl HttpSource {
    /// Create a source using the `page`/`count`/`orderBy`/`desc` convention
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            convention: QueryConvention::Standard,
        }
    }

    /// Create a source for a json-server style backend
    pub fn json_server(base_url: impl Into<String>) -> Self {
        Self::new(base_url).with_convention(QueryConvention::JsonServer)
    }

    pub fn with_convention(mut self, convention: QueryConvention) -> Self {
        self.convention = convention;
        self
    }

    pub fn url_for(&self, request: &PageRequest) -> String {
        build_page_url(&self.base_url, request, self.convention)
    }
}

#[async_trait(?Send)]
impl PageLoader<Value> for HttpSource {
    async fn load_page(&self, request: PageRequest) -> Result<PageResult<Value>, LoadError> {
        let url = self.url_for(&request);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LoadError::Status { status, message });
        }

        match self.convention {
            QueryConvention::Standard => response
                .json::<PageResult<Value>>()
                .await
                .map_err(|e| LoadError::Decode(e.to_string())),
            QueryConvention::JsonServer => {
                let header_total = response
                    .headers()
                    .get("X-Total-Count")
                    .and_then(|total| total.trim().parse::<usize>().ok());
                let data = response
                    .json::<Vec<Value>>()
                    .await
                    .map_err(|e| LoadError::Decode(e.to_string()))?;
                Ok(PageResult::new(header_total.unwrap_or(data.len()), data))
            }
        }
    }
}
