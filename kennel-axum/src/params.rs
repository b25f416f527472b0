use std::collections::HashMap;

use axum::http::{HeaderMap, Uri};

use crate::app::REQUEST_ID_HEADER;

/// What a REST request tells a service beyond its id and body.
///
/// Header names are stored lowercased; values that are not valid UTF-8
/// are dropped.
#[derive(Debug, Clone, Default)]
pub struct RestParams {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    pub request_id: Option<String>,
}

impl RestParams {
    pub fn from_parts(
        headers: &HeaderMap,
        query: HashMap<String, String>,
        method: &str,
        uri: &Uri,
    ) -> Self {
        let headers: HashMap<String, String> = headers
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let request_id = headers.get(REQUEST_ID_HEADER).cloned();

        Self {
            method: method.to_string(),
            path: uri.path().to_string(),
            query,
            headers,
            request_id,
        }
    }

    /// A query parameter as sent, `None` when absent.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }
}

/// Builds a service's params type from the request.
pub trait FromRestParams: Sized {
    fn from_rest_params(params: RestParams) -> Self;
}

impl FromRestParams for RestParams {
    fn from_rest_params(params: RestParams) -> Self {
        params
    }
}

impl FromRestParams for () {
    fn from_rest_params(_params: RestParams) -> Self {}
}
