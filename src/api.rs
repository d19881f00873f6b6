//! JSON client for the Library Logger API.
//!
//! Every call resolves to `Some(body)` or `None`. Failures are logged and
//! reported to the user through a [`Notifier`]; they are never retried and
//! never propagated. The HTTP status code is not inspected: the API answers
//! rejected requests with a JSON `{ "success": false, "error": ... }` body,
//! which is returned to the caller like any other response.

use crate::error::Result;
use crate::toast::{Notifier, ToastKind};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};
use url::Url;

/// Path prefix of every API endpoint
pub const API_PREFIX: &str = "/api";

/// Title of the toast raised when a call fails
pub const ERROR_TITLE: &str = "Error";

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base: String,
    notifier: Arc<dyn Notifier>,
}

impl ApiClient {
    /// Build a client for the server at `base_url`, reporting failures to
    /// `notifier`.
    pub fn new(base_url: &Url, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, notifier)
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: &Url,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            client,
            base: base_url.as_str().trim_end_matches('/').to_string(),
            notifier,
        }
    }

    /// Full URL for an endpoint such as `/students/4`
    #[must_use]
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{API_PREFIX}{endpoint}", self.base)
    }

    pub async fn get(&self, endpoint: &str) -> Option<Value> {
        let request = self.request(Method::GET, endpoint);
        self.finish(request, "Failed to fetch data").await
    }

    pub async fn post<T: Serialize + ?Sized>(&self, endpoint: &str, data: &T) -> Option<Value> {
        let request = self.request(Method::POST, endpoint).json(data);
        self.finish(request, "Failed to send data").await
    }

    pub async fn put<T: Serialize + ?Sized>(&self, endpoint: &str, data: &T) -> Option<Value> {
        let request = self.request(Method::PUT, endpoint).json(data);
        self.finish(request, "Failed to update data").await
    }

    pub async fn delete(&self, endpoint: &str) -> Option<Value> {
        let request = self.request(Method::DELETE, endpoint);
        self.finish(request, "Failed to delete").await
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = self.endpoint_url(endpoint);
        debug!("API {method} {url}");
        self.client.request(method, url)
    }

    async fn finish(&self, request: RequestBuilder, failure_message: &str) -> Option<Value> {
        match send_json(request).await {
            Ok(body) => Some(body),
            Err(e) => {
                error!("API Error: {e}");
                self.notifier
                    .notify(ERROR_TITLE, failure_message, ToastKind::Error);
                None
            }
        }
    }
}

async fn send_json(request: RequestBuilder) -> Result<Value> {
    let response = request.send().await?;
    debug!("API response status {}", response.status());
    Ok(response.json::<Value>().await?)
}
