use crate::{Error, ErrorContext, Result};
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Thin wrapper around a `reqwest::Client` bound to one base URL.
///
/// No request timeout is configured: the stream endpoint may stay open for as
/// long as the server keeps writing.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: Url) -> Result<Self> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(32)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()
            .map_err(|e| {
                Error::configuration_with_context(
                    format!("failed to build HTTP client: {e}"),
                    ErrorContext::new().with_source("http_transport"),
                )
            })?;

        Ok(Self { client, base_url })
    }

    /// Base URL with any trailing slash trimmed, followed by `path`.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    pub async fn get(&self, path: &str) -> Result<reqwest::Response> {
        let url = self.endpoint_url(path);
        debug!(%url, "GET");
        self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))
    }

    /// POST `body` as `application/json`.
    ///
    /// The payload is encoded before any connection is made, so an encoding
    /// failure surfaces as [`Error::Serialization`].
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response> {
        let payload = serde_json::to_vec(body)?;
        let url = self.endpoint_url(path);
        debug!(%url, bytes = payload.len(), "POST");
        self.client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
