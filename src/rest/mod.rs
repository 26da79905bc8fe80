//! Client for `vmrest`, the local REST API of VMware Fusion Pro /
//! Workstation Pro.
//!
//! ## Architecture
//!
//! ```text
//! VmRest { base_url, credentials, reqwest::Client }
//!     ├─► vms()      → Vms      (/api/vms/...)
//!     └─► network()  → Networks (/api/vmnet..., /api/vmnets)
//!                 └─► VmRest::send  →  Ok(Some(json)) | Ok(None) | Err(RestError)
//! ```
//!
//! Start the server before use (`vmrest -C` once to set credentials, then
//! `vmrest`). Every call is a single request; nothing is retried.

use std::time::Duration;

use anyhow::{Context, bail};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use tracing::{debug, warn};

mod error;
mod network;
mod vms;

pub use error::{RestError, RestErrorKind, RestResult, TRANSPORT_STATUS};
pub use network::Networks;
pub use vms::{PowerOperation, Vms};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8697";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Media type vmrest requires in `Accept`.
pub const VMREST_MEDIA_TYPE: &str = "application/vnd.vmware.vmw.rest-v1+json";

/// Connection settings for [`VmRest::new`].
#[derive(Debug, Clone)]
pub struct RestConfig {
    pub base_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout: Duration,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            username: None,
            password: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// One authenticated vmrest session.
///
/// The underlying connection pool is released when the value is dropped.
#[derive(Debug, Clone)]
pub struct VmRest {
    base_url: String,
    username: Option<String>,
    password: Option<String>,
    timeout: Duration,
    client: Client,
}

impl VmRest {
    pub fn new(config: RestConfig) -> anyhow::Result<Self> {
        let parsed = url::Url::parse(&config.base_url)
            .with_context(|| format!("invalid vmrest base URL: {}", config.base_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("vmrest base URL must be http or https: {}", config.base_url);
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(VMREST_MEDIA_TYPE));

        // vmrest is reached directly, never through a proxy.
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .no_proxy()
            .build()
            .context("failed to build vmrest HTTP client")?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            username: config.username,
            password: config.password,
            timeout: config.timeout,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn vms(&self) -> Vms<'_> {
        Vms { rest: self }
    }

    pub fn network(&self) -> Networks<'_> {
        Networks { rest: self }
    }

    fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/api{}", self.base_url, path);
        let request = self.client.request(method, url);
        match &self.username {
            Some(user) => request.basic_auth(user, self.password.as_deref()),
            None => request,
        }
    }

    /// Bodyless request to `/api{path}`.
    pub async fn request(&self, method: Method, path: &str) -> RestResult {
        let request = self.builder(method.clone(), path);
        self.send(request, &method, path).await
    }

    /// Request with a JSON body.
    pub async fn request_json<B>(&self, method: Method, path: &str, body: &B) -> RestResult
    where
        B: Serialize + ?Sized,
    {
        let request = self.builder(method.clone(), path).json(body);
        self.send(request, &method, path).await
    }

    /// Request with a raw text body (the power endpoint takes `on`, `off`, ...).
    pub async fn request_text(&self, method: Method, path: &str, body: &str) -> RestResult {
        let request = self.builder(method.clone(), path).body(body.to_owned());
        self.send(request, &method, path).await
    }

    async fn send(&self, request: RequestBuilder, method: &Method, path: &str) -> RestResult {
        debug!(%method, path, "vmrest request");

        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(e, method, path))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e, method, path))?;

        if status.is_success() {
            debug!(%method, path, status = status.as_u16(), bytes = body.len(), "vmrest response");
            if body.is_empty() {
                return Ok(None);
            }
            return serde_json::from_slice(&body).map(Some).map_err(|e| {
                RestError::new(
                    RestErrorKind::Server,
                    status.as_u16(),
                    format!("invalid JSON in response body: {e}"),
                )
            });
        }

        let message = error::body_message(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_owned());
        let err = RestError::from_status(status.as_u16(), message);
        warn!(%method, path, status = err.status(), kind = %err.kind(), message = err.message(), "vmrest request failed");
        Err(err)
    }

    fn transport_error(&self, e: reqwest::Error, method: &Method, path: &str) -> RestError {
        let message = if e.is_timeout() {
            format!("Timeout after {}s", self.timeout.as_secs_f64())
        } else {
            e.to_string()
        };
        warn!(%method, path, error = %message, "vmrest unreachable");
        RestError::connection(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let rest = VmRest::new(RestConfig {
            base_url: "http://127.0.0.1:8697/".into(),
            ..RestConfig::default()
        })
        .unwrap();
        assert_eq!(rest.base_url(), "http://127.0.0.1:8697");
        assert_eq!(rest.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let bad = VmRest::new(RestConfig {
            base_url: "not a url".into(),
            ..RestConfig::default()
        });
        assert!(bad.is_err());

        let ftp = VmRest::new(RestConfig {
            base_url: "ftp://127.0.0.1".into(),
            ..RestConfig::default()
        });
        assert!(ftp.is_err());
    }
}
