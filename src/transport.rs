//! # Transport
//!
//! The HTTP layer is a collaborator, not part of the traversal logic. Anything that
//! can execute a [`HalRequest`] and hand back a [`RawResponse`] can drive a
//! [`ResourceHelper`](crate::ResourceHelper):
//!
//! - [`ReqwestTransport`] talks to a real server (feature `reqwest-transport`).
//! - [`MockTransport`](crate::mock::MockTransport) replays canned responses in tests.
//!
//! Transports report non-2xx statuses and network failures as [`TransportError`];
//! whatever they return is forwarded to the caller unchanged.

use crate::error::TransportError;
use async_trait::async_trait;
use http::{HeaderMap, Method, StatusCode};
use url::Url;

/// A fully resolved outbound request. `url` is already proxy-rewritten.
#[derive(Debug, Clone, PartialEq)]
pub struct HalRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub params: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HalRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            params: Vec::new(),
            body: None,
        }
    }

    /// The URL with `params` form-encoded onto its query, exactly as it goes on the wire.
    pub fn full_url(&self) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.url)?;
        if !self.params.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.params);
        }
        Ok(url)
    }
}

/// What the transport got back: status, headers and the undecoded body.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// A `200 OK` carrying `body`.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, body)
    }

    pub fn no_content() -> Self {
        Self::new(StatusCode::NO_CONTENT, "")
    }
}

/// The seam between relation traversal and the HTTP client.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn perform(&self, request: HalRequest) -> Result<RawResponse, TransportError>;
}

#[cfg(feature = "reqwest-transport")]
pub use self::reqwest_impl::ReqwestTransport;

#[cfg(feature = "reqwest-transport")]
mod reqwest_impl {
    use super::*;
    use crate::config::HalConfig;
    use std::time::Duration;
    use tracing::{debug, warn};

    /// [`Transport`] backed by a `reqwest::Client`.
    #[derive(Clone, Default)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        /// Wraps an existing client.
        pub fn new(client: reqwest::Client) -> Self {
            Self { client }
        }

        pub fn from_config(config: &HalConfig) -> Result<Self, TransportError> {
            let client = reqwest::Client::builder()
                .timeout(Duration::from_millis(config.request_timeout_ms))
                .build()
                .map_err(|e| TransportError::Connection(Box::new(e)))?;
            Ok(Self { client })
        }
    }

    #[async_trait]
    impl Transport for ReqwestTransport {
        async fn perform(&self, request: HalRequest) -> Result<RawResponse, TransportError> {
            let url = request.full_url()?;
            debug!(method = %request.method, %url, "Sending request");
            let mut builder = self
                .client
                .request(request.method, url)
                .headers(request.headers);
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| TransportError::Connection(Box::new(e)))?;
            let status = response.status();
            let headers = response.headers().clone();
            let body = response
                .text()
                .await
                .map_err(|e| TransportError::Connection(Box::new(e)))?;

            if !status.is_success() {
                warn!(%status, "Request failed");
                return Err(TransportError::Status { status, body });
            }
            Ok(RawResponse {
                status,
                headers,
                body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> HalRequest {
        let mut request = HalRequest::new(Method::GET, "https://public.example/api/a");
        request.params = vec![
            ("size".into(), "10".into()),
            ("sort".into(), "name,ASC".into()),
            ("q".into(), "a b&c".into()),
        ];
        request
    }

    #[test]
    fn test_full_url_without_params() {
        let request = HalRequest::new(Method::GET, "https://public.example/api/a/1");
        assert_eq!(
            request.full_url().unwrap().as_str(),
            "https://public.example/api/a/1"
        );
    }

    #[test]
    fn test_full_url_form_encodes_params() {
        assert_eq!(
            listing().full_url().unwrap().as_str(),
            "https://public.example/api/a?size=10&sort=name%2CASC&q=a+b%26c"
        );
    }

    #[test]
    fn test_full_url_extends_existing_query() {
        let mut request = HalRequest::new(Method::GET, "https://public.example/api/a?x=1");
        request.params = vec![("size".into(), "5".into())];
        assert_eq!(
            request.full_url().unwrap().as_str(),
            "https://public.example/api/a?x=1&size=5"
        );
    }

    #[test]
    fn test_full_url_rejects_relative_href() {
        let request = HalRequest::new(Method::GET, "/api/a");
        assert!(request.full_url().is_err());
    }

    #[cfg(feature = "reqwest-transport")]
    #[tokio::test]
    async fn test_full_url_matches_reqwest_query() {
        let request = listing();
        let built = reqwest::Client::new()
            .request(request.method.clone(), &request.url)
            .query(&request.params)
            .build()
            .unwrap();
        assert_eq!(&request.full_url().unwrap(), built.url());
    }
}
