//! # Mock Transport & Testing Guide
//!
//! [`MockTransport`] implements the same [`Transport`] seam as the production
//! client but works entirely in memory. Queue the responses the "server" should
//! give, run relation operations against it, then inspect what was sent.
//!
//! ## When to use the Mock vs a Real Server
//!
//! | Feature | MockTransport | ReqwestTransport |
//! |---------|---------------|------------------|
//! | **Speed** | Instant (in-memory) | Network bound |
//! | **Determinism** | 100% Deterministic | Depends on the server |
//! | **Inspection** | Every request is recorded | None |
//! | **Error Injection** | Easy (`return_err`) | Hard |
//!
//! ## Example
//!
//! ```rust
//! use hal_resource::mock::MockTransport;
//! use hal_resource::{Link, Links, Relations, Resource, ResourceHelper, ResourceMeta, RawResponse};
//! use http::Method;
//!
//! struct Parent { meta: ResourceMeta }
//! impl Resource for Parent {
//!     fn meta(&self) -> &ResourceMeta { &self.meta }
//!     fn meta_mut(&mut self) -> &mut ResourceMeta { &mut self.meta }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect(Method::DELETE, "http://internal/api/a/1/owner")
//!         .return_ok(RawResponse::no_content());
//!
//!     let helper = ResourceHelper::new(mock.clone());
//!     let parent = Parent {
//!         meta: ResourceMeta::hydrated(Links::from_iter([
//!             ("owner", Link::new("http://internal/api/a/1/owner")),
//!         ])),
//!     };
//!
//!     parent.delete_relation(&helper, "owner").await.unwrap();
//!     assert_eq!(mock.request_count(), 1);
//!     mock.verify();
//! }
//! ```

use crate::error::TransportError;
use crate::transport::{HalRequest, RawResponse, Transport};
use async_trait::async_trait;
use http::Method;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Represents an expected request and the response to hand back for it.
struct Expectation {
    method: Method,
    url: String,
    response: Result<RawResponse, TransportError>,
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    requests: Vec<HalRequest>,
}

/// An in-memory transport with expectation tracking.
///
/// Clones share state, so a test can keep one handle while the
/// [`ResourceHelper`](crate::ResourceHelper) owns another.
///
/// # Panics
/// `perform` panics when a request arrives that does not match the next
/// expectation, or when no expectation is left.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Creates a new mock transport with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a request with `method` to `url` (proxied, without query string).
    pub fn expect(&self, method: Method, url: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            url: url.into(),
            state: self.state.clone(),
        }
    }

    /// Every request performed so far, in order.
    pub fn requests(&self) -> Vec<HalRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let state = self.state.lock().unwrap();
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn perform(&self, request: HalRequest) -> Result<RawResponse, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());
        let expectation = state.expectations.pop_front();
        drop(state);

        match expectation {
            Some(exp) if exp.method == request.method && exp.url == request.url => exp.response,
            Some(exp) => panic!(
                "Unexpected request {} {} (expected {} {})",
                request.method, request.url, exp.method, exp.url
            ),
            None => panic!("Unexpected request {} {}", request.method, request.url),
        }
    }
}

/// Builder returned by [`MockTransport::expect`].
pub struct ExpectationBuilder {
    method: Method,
    url: String,
    state: Arc<Mutex<MockState>>,
}

impl ExpectationBuilder {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, response: RawResponse) {
        self.push(Ok(response));
    }

    /// Shorthand for a `200 OK` with a JSON body.
    pub fn return_json(self, body: serde_json::Value) {
        self.push(Ok(RawResponse::ok(body.to_string())));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: TransportError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<RawResponse, TransportError>) {
        let mut state = self.state.lock().unwrap();
        state.expectations.push_back(Expectation {
            method: self.method,
            url: self.url,
            response,
        });
    }
}
