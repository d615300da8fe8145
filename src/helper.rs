//! # Resource Helper
//!
//! `ResourceHelper` is everything relation traversal needs from the outside world:
//!
//! - **Proxy rewrite**: maps a server-reported href rooted at `root_url` onto `proxy_url`.
//! - **Query options**: turns [`HalOptions`] into query parameters.
//! - **Hydration**: builds typed resources and [`ResourceArray`]s from raw responses.
//! - **Dispatch**: stamps default headers on a request and hands it to the [`Transport`].
//!
//! The helper is cheap to clone; the transport is shared behind an `Arc`.

use crate::collection::{ResourceArray, DEFAULT_PAGE_SIZE, EMBEDDED_KEY};
use crate::config::{HalConfig, HAL_JSON};
use crate::error::{ConfigError, HalError};
use crate::link::{LinkState, Links};
use crate::options::HalOptions;
use crate::resource::{Hydratable, ResourceMeta};
use crate::transport::{HalRequest, RawResponse, Transport};
use http::header::{HeaderValue, ACCEPT};
use http::{HeaderMap, Method};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

const LINKS_KEY: &str = "_links";

#[derive(Clone)]
pub struct ResourceHelper {
    transport: Arc<dyn Transport>,
    root_url: String,
    proxy_url: String,
    headers: HeaderMap,
}

impl ResourceHelper {
    /// A helper with no proxy rewriting that asks for `application/hal+json`.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self::with_transport(Arc::new(transport))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(HAL_JSON));
        Self {
            transport,
            root_url: String::new(),
            proxy_url: String::new(),
            headers,
        }
    }

    /// # Errors
    ///
    /// Returns an error if a configured header is invalid.
    pub fn from_config(
        config: &HalConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            transport,
            root_url: config.root_url.clone(),
            proxy_url: config.proxy_url.clone(),
            headers: config.header_map()?,
        })
    }

    pub fn with_proxy(mut self, root_url: impl Into<String>, proxy_url: impl Into<String>) -> Self {
        self.root_url = root_url.into();
        self.proxy_url = proxy_url.into();
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    pub fn proxy_url(&self) -> &str {
        &self.proxy_url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    // -------------------------------------------------------------------------
    // Proxy rewrite
    // -------------------------------------------------------------------------

    /// Rewrites `href` through this helper's proxy rule.
    pub fn proxy(&self, href: &str) -> String {
        rewrite(&self.root_url, &self.proxy_url, href)
    }

    /// Rewrites `href` with the rule stamped on `meta`, falling back to the helper's own.
    pub fn proxy_for(&self, meta: &ResourceMeta, href: &str) -> String {
        if meta.proxy_url.is_empty() {
            self.proxy(href)
        } else {
            rewrite(&meta.root_url, &meta.proxy_url, href)
        }
    }

    // -------------------------------------------------------------------------
    // Query options
    // -------------------------------------------------------------------------

    /// Serializes options as `params...`, `size`, then one `sort` per criterion.
    pub fn option_params(options: Option<&HalOptions>) -> Vec<(String, String)> {
        let Some(options) = options else {
            return Vec::new();
        };
        let mut params = options.params.clone();
        if let Some(size) = options.size {
            params.push(("size".to_string(), size.to_string()));
        }
        params.extend(
            options
                .sort
                .iter()
                .map(|sort| ("sort".to_string(), sort.to_param())),
        );
        params
    }

    // -------------------------------------------------------------------------
    // Hydration
    // -------------------------------------------------------------------------

    /// Builds a `T` from a single-resource response.
    pub fn hydrate_resource<T: Hydratable>(&self, raw: &RawResponse) -> Result<T, HalError> {
        let value: Value = serde_json::from_str(&raw.body)?;
        self.hydrate_value(None, value)
    }

    /// Appends every embedded item of a collection response to `seed`, then fills
    /// in page metadata and navigation links.
    pub fn hydrate_collection<T: Hydratable>(
        &self,
        raw: &RawResponse,
        mut seed: ResourceArray<T>,
    ) -> Result<ResourceArray<T>, HalError> {
        let mut payload: Map<String, Value> = serde_json::from_str(&raw.body)?;

        if let Some(Value::Object(embedded)) = payload.remove(EMBEDDED_KEY) {
            for (key, items) in embedded {
                let items = match items {
                    Value::Array(items) => items,
                    single => vec![single],
                };
                for item in items {
                    seed.push(self.hydrate_value(Some(&key), item)?);
                }
            }
        }

        match payload.get("page") {
            Some(page) => {
                let field = |name: &str| page.get(name).and_then(Value::as_u64);
                seed.total_elements = field("totalElements").unwrap_or(seed.len() as u64);
                seed.total_pages = field("totalPages").unwrap_or(1);
                seed.page_number = field("number").unwrap_or(1);
                seed.page_size = field("size").unwrap_or(DEFAULT_PAGE_SIZE);
            }
            None => seed.total_elements = seed.len() as u64,
        }

        if let Some(links) = payload.remove(LINKS_KEY) {
            let links: Links = serde_json::from_value(links)?;
            let target = |rel: &str| links.get(rel).map(|link| link.target());
            seed.self_uri = target("self");
            seed.next_uri = target("next");
            seed.prev_uri = target("prev");
            seed.first_uri = target("first");
            seed.last_uri = target("last");
        }

        debug!(items = seed.len(), total = seed.total_elements, "Hydrated collection");
        Ok(seed)
    }

    fn hydrate_value<T: Hydratable>(&self, key: Option<&str>, mut value: Value) -> Result<T, HalError> {
        let links = match value.as_object_mut().and_then(|obj| obj.remove(LINKS_KEY)) {
            Some(links) => serde_json::from_value(links)?,
            None => Links::new(),
        };
        let mut resource = match key {
            Some(key) => T::from_embedded(key, value)?,
            None => T::from_representation(value)?,
        };
        let meta = resource.meta_mut();
        meta.links = LinkState::Hydrated(links);
        meta.root_url = self.root_url.clone();
        meta.proxy_url = self.proxy_url.clone();
        if let Some(key) = key {
            meta.subtypes.push(key.to_string());
        }
        Ok(resource)
    }

    // -------------------------------------------------------------------------
    // Dispatch
    // -------------------------------------------------------------------------

    /// A request to `url` carrying the default headers.
    pub fn request(&self, method: Method, url: impl Into<String>) -> HalRequest {
        let mut request = HalRequest::new(method, url);
        request.headers = self.headers.clone();
        request
    }

    pub async fn perform(&self, request: HalRequest) -> Result<RawResponse, HalError> {
        debug!(method = %request.method, url = %request.url, params = request.params.len(), "Dispatch");
        self.transport.perform(request).await.map_err(|e| {
            warn!(error = %e, "Transport failed");
            HalError::from(e)
        })
    }
}

impl std::fmt::Debug for ResourceHelper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceHelper")
            .field("root_url", &self.root_url)
            .field("proxy_url", &self.proxy_url)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Hrefs not rooted at `root_url` are left alone, as is everything when either side is unset.
///
/// The root only matches on a boundary: `http://internal` covers `http://internal/x`
/// but not `http://internal2/x`.
fn rewrite(root_url: &str, proxy_url: &str, href: &str) -> String {
    if root_url.is_empty() || proxy_url.is_empty() {
        return href.to_string();
    }
    match href.strip_prefix(root_url) {
        Some(rest) if is_boundary(root_url, rest) => format!("{}{}", proxy_url, rest),
        _ => href.to_string(),
    }
}

fn is_boundary(root_url: &str, rest: &str) -> bool {
    root_url.ends_with('/') || rest.is_empty() || rest.starts_with(['/', '?', '#'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use crate::options::Sort;
    use crate::resource::Resource;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    struct Child {
        name: String,
        #[serde(skip)]
        meta: ResourceMeta,
    }

    impl Resource for Child {
        fn meta(&self) -> &ResourceMeta {
            &self.meta
        }
        fn meta_mut(&mut self) -> &mut ResourceMeta {
            &mut self.meta
        }
    }

    impl Hydratable for Child {}

    fn helper() -> ResourceHelper {
        ResourceHelper::new(MockTransport::new()).with_proxy("http://internal", "https://public.example")
    }

    #[test]
    fn test_proxy_rewrites_root() {
        assert_eq!(
            helper().proxy("http://internal/api/a/1/children"),
            "https://public.example/api/a/1/children"
        );
    }

    #[test]
    fn test_proxy_leaves_foreign_hrefs() {
        assert_eq!(
            helper().proxy("http://elsewhere/api/a/1"),
            "http://elsewhere/api/a/1"
        );
    }

    #[test]
    fn test_proxy_respects_host_boundary() {
        let helper = helper();
        assert_eq!(helper.proxy("http://internal2/api/x"), "http://internal2/api/x");
        assert_eq!(
            helper.proxy("http://internal.evil/api/x"),
            "http://internal.evil/api/x"
        );
        assert_eq!(helper.proxy("http://internal"), "https://public.example");
        assert_eq!(
            helper.proxy("http://internal?page=1"),
            "https://public.example?page=1"
        );
    }

    #[test]
    fn test_proxy_root_with_trailing_slash() {
        let helper = ResourceHelper::new(MockTransport::new())
            .with_proxy("http://internal/api/", "https://public.example/v1/");
        assert_eq!(
            helper.proxy("http://internal/api/children"),
            "https://public.example/v1/children"
        );
        assert_eq!(helper.proxy("http://internal/apix"), "http://internal/apix");
    }

    #[test]
    fn test_proxy_disabled_without_proxy_url() {
        let helper = ResourceHelper::new(MockTransport::new());
        assert_eq!(helper.proxy("http://internal/api"), "http://internal/api");
    }

    #[test]
    fn test_proxy_for_prefers_resource_rule() {
        let meta = ResourceMeta {
            root_url: "http://other".into(),
            proxy_url: "https://other.example".into(),
            ..ResourceMeta::default()
        };
        assert_eq!(
            helper().proxy_for(&meta, "http://other/x"),
            "https://other.example/x"
        );
        assert_eq!(
            helper().proxy_for(&ResourceMeta::default(), "http://internal/x"),
            "https://public.example/x"
        );
    }

    #[test]
    fn test_option_params_order() {
        let options = HalOptions::new()
            .with_sort(Sort::asc("name"))
            .with_sort(Sort::desc("age"))
            .with_size(10)
            .with_param("projection", "summary");
        let params = ResourceHelper::option_params(Some(&options));
        assert_eq!(
            params,
            vec![
                ("projection".to_string(), "summary".to_string()),
                ("size".to_string(), "10".to_string()),
                ("sort".to_string(), "name,ASC".to_string()),
                ("sort".to_string(), "age,DESC".to_string()),
            ]
        );
        assert!(ResourceHelper::option_params(None).is_empty());
        assert!(ResourceHelper::option_params(Some(&HalOptions::new())).is_empty());
    }

    #[test]
    fn test_hydrate_resource_fills_links() {
        let raw = RawResponse::ok(
            json!({
                "name": "first",
                "_links": {
                    "self": { "href": "http://internal/api/children/1" },
                    "parent": { "href": "http://internal/api/a/1" }
                }
            })
            .to_string(),
        );
        let child: Child = helper().hydrate_resource(&raw).unwrap();
        assert_eq!(child.name, "first");
        assert!(child.is_hydrated());
        assert_eq!(child.links().unwrap().len(), 2);
        assert_eq!(child.meta.proxy_url, "https://public.example");
        assert_eq!(child.meta.root_url, "http://internal");
        assert!(child.subtypes().is_empty());
    }

    #[test]
    fn test_hydrate_resource_without_links_is_hydrated_empty() {
        let raw = RawResponse::ok(r#"{"name":"bare"}"#);
        let child: Child = helper().hydrate_resource(&raw).unwrap();
        assert!(child.is_hydrated());
        assert!(child.links().unwrap().is_empty());
    }

    #[test]
    fn test_hydrate_resource_rejects_bad_body() {
        let raw = RawResponse::ok("not json");
        let result: Result<Child, _> = helper().hydrate_resource(&raw);
        assert!(matches!(result, Err(HalError::Hydration(_))));
    }

    #[test]
    fn test_hydrate_collection_reads_page_and_links() {
        let raw = RawResponse::ok(
            json!({
                "_embedded": {
                    "children": [
                        { "name": "a", "_links": { "self": { "href": "http://internal/api/children/1" } } },
                        { "name": "b", "_links": { "self": { "href": "http://internal/api/children/2" } } }
                    ]
                },
                "_links": {
                    "self": { "href": "http://internal/api/children{?page,size,sort}", "templated": true },
                    "next": { "href": "http://internal/api/children?page=1&size=2" }
                },
                "page": { "size": 2, "totalElements": 5, "totalPages": 3, "number": 0 }
            })
            .to_string(),
        );
        let page: ResourceArray<Child> = helper()
            .hydrate_collection(&raw, ResourceArray::new())
            .unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page.result[0].name, "a");
        assert_eq!(page.result[1].name, "b");
        assert_eq!(page.result[1].subtypes(), ["children".to_string()]);
        assert_eq!(
            page.result[1].self_href().as_deref(),
            Some("http://internal/api/children/2")
        );
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page_number, 0);
        assert_eq!(page.page_size, 2);
        assert_eq!(page.self_uri.as_deref(), Some("http://internal/api/children"));
        assert!(page.has_next());
        assert!(!page.has_prev());
    }

    #[test]
    fn test_hydrate_collection_defaults_without_page() {
        let raw = RawResponse::ok(
            json!({ "_embedded": { "children": [ { "name": "only" } ] } }).to_string(),
        );
        let page: ResourceArray<Child> = helper()
            .hydrate_collection(&raw, ResourceArray::new())
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page_number, 1);
        assert_eq!(page.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_hydrate_collection_without_embedded_is_empty() {
        let raw = RawResponse::ok("{}");
        let page: ResourceArray<Child> = helper()
            .hydrate_collection(&raw, ResourceArray::new())
            .unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_elements, 0);
    }

    #[test]
    fn test_from_config_uses_rule_and_headers() {
        let mut config = HalConfig::new("http://internal", "https://public.example");
        config.headers.insert("X-Tenant".into(), "acme".into());
        let helper = ResourceHelper::from_config(&config, Arc::new(MockTransport::new())).unwrap();

        assert_eq!(helper.proxy("http://internal/x"), "https://public.example/x");
        assert_eq!(helper.headers().get("x-tenant").unwrap(), "acme");
        assert_eq!(helper.headers().get(ACCEPT).unwrap(), HAL_JSON);
    }

    #[test]
    fn test_request_carries_default_headers() {
        let request = helper().request(Method::GET, "https://public.example/api");
        assert_eq!(request.headers.get(ACCEPT).unwrap(), HAL_JSON);
        assert!(request.body.is_none());
    }
}
