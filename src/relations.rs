//! # Relation Traversal
//!
//! The [`Relations`] trait adds relation operations to every [`Resource`]:
//!
//! | Method | HTTP | Effect |
//! |--------|------|--------|
//! | [`get_relation`](Relations::get_relation) | GET | Fetch one related resource |
//! | [`get_relation_array`](Relations::get_relation_array) | GET | Fetch a related collection |
//! | [`get_relation_page`](Relations::get_relation_page) | GET | Same, keeping page metadata |
//! | [`add_relation`](Relations::add_relation) | POST | Append a binding |
//! | [`update_relation`](Relations::update_relation) | PATCH | Merge a binding in |
//! | [`substitute_relation`](Relations::substitute_relation) | PUT | Replace all bindings |
//! | [`delete_relation`](Relations::delete_relation) | DELETE | Remove the binding |
//!
//! Every method is an `async fn`: nothing is resolved or sent until the returned
//! future is awaited, and dropping it early drops the in-flight request.
//!
//! Reading an unhydrated resource is a no-op (`None` / empty). Mutating one fails
//! with [`HalError::NoRelationBound`] before any request is made.

use crate::collection::ResourceArray;
use crate::error::HalError;
use crate::helper::ResourceHelper;
use crate::link::Links;
use crate::options::HalOptions;
use crate::resource::{Hydratable, Resource};
use crate::transport::RawResponse;
use async_trait::async_trait;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::Method;
use tracing::{debug, warn};

/// Media type for binding resources by reference.
pub const URI_LIST: &str = "text/uri-list";

/// Relation operations, available on every [`Resource`] through a blanket impl.
#[async_trait]
pub trait Relations: Resource {
    /// Fetch the single resource behind `relation`.
    ///
    /// Returns `Ok(None)` without a request when `self` is not hydrated.
    #[tracing::instrument(skip(self, helper))]
    async fn get_relation<T: Hydratable>(
        &self,
        helper: &ResourceHelper,
        relation: &str,
    ) -> Result<Option<T>, HalError> {
        let Some(links) = self.links() else {
            debug!("Resource not hydrated, skipping");
            return Ok(None);
        };
        let href = resolve(links, relation)?;
        let request = helper.request(Method::GET, helper.proxy_for(self.meta(), &href));
        let raw = helper.perform(request).await?;
        helper.hydrate_resource(&raw).map(Some)
    }

    /// Fetch the collection behind `relation`, dropping page metadata.
    #[tracing::instrument(skip(self, helper))]
    async fn get_relation_array<T: Hydratable>(
        &self,
        helper: &ResourceHelper,
        relation: &str,
        options: Option<&HalOptions>,
    ) -> Result<Vec<T>, HalError> {
        let page: ResourceArray<T> = self.get_relation_page(helper, relation, options).await?;
        Ok(page.into_result())
    }

    /// Fetch one page of the collection behind `relation`.
    ///
    /// Returns an empty page without a request when `self` is not hydrated.
    #[tracing::instrument(skip(self, helper))]
    async fn get_relation_page<T: Hydratable>(
        &self,
        helper: &ResourceHelper,
        relation: &str,
        options: Option<&HalOptions>,
    ) -> Result<ResourceArray<T>, HalError> {
        let seed = ResourceArray::new();
        let Some(links) = self.links() else {
            debug!("Resource not hydrated, skipping");
            return Ok(seed);
        };
        let href = resolve(links, relation)?;
        let mut request = helper.request(Method::GET, helper.proxy_for(self.meta(), &href));
        request.params = ResourceHelper::option_params(options);
        let raw = helper.perform(request).await?;
        helper.hydrate_collection(&raw, seed)
    }

    /// POST `resource`'s self link to `relation`, appending it to the bindings.
    #[tracing::instrument(skip(self, helper, resource))]
    async fn add_relation<R: Resource>(
        &self,
        helper: &ResourceHelper,
        relation: &str,
        resource: &R,
    ) -> Result<RawResponse, HalError> {
        let body = resource.self_href().ok_or(HalError::SelfLinkMissing);
        bind(self, helper, Method::POST, relation, Some(body)).await
    }

    /// PATCH `resource`'s self link into `relation` without clearing other bindings.
    #[tracing::instrument(skip(self, helper, resource))]
    async fn update_relation<R: Resource>(
        &self,
        helper: &ResourceHelper,
        relation: &str,
        resource: &R,
    ) -> Result<RawResponse, HalError> {
        let body = resource.self_href().ok_or(HalError::SelfLinkMissing);
        bind(self, helper, Method::PATCH, relation, Some(body)).await
    }

    /// PUT `resource`'s self link to `relation`, replacing every existing binding.
    #[tracing::instrument(skip(self, helper, resource))]
    async fn substitute_relation<R: Resource>(
        &self,
        helper: &ResourceHelper,
        relation: &str,
        resource: &R,
    ) -> Result<RawResponse, HalError> {
        let body = resource.self_href().ok_or(HalError::SelfLinkMissing);
        bind(self, helper, Method::PUT, relation, Some(body)).await
    }

    /// DELETE the binding for `relation`.
    #[tracing::instrument(skip(self, helper))]
    async fn delete_relation(
        &self,
        helper: &ResourceHelper,
        relation: &str,
    ) -> Result<RawResponse, HalError> {
        bind(self, helper, Method::DELETE, relation, None).await
    }
}

impl<R: Resource> Relations for R {}

fn resolve(links: &Links, relation: &str) -> Result<String, HalError> {
    match links.get(relation) {
        Some(link) => Ok(link.target()),
        None => {
            warn!(relation, "Link not found");
            Err(HalError::LinkNotFound {
                relation: relation.to_string(),
            })
        }
    }
}

/// Shared body of the mutation operations.
///
/// The link map's presence is checked before anything else, including the body.
/// Every mutation is sent as `text/uri-list`; DELETE just carries no body.
async fn bind<S: Resource + ?Sized>(
    source: &S,
    helper: &ResourceHelper,
    method: Method,
    relation: &str,
    body: Option<Result<String, HalError>>,
) -> Result<RawResponse, HalError> {
    let Some(links) = source.links() else {
        warn!(%method, relation, "No link map bound");
        return Err(HalError::NoRelationBound);
    };
    let body = body.transpose()?;
    let href = resolve(links, relation)?;

    let mut request = helper.request(method, helper.proxy_for(source.meta(), &href));
    request
        .headers
        .insert(CONTENT_TYPE, HeaderValue::from_static(URI_LIST));
    request.body = body;
    helper.perform(request).await
}
