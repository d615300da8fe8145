//! # Resource Trait
//!
//! The `Resource` trait is the contract every HAL domain entity implements so that
//! relation traversal can be written *once* and reused for all of them. An entity
//! embeds a [`ResourceMeta`] (usually as a `#[serde(skip)]` field) and exposes it
//! through [`Resource::meta`] and [`Resource::meta_mut`].
//!
//! # Hydration
//! [`Hydratable`] is the capability of being built from a server representation.
//! The concrete type is chosen by the caller through a type parameter
//! (`get_relation::<Child>(..)`), so no default construction or reflection is involved.
//!
//! ```rust
//! use hal_resource::{Hydratable, Resource, ResourceMeta};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Default, Deserialize)]
//! struct Child {
//!     name: String,
//!     #[serde(skip)]
//!     meta: ResourceMeta,
//! }
//!
//! impl Resource for Child {
//!     fn meta(&self) -> &ResourceMeta { &self.meta }
//!     fn meta_mut(&mut self) -> &mut ResourceMeta { &mut self.meta }
//! }
//!
//! impl Hydratable for Child {}
//!
//! let child = Child::default();
//! assert!(!child.is_hydrated());
//! ```

use crate::link::{Link, LinkState, Links};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Hypermedia state carried by every resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceMeta {
    /// Base URL requests are redirected to. Empty means no rewriting.
    pub proxy_url: String,
    /// Root the server uses in the hrefs it reports.
    pub root_url: String,
    pub links: LinkState,
    /// Discriminators recorded by the hydration layer, outermost first.
    pub subtypes: Vec<String>,
}

impl ResourceMeta {
    /// Metadata for a resource hydrated with the given link map.
    pub fn hydrated(links: Links) -> Self {
        Self {
            links: LinkState::Hydrated(links),
            ..Self::default()
        }
    }
}

/// Trait that any HAL entity must implement to take part in relation traversal.
pub trait Resource: Send + Sync {
    fn meta(&self) -> &ResourceMeta;

    fn meta_mut(&mut self) -> &mut ResourceMeta;

    /// The link map, or `None` while the resource is purely local.
    fn links(&self) -> Option<&Links> {
        self.meta().links.links()
    }

    fn is_hydrated(&self) -> bool {
        self.meta().links.is_hydrated()
    }

    fn link(&self, relation: &str) -> Option<&Link> {
        self.links()?.get(relation)
    }

    /// The canonical `self` href used to bind this resource by reference.
    fn self_href(&self) -> Option<String> {
        self.link("self").map(Link::target)
    }

    fn subtypes(&self) -> &[String] {
        &self.meta().subtypes
    }

    fn set_subtypes(&mut self, subtypes: Vec<String>) {
        self.meta_mut().subtypes = subtypes;
    }
}

/// A [`Resource`] that can be built from a HAL representation.
///
/// The provided implementation deserializes the representation with serde.
/// Polymorphic resources override [`Hydratable::from_embedded`] to pick a variant
/// from the `_embedded` key an item was listed under.
pub trait Hydratable: Resource + DeserializeOwned + Sized {
    fn from_representation(representation: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(representation)
    }

    fn from_embedded(_key: &str, representation: Value) -> Result<Self, serde_json::Error> {
        Self::from_representation(representation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    struct Child {
        #[serde(default)]
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

    #[test]
    fn test_local_resource_has_no_links() {
        let child = Child::default();
        assert!(!child.is_hydrated());
        assert!(child.links().is_none());
        assert!(child.self_href().is_none());
        assert!(child.name.is_empty());
    }

    #[test]
    fn test_self_href_reads_self_link() {
        let child = Child {
            name: "x".into(),
            meta: ResourceMeta::hydrated(Links::from_iter([(
                "self",
                Link::new("http://internal/api/children/42"),
            )])),
        };
        assert_eq!(
            child.self_href().as_deref(),
            Some("http://internal/api/children/42")
        );
        assert!(child.link("parent").is_none());
    }

    #[test]
    fn test_subtypes_round_trip() {
        let mut child = Child::default();
        child.set_subtypes(vec!["cats".into()]);
        assert_eq!(child.subtypes(), ["cats".to_string()]);
    }
}
