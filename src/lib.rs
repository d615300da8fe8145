//! # HAL Resource
//!
//! > **Typed relation traversal for HAL hypermedia APIs.**
//!
//! A HAL resource carries a `_links` map of relation name to href. This crate lets a
//! caller follow those relations to fetch related resources or collections, and
//! rebind them on the server (POST append, PATCH merge, PUT replace, DELETE unlink).
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Contract ([`resource`], [`link`])
//! - [`Resource`]: implemented by every domain entity; exposes its [`ResourceMeta`].
//! - [`Hydratable`]: the capability of being built from a server representation.
//! - [`LinkState`]: `Unhydrated` for local objects, `Hydrated(links)` after a fetch.
//!
//! ### 2. The Operations ([`relations`])
//! [`Relations`] is implemented for every `Resource` and provides `get_relation`,
//! `get_relation_array`, `add_relation`, `update_relation`, `substitute_relation`
//! and `delete_relation`.
//!
//! ### 3. The Plumbing ([`helper`], [`transport`], [`config`])
//! - [`ResourceHelper`]: proxy rewrite, query options, hydration, dispatch.
//! - [`Transport`]: the HTTP seam; [`ReqwestTransport`] is the production client.
//! - [`HalConfig`]: root/proxy URLs, default headers, timeout.
//!
//! ### 4. Testing ([`mock`])
//! [`MockTransport`](mock::MockTransport) records requests and replays canned responses.
//!
//! ## 🚀 Quick Start
//!
//! ```rust,no_run
//! use hal_resource::{HalConfig, HalOptions, Hydratable, Relations, Resource, ResourceHelper, ResourceMeta, ReqwestTransport};
//! use serde::Deserialize;
//! use std::sync::Arc;
//!
//! #[derive(Debug, Deserialize)]
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
//! impl Hydratable for Child {}
//!
//! # async fn run(parent: Child) -> Result<(), Box<dyn std::error::Error>> {
//! let config = HalConfig::new("http://internal", "https://public.example");
//! let transport = Arc::new(ReqwestTransport::from_config(&config)?);
//! let helper = ResourceHelper::from_config(&config, transport)?;
//!
//! let options = HalOptions::new().with_size(10);
//! let children: Vec<Child> = parent
//!     .get_relation_array(&helper, "children", Some(&options))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! RUST_LOG=debug cargo test
//! ```

pub mod collection;
pub mod config;
pub mod error;
pub mod helper;
pub mod link;
pub mod mock;
pub mod options;
pub mod relations;
pub mod resource;
pub mod tracing;
pub mod transport;

// Re-export core types for convenience
pub use collection::ResourceArray;
pub use config::HalConfig;
pub use error::{ConfigError, HalError, TransportError};
pub use helper::ResourceHelper;
pub use link::{Link, LinkState, Links};
pub use options::{HalOptions, Sort, SortOrder};
pub use relations::Relations;
pub use resource::{Hydratable, Resource, ResourceMeta};
#[cfg(feature = "reqwest-transport")]
pub use transport::ReqwestTransport;
pub use transport::{HalRequest, RawResponse, Transport};
