//! # Fibre Container
//!
//! Service-provider based dependency injection for Rust.
//!
//! Services are declared as *factories* (closures that build a service from a
//! container) and *extensions* (closures that decorate a previously built
//! service), grouped into providers. Providers are combined, and a
//! [`DelegatingContainer`] resolves services from them on demand.
//!
//! ## Core Concepts
//!
//! - **[`Container`]**: the two-method lookup contract, `get(key)` and `has(key)`.
//! - **[`ServiceProvider`]**: an immutable map of factories and a map of extensions.
//! - **[`CompositeCachingServiceProvider`]**: merges several providers. A later
//!   factory replaces an earlier one; extensions for the same key are chained,
//!   oldest first.
//! - **[`TaggingServiceProvider`]**: turns tags into services that resolve to
//!   the list of all tagged services.
//! - **[`DelegatingContainer`]**: runs factories and extensions, and reports
//!   circular dependencies with their full path.
//! - **Decorators**: [`AliasingContainer`], [`PrefixingContainer`],
//!   [`MaskingContainer`], [`CachingContainer`], [`CallbackContainer`],
//!   [`CompositeContainer`] and [`NoOpContainer`] reshape what a container exposes.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_container::{
//!   CompositeCachingServiceProvider, ContainerExt, DelegatingContainer, Provider,
//!   ServiceProvider,
//! };
//! use std::sync::Arc;
//!
//! struct Database {
//!   url: String,
//! }
//!
//! // A module providing defaults.
//! let core = ServiceProvider::builder()
//!   .value("db_url", String::from("sqlite::memory:"))
//!   .factory("db", |c| {
//!     let url = c.get_as::<String>("db_url")?;
//!     Ok(Database { url: (*url).clone() })
//!   })
//!   .build();
//!
//! // A later module overrides a factory and decorates another service.
//! let app = ServiceProvider::builder()
//!   .value("db_url", String::from("postgres://localhost/app"))
//!   .extension("db", |_, db: Arc<Database>| {
//!     Ok(Database { url: format!("{}?pool=4", db.url) })
//!   })
//!   .build();
//!
//! let providers: Vec<Arc<dyn Provider>> = vec![Arc::new(core), Arc::new(app)];
//! let container = DelegatingContainer::new(Arc::new(CompositeCachingServiceProvider::new(providers)));
//!
//! let db = container.get_as::<Database>("db").unwrap();
//! assert_eq!(db.url, "postgres://localhost/app?pool=4");
//! ```

mod composite;
mod container;
mod core;
mod decorators;
mod error;
mod macros;
mod provider;
mod tagging;

pub use crate::core::{
  extension_fn, factory_fn, Container, ContainerExt, Extension, ExtensionMap, Factory, FactoryMap,
  Service, TaggedServices,
};
pub use composite::CompositeCachingServiceProvider;
pub use container::DelegatingContainer;
pub use decorators::{
  AliasingContainer, CachingContainer, Callback, CallbackContainer, CompositeContainer,
  MaskingContainer, NoOpContainer, PrefixingContainer,
};
pub use error::{BoxError, ContainerError, Result};
pub use provider::{Provider, ServiceProvider, ServiceProviderBuilder};
pub use tagging::{ServiceTags, TaggingServiceProvider};
