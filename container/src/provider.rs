//! The provider capability and its plain map-backed implementation.

use crate::core::{Container, Extension, ExtensionMap, Factory, FactoryMap, Service};
use crate::error::Result;
use crate::tagging::{ServiceTags, TaggingServiceProvider};
use std::any::Any;
use std::sync::Arc;

/// Something that can hand out service factories and extensions.
pub trait Provider: Send + Sync {
  fn factories(&self) -> &FactoryMap;
  fn extensions(&self) -> &ExtensionMap;
}

impl<P: Provider + ?Sized> Provider for Arc<P> {
  fn factories(&self) -> &FactoryMap {
    (**self).factories()
  }
  fn extensions(&self) -> &ExtensionMap {
    (**self).extensions()
  }
}

impl<P: Provider + ?Sized> Provider for Box<P> {
  fn factories(&self) -> &FactoryMap {
    (**self).factories()
  }
  fn extensions(&self) -> &ExtensionMap {
    (**self).extensions()
  }
}

/// An immutable holder of factories and extensions.
#[derive(Clone, Default)]
pub struct ServiceProvider {
  factories: FactoryMap,
  extensions: ExtensionMap,
}

impl ServiceProvider {
  pub fn new(factories: FactoryMap, extensions: ExtensionMap) -> Self {
    Self {
      factories,
      extensions,
    }
  }

  pub fn builder() -> ServiceProviderBuilder {
    ServiceProviderBuilder::default()
  }
}

impl Provider for ServiceProvider {
  fn factories(&self) -> &FactoryMap {
    &self.factories
  }

  fn extensions(&self) -> &ExtensionMap {
    &self.extensions
  }
}

/// Collects definitions for a [`ServiceProvider`] in declaration order.
///
/// Registering the same key twice replaces the earlier definition but keeps
/// its original position.
#[derive(Default)]
pub struct ServiceProviderBuilder {
  factories: FactoryMap,
  extensions: ExtensionMap,
  tags: ServiceTags,
}

impl ServiceProviderBuilder {
  /// Registers a factory producing `T`.
  pub fn factory<T, F>(self, key: &str, f: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(&dyn Container) -> Result<T> + Send + Sync + 'static,
  {
    self.raw_factory(key, crate::core::factory_fn(f))
  }

  /// Registers a factory that hands out a pre-built value.
  pub fn value<T: Any + Send + Sync>(self, key: &str, value: T) -> Self {
    let value: Service = Arc::new(value);
    self.raw_factory(key, Arc::new(move |_: &dyn Container| Ok(value.clone())))
  }

  pub fn raw_factory(mut self, key: &str, factory: Factory) -> Self {
    self.factories.insert(key.to_owned(), factory);
    self
  }

  /// Registers an extension taking the previous `T` and producing a `U`.
  pub fn extension<T, U, F>(self, key: &str, f: F) -> Self
  where
    T: Any + Send + Sync,
    U: Any + Send + Sync,
    F: Fn(&dyn Container, Arc<T>) -> Result<U> + Send + Sync + 'static,
  {
    let extension = crate::core::extension_fn(key, f);
    self.raw_extension(key, extension)
  }

  pub fn raw_extension(mut self, key: &str, extension: Extension) -> Self {
    self.extensions.insert(key.to_owned(), extension);
    self
  }

  /// Tags the service registered under `key`.
  pub fn tag(mut self, key: &str, tag: &str) -> Self {
    self.tags = self.tags.with_tag(key, tag);
    self
  }

  /// Builds a plain provider. Tags collected so far are ignored.
  pub fn build(self) -> ServiceProvider {
    if !self.tags.is_empty() {
      tracing::warn!(
        services = self.tags.len(),
        "tags were declared but the provider was built without tag indexing"
      );
    }
    ServiceProvider::new(self.factories, self.extensions)
  }

  /// Builds a provider that also exposes a service per declared tag.
  pub fn build_tagged(self) -> Result<TaggingServiceProvider> {
    let inner = ServiceProvider::new(self.factories, self.extensions);
    TaggingServiceProvider::new(&inner, self.tags)
  }
}
