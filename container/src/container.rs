//! The `DelegatingContainer`, which turns a provider into a working container.

use crate::core::{Container, ResolutionStack, Service};
use crate::error::{ContainerError, Result};
use crate::provider::Provider;
use std::sync::Arc;

/// Resolves services from a [`Provider`].
///
/// Every `get` runs the service's factory, then its extension if one is
/// registered. Both receive the *base container*: the parent container if one
/// was given, otherwise this container itself. A parent lets an outer container
/// (for example a [`CompositeContainer`](crate::CompositeContainer) of several
/// delegating containers) decide where nested lookups go.
///
/// Nothing is cached; each `get` creates a fresh instance. Wrap the container
/// in a [`CachingContainer`](crate::CachingContainer) for shared instances.
///
/// Circular dependencies are detected per thread and reported with the full
/// resolution path instead of overflowing the stack. The path includes keys
/// requested from other delegating containers on the way, so a cycle running
/// through a shared parent reads `a -> b -> a`.
pub struct DelegatingContainer {
  provider: Arc<dyn Provider>,
  parent: Option<Arc<dyn Container>>,
  resolving: ResolutionStack,
}

impl DelegatingContainer {
  /// Creates a standalone container; factories receive the container itself.
  pub fn new(provider: Arc<dyn Provider>) -> Self {
    Self {
      provider,
      parent: None,
      resolving: ResolutionStack::new(),
    }
  }

  /// Creates a container whose factories receive `parent` instead of itself.
  pub fn with_parent(provider: Arc<dyn Provider>, parent: Arc<dyn Container>) -> Self {
    Self {
      provider,
      parent: Some(parent),
      resolving: ResolutionStack::new(),
    }
  }

  pub fn provider(&self) -> &Arc<dyn Provider> {
    &self.provider
  }

  // --- PRIVATE HELPERS ---

  fn base_container(&self) -> &dyn Container {
    match &self.parent {
      Some(parent) => parent.as_ref(),
      None => self,
    }
  }

  fn resolve(&self, key: &str) -> Result<Service> {
    let factory = self
      .provider
      .factories()
      .get(key)
      .ok_or_else(|| ContainerError::not_found(key))?;

    let base = self.base_container();

    let service = factory(base).map_err(|e| ContainerError::Create {
      key: key.to_owned(),
      source: Box::new(e),
    })?;

    match self.provider.extensions().get(key) {
      Some(extension) => extension(base, service).map_err(|e| ContainerError::Extend {
        key: key.to_owned(),
        source: Box::new(e),
      }),
      None => Ok(service),
    }
  }
}

impl Container for DelegatingContainer {
  fn get(&self, key: &str) -> Result<Service> {
    // Held for the whole resolution. Dropping it takes the key off the stack on
    // every path out of this function, errors included.
    let _guard = self.resolving.enter(key)?;
    self.resolve(key)
  }

  fn has(&self, key: &str) -> bool {
    self.provider.factories().contains_key(key)
  }
}
