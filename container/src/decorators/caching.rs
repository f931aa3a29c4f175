use crate::core::{Container, Service};
use crate::error::{ContainerError, Result};
use dashmap::DashMap;
use std::sync::Arc;

/// Remembers every value retrieved from an inner container.
///
/// The first successful `get` for a key is stored and handed out on every
/// later call. Failures are not cached.
pub struct CachingContainer {
  inner: Arc<dyn Container>,
  cache: DashMap<String, Service>,
}

impl CachingContainer {
  pub fn new(inner: Arc<dyn Container>) -> Self {
    Self {
      inner,
      cache: DashMap::new(),
    }
  }

  pub fn is_cached(&self, key: &str) -> bool {
    self.cache.contains_key(key)
  }
}

impl Container for CachingContainer {
  fn get(&self, key: &str) -> Result<Service> {
    if let Some(service) = self.cache.get(key) {
      return Ok(service.value().clone());
    }

    // The inner lookup runs without holding any shard lock: it may call back
    // into this container for its own dependencies.
    let service = self.inner.get(key).map_err(|e| match e {
      e @ ContainerError::CircularDependency { .. } => e,
      e if e.is_not_found() => ContainerError::NotFound {
        key: key.to_owned(),
        source: Some(Box::new(e)),
      },
      e => ContainerError::Inner {
        key: key.to_owned(),
        source: Box::new(e),
      },
    })?;

    // Two threads may race on a cold key; the first value stored wins.
    let stored = self.cache.entry(key.to_owned()).or_insert(service).value().clone();
    tracing::debug!(key, "cached service");
    Ok(stored)
  }

  fn has(&self, key: &str) -> bool {
    self.is_cached(key) || self.inner.has(key)
  }
}
