use crate::core::{Container, Service};
use crate::error::{ContainerError, Result};
use std::sync::Arc;

/// Exposes the keys of an inner container behind a prefix.
///
/// `get("app.db")` on a container prefixed with `"app."` looks up `"db"` in
/// the inner container. In strict mode, keys without the prefix are not found.
/// In non-strict mode they are looked up as-is, and a prefixed key whose
/// stripped form is missing falls back to the full key.
pub struct PrefixingContainer {
  inner: Arc<dyn Container>,
  prefix: String,
  strict: bool,
}

impl PrefixingContainer {
  pub fn new(inner: Arc<dyn Container>, prefix: impl Into<String>) -> Self {
    Self::with_strictness(inner, prefix, true)
  }

  pub fn with_strictness(inner: Arc<dyn Container>, prefix: impl Into<String>, strict: bool) -> Self {
    Self {
      inner,
      prefix: prefix.into(),
      strict,
    }
  }

  fn is_prefixed(&self, key: &str) -> bool {
    !self.prefix.is_empty() && key.starts_with(&self.prefix)
  }

  fn unprefix<'a>(&self, key: &'a str) -> &'a str {
    if self.is_prefixed(key) {
      &key[self.prefix.len()..]
    } else {
      key
    }
  }
}

impl Container for PrefixingContainer {
  fn get(&self, key: &str) -> Result<Service> {
    if self.strict && !self.is_prefixed(key) {
      return Err(ContainerError::not_found(key));
    }

    match self.inner.get(self.unprefix(key)) {
      Err(e) if e.is_not_found() && !self.strict => self.inner.get(key),
      result => result,
    }
  }

  fn has(&self, key: &str) -> bool {
    if self.strict && !self.is_prefixed(key) {
      return false;
    }
    self.inner.has(self.unprefix(key)) || (!self.strict && self.inner.has(key))
  }
}
