use crate::core::{Container, Service};
use crate::error::{ContainerError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Hides some keys of an inner container.
///
/// A key listed in the mask is exposed if its entry is `true`. Keys not listed
/// follow the default.
pub struct MaskingContainer {
  inner: Arc<dyn Container>,
  default_exposed: bool,
  mask: HashMap<String, bool>,
}

impl MaskingContainer {
  pub fn new(inner: Arc<dyn Container>, default_exposed: bool, mask: HashMap<String, bool>) -> Self {
    Self {
      inner,
      default_exposed,
      mask,
    }
  }

  pub fn is_exposed(&self, key: &str) -> bool {
    self.mask.get(key).copied().unwrap_or(self.default_exposed)
  }
}

impl Container for MaskingContainer {
  fn get(&self, key: &str) -> Result<Service> {
    if !self.is_exposed(key) {
      return Err(ContainerError::not_found(key));
    }
    self.inner.get(key)
  }

  fn has(&self, key: &str) -> bool {
    self.is_exposed(key) && self.inner.has(key)
  }
}
