use crate::core::{Container, Service};
use crate::error::{ContainerError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Exposes inner keys under alternative names.
///
/// Keys without an alias are passed through unchanged.
pub struct AliasingContainer {
  inner: Arc<dyn Container>,
  aliases: HashMap<String, String>,
}

impl AliasingContainer {
  /// `aliases` maps an outer key to the inner key it stands for.
  pub fn new(inner: Arc<dyn Container>, aliases: HashMap<String, String>) -> Self {
    Self { inner, aliases }
  }

  fn inner_key<'a>(&'a self, key: &'a str) -> &'a str {
    self.aliases.get(key).map_or(key, String::as_str)
  }
}

impl Container for AliasingContainer {
  fn get(&self, key: &str) -> Result<Service> {
    let inner_key = self.inner_key(key);
    self.inner.get(inner_key).map_err(|e| match e {
      // Report the alias the caller asked for, with the inner miss as source.
      e if e.is_not_found() && inner_key != key => ContainerError::NotFound {
        key: key.to_owned(),
        source: Some(Box::new(e)),
      },
      e => e,
    })
  }

  fn has(&self, key: &str) -> bool {
    self.inner.has(self.inner_key(key))
  }
}
