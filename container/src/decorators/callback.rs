use crate::core::{Container, Service};
use crate::error::Result;
use std::sync::Arc;

/// Transforms a retrieved value, given the value, its key and this container.
pub type Callback = Arc<dyn Fn(Service, &str, &dyn Container) -> Result<Service> + Send + Sync>;

/// Passes every value of an inner container through a callback.
///
/// `has` is answered by the inner container alone.
pub struct CallbackContainer {
  inner: Arc<dyn Container>,
  callback: Callback,
}

impl CallbackContainer {
  pub fn new<F>(inner: Arc<dyn Container>, callback: F) -> Self
  where
    F: Fn(Service, &str, &dyn Container) -> Result<Service> + Send + Sync + 'static,
  {
    Self {
      inner,
      callback: Arc::new(callback),
    }
  }
}

impl Container for CallbackContainer {
  fn get(&self, key: &str) -> Result<Service> {
    let value = self.inner.get(key)?;
    (self.callback)(value, key, self)
  }

  fn has(&self, key: &str) -> bool {
    self.inner.has(key)
  }
}
