use crate::core::{Container, Service};
use crate::error::{ContainerError, Result};
use std::sync::Arc;

/// Looks a key up in several containers, in order.
///
/// The first container that has the key serves it.
pub struct CompositeContainer {
  containers: Vec<Arc<dyn Container>>,
}

impl CompositeContainer {
  pub fn new(containers: Vec<Arc<dyn Container>>) -> Self {
    Self { containers }
  }
}

impl Container for CompositeContainer {
  fn get(&self, key: &str) -> Result<Service> {
    let Some(container) = self.containers.iter().find(|c| c.has(key)) else {
      return Err(ContainerError::not_found(key));
    };

    container.get(key).map_err(|e| match e {
      // A circular dependency is already a complete report; wrapping it at
      // every level of a self-referencing composite adds nothing.
      e @ ContainerError::CircularDependency { .. } => e,
      e if e.is_not_found() => ContainerError::NotFound {
        key: key.to_owned(),
        source: Some(Box::new(e)),
      },
      e => ContainerError::Inner {
        key: key.to_owned(),
        source: Box::new(e),
      },
    })
  }

  fn has(&self, key: &str) -> bool {
    self.containers.iter().any(|c| c.has(key))
  }
}
