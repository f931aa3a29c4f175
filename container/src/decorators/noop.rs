use crate::core::{Container, Service};
use crate::error::{ContainerError, Result};

/// A container that never has anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpContainer;

impl Container for NoOpContainer {
  fn get(&self, key: &str) -> Result<Service> {
    Err(ContainerError::not_found(key))
  }

  fn has(&self, _key: &str) -> bool {
    false
  }
}
