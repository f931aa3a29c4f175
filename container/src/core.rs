//! Core types: the lookup contract, factory/extension callables and the
//! per-container resolution stack used for cycle detection.

use crate::error::{ContainerError, Result};
use dashmap::DashMap;
use indexmap::IndexMap;
use std::any::{type_name, Any};
use std::cell::RefCell;
use std::sync::Arc;
use std::thread::{self, ThreadId};

/// A resolved service instance.
pub type Service = Arc<dyn Any + Send + Sync>;

/// The value produced by a tag service: every tagged service, in declaration order.
pub type TaggedServices = Vec<Service>;

/// Produces a service, given the container to pull dependencies from.
pub type Factory = Arc<dyn Fn(&dyn Container) -> Result<Service> + Send + Sync>;

/// Decorates a previously produced service.
pub type Extension = Arc<dyn Fn(&dyn Container, Service) -> Result<Service> + Send + Sync>;

pub type FactoryMap = IndexMap<String, Factory>;
pub type ExtensionMap = IndexMap<String, Extension>;

/// The lookup capability every container implements.
pub trait Container: Send + Sync {
  /// Retrieves the service registered under `key`.
  fn get(&self, key: &str) -> Result<Service>;

  /// Whether a subsequent `get` is expected to succeed structurally.
  fn has(&self, key: &str) -> bool;
}

impl<C: Container + ?Sized> Container for Arc<C> {
  fn get(&self, key: &str) -> Result<Service> {
    (**self).get(key)
  }
  fn has(&self, key: &str) -> bool {
    (**self).has(key)
  }
}

impl<C: Container + ?Sized> Container for Box<C> {
  fn get(&self, key: &str) -> Result<Service> {
    (**self).get(key)
  }
  fn has(&self, key: &str) -> bool {
    (**self).has(key)
  }
}

impl<C: Container + ?Sized> Container for &C {
  fn get(&self, key: &str) -> Result<Service> {
    (**self).get(key)
  }
  fn has(&self, key: &str) -> bool {
    (**self).has(key)
  }
}

/// Typed access on top of [`Container`].
pub trait ContainerExt: Container {
  /// Retrieves a service and downcasts it to `T`.
  fn get_as<T: Any + Send + Sync>(&self, key: &str) -> Result<Arc<T>> {
    self
      .get(key)?
      .downcast::<T>()
      .map_err(|_| ContainerError::TypeMismatch {
        key: key.to_owned(),
        expected: type_name::<T>(),
      })
  }

  /// Retrieves a tag service: the list of every service carrying the tag.
  fn get_tagged(&self, tag: &str) -> Result<Arc<TaggedServices>> {
    self.get_as::<TaggedServices>(tag)
  }
}

impl<C: Container + ?Sized> ContainerExt for C {}

/// Wraps a closure returning a plain value into a [`Factory`].
pub fn factory_fn<T, F>(f: F) -> Factory
where
  T: Any + Send + Sync,
  F: Fn(&dyn Container) -> Result<T> + Send + Sync + 'static,
{
  Arc::new(move |c: &dyn Container| f(c).map(|value| Arc::new(value) as Service))
}

/// Wraps a typed closure into an [`Extension`].
///
/// The previous value is downcast to `T` first; a value of another type fails
/// with [`ContainerError::TypeMismatch`].
pub fn extension_fn<T, U, F>(key: &str, f: F) -> Extension
where
  T: Any + Send + Sync,
  U: Any + Send + Sync,
  F: Fn(&dyn Container, Arc<T>) -> Result<U> + Send + Sync + 'static,
{
  let key = key.to_owned();
  Arc::new(move |c: &dyn Container, previous: Service| {
    let previous = previous
      .downcast::<T>()
      .map_err(|_| ContainerError::TypeMismatch {
        key: key.clone(),
        expected: type_name::<T>(),
      })?;
    f(c, previous).map(|value| Arc::new(value) as Service)
  })
}

thread_local! {
  // Every key requested on this thread and still in flight, across all
  // containers. Only used to report the full path of a cycle; detection itself
  // stays per container.
  static REQUEST_LOG: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Keys currently being resolved, tracked per thread.
///
/// Each thread has its own chain, so unrelated resolutions running in parallel
/// on the same container never see each other's keys.
#[derive(Default)]
pub(crate) struct ResolutionStack {
  chains: DashMap<ThreadId, Vec<String>>,
}

impl ResolutionStack {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  /// Marks `key` as in progress on the current thread.
  ///
  /// Fails with [`ContainerError::CircularDependency`] if it already is.
  pub(crate) fn enter(&self, key: &str) -> Result<ResolutionGuard<'_>> {
    let thread = thread::current().id();
    let mut chain = self.chains.entry(thread).or_default();

    if chain.iter().any(|k| k == key) {
      let mut cycle = REQUEST_LOG.with(|log| log.borrow().clone());
      cycle.push(key.to_owned());
      return Err(ContainerError::CircularDependency { chain: cycle });
    }

    chain.push(key.to_owned());
    REQUEST_LOG.with(|log| log.borrow_mut().push(key.to_owned()));
    tracing::trace!(key, depth = chain.len(), "resolving");
    Ok(ResolutionGuard { stack: self, thread })
  }

  #[cfg(test)]
  fn depth(&self) -> usize {
    self
      .chains
      .get(&thread::current().id())
      .map_or(0, |chain| chain.len())
  }
}

/// An RAII guard holding a key on the resolution stack.
///
/// When dropped it pops the key again, on success and failure alike.
pub(crate) struct ResolutionGuard<'a> {
  stack: &'a ResolutionStack,
  thread: ThreadId,
}

impl Drop for ResolutionGuard<'_> {
  fn drop(&mut self) {
    REQUEST_LOG.with(|log| {
      log.borrow_mut().pop();
    });
    let emptied = match self.stack.chains.get_mut(&self.thread) {
      Some(mut chain) => {
        if let Some(key) = chain.pop() {
          tracing::trace!(key = key.as_str(), "resolved");
        }
        chain.is_empty()
      }
      None => false,
    };
    if emptied {
      self
        .stack
        .chains
        .remove_if(&self.thread, |_, chain| chain.is_empty());
    }
  }
}
