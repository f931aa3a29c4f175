//! Tag-based collection services.
//!
//! A tag is a label attached to any number of services. For every tag in use,
//! [`TaggingServiceProvider`] exposes a service under the tag's own name which
//! resolves to the list of all tagged services, in the order their factories
//! were declared.
//!
//! The tag service is built from two parts: a factory returning an empty list,
//! and an extension appending the tagged services to whatever list it receives.
//! Because of that split, the same tag used in several providers merges
//! naturally in a [`CompositeCachingServiceProvider`](crate::CompositeCachingServiceProvider):
//! the empty-list factories replace one another, while the extensions chain and
//! each contributes its own services.

use crate::composite::chain_extensions;
use crate::core::{
  Container, Extension, ExtensionMap, FactoryMap, Service, TaggedServices,
};
use crate::error::{ContainerError, Result};
use crate::provider::Provider;
use indexmap::IndexMap;
use std::any::type_name;
use std::sync::Arc;

/// Tag metadata for services, supplied alongside their factories.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceTags {
  tags: IndexMap<String, Vec<String>>,
}

impl ServiceTags {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds `tag` to the service registered under `service`.
  ///
  /// Surrounding whitespace is not part of a tag name.
  pub fn with_tag(mut self, service: &str, tag: &str) -> Self {
    let tag = tag.trim();
    let tags = self.tags.entry(service.to_owned()).or_default();
    if !tags.iter().any(|t| t == tag) {
      tags.push(tag.to_owned());
    }
    self
  }

  /// The tags attached to `service`, in the order they were added.
  pub fn tags_of(&self, service: &str) -> &[String] {
    self.tags.get(service).map(Vec::as_slice).unwrap_or_default()
  }

  pub fn services(&self) -> impl Iterator<Item = &str> {
    self.tags.keys().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.tags.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tags.is_empty()
  }
}

impl From<IndexMap<String, Vec<String>>> for ServiceTags {
  fn from(map: IndexMap<String, Vec<String>>) -> Self {
    map
      .into_iter()
      .fold(ServiceTags::new(), |acc, (service, tags)| {
        tags.iter().fold(acc, |acc, tag| acc.with_tag(&service, tag))
      })
  }
}

/// A provider that adds one collection service per tag to an inner provider.
///
/// Indexing happens once, at construction.
pub struct TaggingServiceProvider {
  factories: FactoryMap,
  extensions: ExtensionMap,
  index: IndexMap<String, Vec<String>>,
}

impl TaggingServiceProvider {
  /// Copies the inner provider's definitions and indexes `tags` against them.
  ///
  /// Tags attached to services that have no factory, and blank tag names, are
  /// skipped with a warning. A tag named like one of the inner provider's
  /// factories is ambiguous and fails with [`ContainerError::TagCollision`].
  pub fn new<P: Provider + ?Sized>(inner: &P, tags: ServiceTags) -> Result<Self> {
    let mut factories = inner.factories().clone();
    let mut extensions = inner.extensions().clone();

    for service in tags.services() {
      if !factories.contains_key(service) {
        tracing::warn!(service, "ignoring tags of a service that has no factory");
      }
    }

    let index = index_tags(&factories, &tags);

    for (tag, services) in &index {
      if factories.contains_key(tag) {
        return Err(ContainerError::TagCollision { tag: tag.clone() });
      }

      factories.insert(
        tag.clone(),
        Arc::new(|_: &dyn Container| Ok(Arc::new(TaggedServices::new()) as Service)),
      );

      let append = append_tagged(tag, services.clone());
      let extension = match extensions.shift_remove(tag) {
        Some(existing) => chain_extensions(existing, append),
        None => append,
      };
      extensions.insert(tag.clone(), extension);
    }

    tracing::debug!(tags = index.len(), "indexed service tags");

    Ok(Self {
      factories,
      extensions,
      index,
    })
  }

  /// The services carrying `tag`, in resolution order.
  pub fn tagged(&self, tag: &str) -> &[String] {
    self.index.get(tag).map(Vec::as_slice).unwrap_or_default()
  }

  pub fn tags(&self) -> impl Iterator<Item = &str> {
    self.index.keys().map(String::as_str)
  }
}

impl Provider for TaggingServiceProvider {
  fn factories(&self) -> &FactoryMap {
    &self.factories
  }

  fn extensions(&self) -> &ExtensionMap {
    &self.extensions
  }
}

/// Maps each tag to the services carrying it, following factory order.
fn index_tags(factories: &FactoryMap, tags: &ServiceTags) -> IndexMap<String, Vec<String>> {
  let mut index: IndexMap<String, Vec<String>> = IndexMap::new();

  for service in factories.keys() {
    for tag in tags.tags_of(service) {
      if tag.is_empty() {
        tracing::warn!(service = service.as_str(), "ignoring blank tag name");
        continue;
      }
      index.entry(tag.clone()).or_default().push(service.clone());
    }
  }

  index
}

fn append_tagged(tag: &str, services: Vec<String>) -> Extension {
  let tag = tag.to_owned();
  Arc::new(move |c: &dyn Container, previous: Service| {
    let previous = previous
      .downcast::<TaggedServices>()
      .map_err(|_| ContainerError::TypeMismatch {
        key: tag.clone(),
        expected: type_name::<TaggedServices>(),
      })?;

    let mut list = TaggedServices::with_capacity(previous.len() + services.len());
    list.extend(previous.iter().cloned());
    for service in &services {
      list.push(c.get(service)?);
    }
    Ok(Arc::new(list) as Service)
  })
}
