//! Aggregation of several providers into one.

use crate::core::{Container, Extension, ExtensionMap, FactoryMap, Service};
use crate::provider::Provider;
use once_cell::sync::OnceCell;
use std::sync::Arc;

struct Definitions {
  factories: FactoryMap,
  extensions: ExtensionMap,
}

/// A provider merging the definitions of other providers.
///
/// Providers are merged in list order the first time either map is requested,
/// and the result is kept for the lifetime of the composite.
///
/// - Factories: a later provider's factory replaces an earlier one.
/// - Extensions: never replaced. Extensions for the same key are chained, the
///   earliest provider's running first on the factory output and each later
///   one receiving the previous result.
pub struct CompositeCachingServiceProvider {
  providers: Vec<Arc<dyn Provider>>,
  merged: OnceCell<Definitions>,
}

impl CompositeCachingServiceProvider {
  pub fn new(providers: Vec<Arc<dyn Provider>>) -> Self {
    Self {
      providers,
      merged: OnceCell::new(),
    }
  }

  pub fn providers(&self) -> &[Arc<dyn Provider>] {
    &self.providers
  }

  fn definitions(&self) -> &Definitions {
    // `OnceCell` runs the merge exactly once, even when several threads ask
    // for the maps at the same time.
    self.merged.get_or_init(|| self.index_definitions())
  }

  fn index_definitions(&self) -> Definitions {
    let mut factories = FactoryMap::new();
    let mut extensions = ExtensionMap::new();

    for provider in &self.providers {
      factories = merge_factories(factories, provider.factories());
      extensions = merge_extensions(extensions, provider.extensions());
    }

    tracing::debug!(
      providers = self.providers.len(),
      factories = factories.len(),
      extensions = extensions.len(),
      "merged provider definitions"
    );

    Definitions {
      factories,
      extensions,
    }
  }
}

impl Provider for CompositeCachingServiceProvider {
  fn factories(&self) -> &FactoryMap {
    &self.definitions().factories
  }

  fn extensions(&self) -> &ExtensionMap {
    &self.definitions().extensions
  }
}

/// Overlays `definitions` on top of `defaults`; incoming entries win.
pub(crate) fn merge_factories(mut defaults: FactoryMap, definitions: &FactoryMap) -> FactoryMap {
  for (key, factory) in definitions {
    defaults.insert(key.clone(), factory.clone());
  }
  defaults
}

/// Merges `incoming` into `defaults`, chaining extensions present in both.
///
/// Untouched defaults keep their place at the front; incoming keys, chained or
/// not, follow in their own order.
pub(crate) fn merge_extensions(mut defaults: ExtensionMap, incoming: &ExtensionMap) -> ExtensionMap {
  let mut merged = ExtensionMap::with_capacity(incoming.len());

  for (key, extension) in incoming {
    let extension = match defaults.shift_remove(key) {
      Some(existing) => chain_extensions(existing, extension.clone()),
      None => extension.clone(),
    };
    merged.insert(key.clone(), extension);
  }

  defaults.extend(merged);
  defaults
}

/// An extension running `first`, then feeding its result to `second`.
pub(crate) fn chain_extensions(first: Extension, second: Extension) -> Extension {
  Arc::new(move |c: &dyn Container, previous: Service| {
    let intermediate = first(c, previous)?;
    second(c, intermediate)
  })
}
