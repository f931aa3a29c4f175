use fibre_container::{
  CompositeCachingServiceProvider, Container, ContainerExt, DelegatingContainer, Extension,
  ExtensionMap, Factory, FactoryMap, Provider, Service, ServiceProvider,
};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

// --- Test Fixtures ---

/// A provider that counts how often its maps are requested.
struct CountingProvider {
  inner: ServiceProvider,
  factory_reads: AtomicUsize,
  extension_reads: AtomicUsize,
}

impl CountingProvider {
  fn new(inner: ServiceProvider) -> Self {
    Self {
      inner,
      factory_reads: AtomicUsize::new(0),
      extension_reads: AtomicUsize::new(0),
    }
  }
}

impl Provider for CountingProvider {
  fn factories(&self) -> &FactoryMap {
    self.factory_reads.fetch_add(1, Ordering::SeqCst);
    self.inner.factories()
  }
  fn extensions(&self) -> &ExtensionMap {
    self.extension_reads.fetch_add(1, Ordering::SeqCst);
    self.inner.extensions()
  }
}

fn composite(providers: Vec<Arc<dyn Provider>>) -> CompositeCachingServiceProvider {
  CompositeCachingServiceProvider::new(providers)
}

fn plus(n: i64) -> impl Fn(&dyn Container, Arc<i64>) -> fibre_container::Result<i64> {
  move |_, prev| Ok(*prev + n)
}

fn times(n: i64) -> impl Fn(&dyn Container, Arc<i64>) -> fibre_container::Result<i64> {
  move |_, prev| Ok(*prev * n)
}

// --- Merge Tests ---

#[test]
fn test_later_factory_overrides_earlier_one() {
  // Arrange
  let p1 = ServiceProvider::builder().value("x", 1_i64).build();
  let p2 = ServiceProvider::builder().value("x", 2_i64).build();
  let p2_factory: Factory = p2.factories()["x"].clone();

  // Act
  let merged = composite(vec![Arc::new(p1), Arc::new(p2)]);

  // Assert
  assert!(Arc::ptr_eq(&merged.factories()["x"], &p2_factory));
}

#[test]
fn test_extensions_chain_oldest_first() {
  // Arrange
  let p1 = ServiceProvider::builder().extension("x", plus(1)).build();
  let p2 = ServiceProvider::builder().extension("x", times(2)).build();
  let merged = composite(vec![Arc::new(p1), Arc::new(p2)]);

  // Act
  let extension: &Extension = &merged.extensions()["x"];
  let empty = DelegatingContainer::new(Arc::new(ServiceProvider::default()));
  let result = extension(&empty, Arc::new(5_i64) as Service).unwrap();

  // Assert: (5 + 1) * 2, not (5 * 2) + 1.
  assert_eq!(*result.downcast::<i64>().unwrap(), 12);
}

#[test]
fn test_extensions_from_three_providers_run_in_provider_order() {
  // Arrange
  let base = ServiceProvider::builder().value("x", 5_i64).build();
  let p1 = ServiceProvider::builder().extension("x", plus(1)).build();
  let p2 = ServiceProvider::builder().extension("x", times(2)).build();
  let p3 = ServiceProvider::builder().extension("x", plus(3)).build();
  let merged = composite(vec![Arc::new(base), Arc::new(p1), Arc::new(p2), Arc::new(p3)]);
  let container = DelegatingContainer::new(Arc::new(merged));

  // Act
  let x = container.get_as::<i64>("x").unwrap();

  // Assert: ((5 + 1) * 2) + 3
  assert_eq!(*x, 15);
}

#[test]
fn test_factory_override_keeps_earlier_extensions() {
  // A later provider redefining a service does not drop the decoration an
  // earlier provider put on it.
  let p1 = ServiceProvider::builder()
    .value("x", 1_i64)
    .extension("x", plus(10))
    .build();
  let p2 = ServiceProvider::builder().value("x", 100_i64).build();
  let container = DelegatingContainer::new(Arc::new(composite(vec![Arc::new(p1), Arc::new(p2)])));

  assert_eq!(*container.get_as::<i64>("x").unwrap(), 110);
}

#[test]
fn test_merge_order_of_keys() {
  let p1 = ServiceProvider::builder()
    .value("a", 1_i64)
    .value("b", 2_i64)
    .extension("a", plus(1))
    .extension("b", plus(1))
    .build();
  let p2 = ServiceProvider::builder()
    .value("c", 3_i64)
    .value("a", 4_i64)
    .extension("c", plus(1))
    .extension("a", plus(1))
    .build();

  let merged = composite(vec![Arc::new(p1), Arc::new(p2)]);

  let factory_keys: Vec<&str> = merged.factories().keys().map(String::as_str).collect();
  let extension_keys: Vec<&str> = merged.extensions().keys().map(String::as_str).collect();
  assert_eq!(factory_keys, vec!["a", "b", "c"]);
  assert_eq!(extension_keys, vec!["b", "c", "a"]);
}

// --- Caching Tests ---

#[test]
fn test_merge_runs_once_and_is_cached() {
  // Arrange
  let p1 = Arc::new(CountingProvider::new(
    ServiceProvider::builder().value("x", 1_i64).build(),
  ));
  let p2 = Arc::new(CountingProvider::new(
    ServiceProvider::builder().extension("x", plus(1)).build(),
  ));
  let merged = composite(vec![p1.clone(), p2.clone()]);

  // Act
  let f1 = merged.factories();
  let f2 = merged.factories();
  let e1 = merged.extensions();
  let e2 = merged.extensions();

  // Assert
  assert!(std::ptr::eq(f1, f2));
  assert!(std::ptr::eq(e1, e2));
  for provider in [&p1, &p2] {
    assert_eq!(provider.factory_reads.load(Ordering::SeqCst), 1);
    assert_eq!(provider.extension_reads.load(Ordering::SeqCst), 1);
  }
}

#[test]
fn test_merge_is_lazy() {
  let p1 = Arc::new(CountingProvider::new(ServiceProvider::default()));
  let _merged = composite(vec![p1.clone()]);

  assert_eq!(p1.factory_reads.load(Ordering::SeqCst), 0);
  assert_eq!(p1.extension_reads.load(Ordering::SeqCst), 0);
}

#[test]
fn test_extensions_request_alone_triggers_the_full_merge() {
  let p1 = Arc::new(CountingProvider::new(
    ServiceProvider::builder().value("x", 1_i64).build(),
  ));
  let merged = composite(vec![p1.clone()]);

  let _ = merged.extensions();
  let factories = merged.factories();

  assert!(factories.contains_key("x"));
  assert_eq!(p1.factory_reads.load(Ordering::SeqCst), 1);
}

#[test]
fn test_merge_does_not_touch_inputs() {
  // Arrange
  let p1 = Arc::new(
    ServiceProvider::builder()
      .value("x", 1_i64)
      .extension("x", plus(1))
      .build(),
  );
  let p2 = Arc::new(ServiceProvider::builder().extension("x", times(2)).build());
  let p1_extension = p1.extensions()["x"].clone();

  // Act
  let merged = composite(vec![p1.clone(), p2.clone()]);
  let _ = merged.extensions();

  // Assert
  assert_eq!(p1.factories().len(), 1);
  assert_eq!(p2.factories().len(), 0);
  assert!(Arc::ptr_eq(&p1.extensions()["x"], &p1_extension));
}

#[test]
fn test_concurrent_first_access_merges_once() {
  // Arrange
  let p1 = Arc::new(CountingProvider::new(
    ServiceProvider::builder().value("x", 1_i64).build(),
  ));
  let merged = composite(vec![p1.clone()]);

  // Act
  thread::scope(|s| {
    for i in 0..16 {
      let merged = &merged;
      s.spawn(move || {
        if i % 2 == 0 {
          assert!(merged.factories().contains_key("x"));
        } else {
          assert!(merged.extensions().is_empty());
        }
      });
    }
  });

  // Assert
  assert_eq!(p1.factory_reads.load(Ordering::SeqCst), 1);
  assert_eq!(p1.extension_reads.load(Ordering::SeqCst), 1);
}

#[test]
fn test_composites_nest() {
  let inner = composite(vec![
    Arc::new(ServiceProvider::builder().value("x", 2_i64).build()),
    Arc::new(ServiceProvider::builder().extension("x", plus(1)).build()),
  ]);
  let outer = composite(vec![
    Arc::new(inner),
    Arc::new(ServiceProvider::builder().extension("x", times(10)).build()),
  ]);
  let container = DelegatingContainer::new(Arc::new(outer));

  assert_eq!(*container.get_as::<i64>("x").unwrap(), 30);
}
