use fibre_container::{CachingContainer, Container, ContainerExt, DelegatingContainer, ServiceProvider};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// A simple service that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}

// A global, thread-safe counter to generate unique IDs.
static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  // The factory runs on every `get` of the delegating container.
  let provider = ServiceProvider::builder()
    .factory("tracker", |_| {
      println!("Creating RequestTracker...");
      Ok(RequestTracker {
        id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
      })
    })
    .build();
  let delegating = Arc::new(DelegatingContainer::new(Arc::new(provider)));

  println!("--- Resolving without a cache ---");
  let t1 = delegating.get_as::<RequestTracker>("tracker").unwrap();
  let t2 = delegating.get_as::<RequestTracker>("tracker").unwrap();
  println!("Tracker 1 ID: {}, Tracker 2 ID: {}", t1.id, t2.id);
  assert_eq!(t1.id, 0);
  assert_eq!(t2.id, 1);
  assert!(!Arc::ptr_eq(&t1, &t2), "Instances should be different");
  println!("Instances are different pointers, as expected.\n");

  // A caching container in front of it keeps the first instance.
  println!("--- Resolving through a cache ---");
  let cached = CachingContainer::new(delegating);
  let s1 = cached.get_as::<RequestTracker>("tracker").unwrap();
  let s2 = cached.get_as::<RequestTracker>("tracker").unwrap();
  println!("Cached 1 ID: {}, Cached 2 ID: {}", s1.id, s2.id);
  assert_eq!(s1.id, 2);
  assert!(Arc::ptr_eq(&s1, &s2), "Cached instances should be identical");
  assert!(cached.has("tracker"));
  println!("Cached instances are the same pointer, as expected.");
}
