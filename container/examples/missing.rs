use fibre_container::{resolve, Container, ContainerExt, DelegatingContainer, ServiceProvider};
use std::panic;
use std::sync::Arc;

struct UnregisteredService;

fn main() {
  let container = DelegatingContainer::new(Arc::new(ServiceProvider::default()));

  // --- Using the panicking `resolve!` macro ---
  println!("Attempting to resolve a service that was never registered...");

  let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
    // This line will panic!
    let _service = resolve!(container, UnregisteredService, "unregistered");
  }));

  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");

  // --- Using the fallible `get_as()` method ---
  println!("\nNow, attempting to resolve using the fallible `get_as()` method...");

  match container.get_as::<UnregisteredService>("unregistered") {
    Ok(_) => panic!("Should not have found the service!"),
    Err(err) if err.is_not_found() => println!("Correctly received: {}", err),
    Err(err) => panic!("Unexpected error: {}", err),
  }

  // --- Circular dependencies are errors, not stack overflows ---
  let cyclic = DelegatingContainer::new(Arc::new(
    ServiceProvider::builder()
      .factory("chicken", |c| c.get("egg").map(|_| ()))
      .factory("egg", |c| c.get("chicken").map(|_| ()))
      .build(),
  ));

  let err = cyclic.get("chicken").err().expect("cycle should fail");
  println!("\n{}", err);
  assert_eq!(err.cycle().unwrap(), ["chicken", "egg", "chicken"]);
}
