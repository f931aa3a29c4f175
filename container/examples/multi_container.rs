use fibre_container::{
  CompositeCachingServiceProvider, Container, ContainerExt, DelegatingContainer, Provider,
  ServiceProvider,
};
use std::sync::Arc;

// A function that runs some logic against whatever container it is given.
// By accepting a `&dyn Container`, it can be tested with a controlled environment.
fn process_data(container: &dyn Container) -> String {
  let data = container
    .get_as::<String>("data")
    .expect("Data not found in container");
  format!("Processed: {}", data.to_uppercase())
}

fn production_module() -> ServiceProvider {
  ServiceProvider::builder()
    .value("data", "production data".to_string())
    .build()
}

fn main() {
  // --- Production wiring ---
  let production = DelegatingContainer::new(Arc::new(production_module()));
  println!("Result: {}", process_data(&production));

  // --- Test wiring: the same module, with a later module overriding "data" ---
  println!("\n--- Running with a test override ---");
  let providers: Vec<Arc<dyn Provider>> = vec![
    Arc::new(production_module()),
    Arc::new(
      ServiceProvider::builder()
        .value("data", "test data".to_string())
        .build(),
    ),
  ];
  let test_container = DelegatingContainer::new(Arc::new(CompositeCachingServiceProvider::new(providers)));
  let result = process_data(&test_container);

  println!("Result: {}", result);
  assert_eq!(result, "Processed: TEST DATA");

  // --- Verify Isolation ---
  // The override lives only in the test container.
  assert_eq!(process_data(&production), "Processed: PRODUCTION DATA");
  println!("\nVerified that the production container is unaffected by the override.");
}
