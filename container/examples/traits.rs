use fibre_container::{resolve, DelegatingContainer, ServiceProvider};
use std::sync::Arc;

// 1. Define the abstraction (the trait)
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

// 2. Define a concrete implementation
struct ConsoleLogger;
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[CONSOLE LOG]: {}", message);
  }
}

// 3. A decorator that an extension wraps around whatever logger was built
struct TimestampLogger {
  inner: Arc<dyn Logger>,
}
impl Logger for TimestampLogger {
  fn log(&self, message: &str) {
    self.inner.log(&format!("[t+0ms] {}", message));
  }
}

// 4. Define a service that depends on the abstraction
struct ReportService {
  logger: Arc<dyn Logger>,
}

impl ReportService {
  fn generate_report(&self) {
    self.logger.log("Starting report generation.");
    // ... logic to generate report ...
    self.logger.log("Finished report generation.");
  }
}

fn main() {
  // --- Registration ---

  // Trait objects are stored as `Arc<dyn Logger>` values.
  let provider = ServiceProvider::builder()
    .factory("logger", |_| Ok(Arc::new(ConsoleLogger) as Arc<dyn Logger>))
    .extension("logger", |_, logger: Arc<Arc<dyn Logger>>| {
      Ok(Arc::new(TimestampLogger {
        inner: (*logger).clone(),
      }) as Arc<dyn Logger>)
    })
    // The ReportService factory *resolves* its own dependency (the logger).
    .factory("reports", |c| {
      Ok(ReportService {
        logger: (*resolve!(c, Arc<dyn Logger>, "logger")).clone(),
      })
    })
    .build();
  let container = DelegatingContainer::new(Arc::new(provider));

  // --- Resolution and Usage ---
  println!("Resolving the high-level service...");
  let report_service = resolve!(container, ReportService, "reports");

  println!("Using the service...");
  report_service.generate_report();

  // The output shows timestamped messages from the ConsoleLogger, proving the
  // dependency was injected and decorated by the extension.
}
