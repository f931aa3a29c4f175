//! Public macros for ergonomic service resolution.

/// Resolves a typed service from a container, panicking on failure.
///
/// This is meant for call sites where a missing or broken dependency is a
/// programming error. For a non-panicking version, use
/// [`ContainerExt::get_as`](crate::ContainerExt::get_as) directly.
///
/// # Panics
///
/// Panics if the service cannot be resolved or is not of the requested type.
/// The panic message contains the key, the type and the underlying error.
///
/// # Examples
///
/// ```
/// use fibre_container::{resolve, DelegatingContainer, ServiceProvider};
/// use std::sync::Arc;
///
/// let provider = ServiceProvider::builder()
///   .value("greeting", String::from("hello"))
///   .build();
/// let container = DelegatingContainer::new(Arc::new(provider));
///
/// let greeting = resolve!(container, String, "greeting");
/// assert_eq!(*greeting, "hello");
/// ```
///
/// Inside a factory, resolve from the container the factory receives:
///
/// ```
/// use fibre_container::{resolve, DelegatingContainer, ServiceProvider};
/// use std::sync::Arc;
///
/// let provider = ServiceProvider::builder()
///   .value("name", String::from("world"))
///   .factory("greeting", |c| {
///     let name = resolve!(c, String, "name");
///     Ok(format!("hello, {}", name))
///   })
///   .build();
/// let container = DelegatingContainer::new(Arc::new(provider));
///
/// assert_eq!(*resolve!(container, String, "greeting"), "hello, world");
/// ```
#[macro_export]
macro_rules! resolve {
  ($container:expr, $type:ty, $key:expr) => {
    $crate::ContainerExt::get_as::<$type>(&$container, $key).unwrap_or_else(|err| {
      panic!(
        "Failed to resolve required service '{}' as {}: {}",
        $key,
        ::std::any::type_name::<$type>(),
        err
      )
    })
  };
}
