use thiserror::Error;

/// A boxed error coming from user code running inside a factory or extension.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type shared by every container and provider in this crate.
///
/// Wrapping variants print their inner error as part of their own message, so
/// the outermost error of a deep resolution still shows what went wrong at the
/// bottom (for example the full path of a dependency cycle).
#[derive(Debug, Error)]
pub enum ContainerError {
  #[error("Service not found for key \"{key}\"")]
  NotFound {
    key: String,
    #[source]
    source: Option<Box<ContainerError>>,
  },

  #[error("Could not create service \"{key}\": {source}")]
  Create {
    key: String,
    source: Box<ContainerError>,
  },

  #[error("Could not extend service \"{key}\": {source}")]
  Extend {
    key: String,
    source: Box<ContainerError>,
  },

  #[error("Circular dependency detected: {}", .chain.join(" -> "))]
  CircularDependency { chain: Vec<String> },

  #[error("Service \"{key}\" is not of type {expected}")]
  TypeMismatch { key: String, expected: &'static str },

  #[error("Tag \"{tag}\" collides with a service registered under the same key")]
  TagCollision { tag: String },

  #[error("Could not retrieve \"{key}\" from inner container: {source}")]
  Inner {
    key: String,
    source: Box<ContainerError>,
  },

  #[error("{message}")]
  Custom {
    message: String,
    #[source]
    source: Option<BoxError>,
  },
}

impl ContainerError {
  pub fn not_found(key: impl Into<String>) -> Self {
    ContainerError::NotFound {
      key: key.into(),
      source: None,
    }
  }

  /// A free-form failure raised by a factory or extension.
  pub fn msg(message: impl Into<String>) -> Self {
    ContainerError::Custom {
      message: message.into(),
      source: None,
    }
  }

  /// Wraps any error raised by user code.
  pub fn other<E>(error: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    ContainerError::Custom {
      message: error.to_string(),
      source: Some(Box::new(error)),
    }
  }

  pub fn is_not_found(&self) -> bool {
    matches!(self, ContainerError::NotFound { .. })
  }

  /// Returns the cycle path if this error, or any error it wraps, is a
  /// circular dependency.
  pub fn cycle(&self) -> Option<&[String]> {
    match self {
      ContainerError::CircularDependency { chain } => Some(chain.as_slice()),
      ContainerError::Create { source, .. }
      | ContainerError::Extend { source, .. }
      | ContainerError::Inner { source, .. } => source.cycle(),
      ContainerError::NotFound {
        source: Some(source),
        ..
      } => source.cycle(),
      _ => None,
    }
  }
}

/// A specialized `Result` type for container operations.
pub type Result<T, E = ContainerError> = std::result::Result<T, E>;
