//! Containers that wrap other containers.
//!
//! Each decorator holds its inner container(s) and implements the same lookup
//! contract, so they stack freely.

mod aliasing;
mod callback;
mod caching;
mod composite;
mod masking;
mod noop;
mod prefixing;

pub use aliasing::AliasingContainer;
pub use caching::CachingContainer;
pub use callback::{Callback, CallbackContainer};
pub use composite::CompositeContainer;
pub use masking::MaskingContainer;
pub use noop::NoOpContainer;
pub use prefixing::PrefixingContainer;
