//! Handler implementations

pub mod echo;
pub mod stream;

pub use echo::EchoHandler;
pub use stream::{StreamHandler, StreamTarget};

// Re-export traits for convenience
pub use crate::core::{FormatterAware, Handler};
