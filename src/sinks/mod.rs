//! Sink implementations

pub mod console;
pub mod native;

pub use console::ConsoleSink;
pub use native::NativeSink;

pub use crate::core::Sink;
