//! Local receiver implementations

pub mod console;
pub mod null;

pub use console::ConsoleReceiver;
pub use null::NullReceiver;

// Re-export trait for convenience
pub use crate::core::LogReceiver;
