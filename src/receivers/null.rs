//! Receiver that discards everything

use crate::core::LogReceiver;
use std::error::Error;

/// Discards local output; useful when only the remote copy matters
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReceiver;

impl LogReceiver for NullReceiver {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str, _error: Option<&(dyn Error + 'static)>) {}
    fn error(&self, _message: &str, _error: Option<&(dyn Error + 'static)>) {}
}
