//! Receiver trait for the local copy of every log line

use std::error::Error;

/// Local sink that sees each line as soon as it is logged.
///
/// The logger forwards `mdc_prefix + message` here synchronously, before the
/// entry is shipped anywhere. It also reports its own diagnostics (empty
/// flushes, delivery outcomes) through the same receiver.
pub trait LogReceiver: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str, error: Option<&(dyn Error + 'static)>);
    /// Also receives `fatal` lines
    fn error(&self, message: &str, error: Option<&(dyn Error + 'static)>);
}
