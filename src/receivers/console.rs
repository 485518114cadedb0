//! Console receiver implementation

use crate::core::{LogLevel, LogReceiver};
#[cfg(feature = "console")]
use colored::Colorize;
use std::error::Error;

/// Prints each line to the terminal
///
/// `debug` and `info` go to stdout; `warn` and `error` (which also carries
/// `fatal`) go to stderr. An attached error is printed on the same line
/// after ` | ` using its `Debug` form.
pub struct ConsoleReceiver {
    use_colors: bool,
}

impl ConsoleReceiver {
    pub fn new() -> Self {
        Self {
            use_colors: cfg!(feature = "console"),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn format_line(
        &self,
        tag: &str,
        level: Option<LogLevel>,
        message: &str,
        error: Option<&(dyn Error + 'static)>,
    ) -> String {
        let tag = self.paint(format!("{:5}", tag), level);
        match error {
            Some(error) => format!("[{}] {} | {:?}", tag, message, error),
            None => format!("[{}] {}", tag, message),
        }
    }

    #[cfg(feature = "console")]
    fn paint(&self, tag: String, level: Option<LogLevel>) -> String {
        match level {
            Some(level) if self.use_colors => tag.color(level.color_code()).to_string(),
            _ => tag,
        }
    }

    #[cfg(not(feature = "console"))]
    fn paint(&self, tag: String, _level: Option<LogLevel>) -> String {
        tag
    }
}

impl Default for ConsoleReceiver {
    fn default() -> Self {
        Self::new()
    }
}

impl LogReceiver for ConsoleReceiver {
    fn debug(&self, message: &str) {
        println!("{}", self.format_line("DEBUG", None, message, None));
    }

    fn info(&self, message: &str) {
        println!("{}", self.format_line("INFO", Some(LogLevel::Info), message, None));
    }

    fn warn(&self, message: &str, error: Option<&(dyn Error + 'static)>) {
        eprintln!("{}", self.format_line("WARN", Some(LogLevel::Warn), message, error));
    }

    fn error(&self, message: &str, error: Option<&(dyn Error + 'static)>) {
        eprintln!("{}", self.format_line("ERROR", Some(LogLevel::Error), message, error));
    }
}
