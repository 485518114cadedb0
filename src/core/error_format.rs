//! Normalisation of error values into a single log-friendly string

use std::error::Error;

/// Render an error and its `source()` chain as one line.
///
/// The top-level message comes first, followed by every cause joined with
/// `": "`. Line breaks inside messages are kept as-is.
///
/// # Example
///
/// ```
/// use loki_batch_logger::format_error;
///
/// let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "timeout");
/// assert_eq!(format_error(&err), "timeout");
/// ```
pub fn format_error(error: &(dyn Error + 'static)) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        // Some errors already embed their cause in Display
        if !rendered.ends_with(&cause_message) {
            rendered.push_str(": ");
            rendered.push_str(&cause_message);
        }
        source = cause.source();
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Wrapped {
        message: &'static str,
        cause: Option<Box<dyn Error + 'static>>,
    }

    impl fmt::Display for Wrapped {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.message)
        }
    }

    impl Error for Wrapped {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            self.cause.as_deref()
        }
    }

    #[test]
    fn test_single_error() {
        let err = Wrapped {
            message: "timeout",
            cause: None,
        };
        assert_eq!(format_error(&err), "timeout");
    }

    #[test]
    fn test_source_chain() {
        let err = Wrapped {
            message: "request failed",
            cause: Some(Box::new(Wrapped {
                message: "connection reset",
                cause: Some(Box::new(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "broken pipe",
                ))),
            })),
        };
        assert_eq!(
            format_error(&err),
            "request failed: connection reset: broken pipe"
        );
    }

    #[test]
    fn test_cause_already_in_display() {
        let err = Wrapped {
            message: "read failed: eof",
            cause: Some(Box::new(Wrapped {
                message: "eof",
                cause: None,
            })),
        };
        assert_eq!(format_error(&err), "read failed: eof");
    }
}
