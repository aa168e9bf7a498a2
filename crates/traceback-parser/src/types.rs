//! Type definitions for error stream parsing

use serde::{Deserialize, Serialize};

/// A single line captured from the watched terminal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamLine {
    /// 1-based position of the line in the stream
    pub number: usize,

    /// Line content without the trailing newline
    pub text: String,
}

/// An error detected in the stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEvent {
    /// Canonical error identifier, e.g. `NameError`
    pub error_type: String,

    /// True if the error was resolved from a multi-line traceback
    pub has_traceback: bool,

    /// Text following the error identifier on its line (if any)
    pub message: Option<String>,
}

impl StreamLine {
    /// Create a stream line, stripping any trailing line terminator
    pub fn new(number: usize, text: &str) -> Self {
        Self {
            number,
            text: text.trim_end_matches(['\n', '\r']).to_string(),
        }
    }
}

impl ErrorEvent {
    /// Error reported on a single line, without a traceback
    pub fn single_line(error_type: impl Into<String>, message: Option<String>) -> Self {
        Self {
            error_type: error_type.into(),
            has_traceback: false,
            message,
        }
    }

    /// Error resolved from the last line of a traceback
    pub fn from_traceback(error_type: impl Into<String>, message: Option<String>) -> Self {
        Self {
            error_type: error_type.into(),
            has_traceback: true,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_line_strips_terminator() {
        let line = StreamLine::new(3, "TabError: inconsistent use of tabs\r\n");
        assert_eq!(line.number, 3);
        assert_eq!(line.text, "TabError: inconsistent use of tabs");
    }
}
