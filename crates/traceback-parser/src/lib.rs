//! Traceback Parser
//!
//! A library for spotting language runtime errors in a live stream of terminal
//! output. Single-line errors (e.g. `IndentationError: unexpected indent`) are
//! recognized directly, multi-line tracebacks are followed until their
//! terminating `ErrorType: message` line.
//!
//! # Example
//!
//! ```no_run
//! use traceback_parser::{ErrorStream, LanguageProfile};
//!
//! let stdin = std::io::stdin().lock();
//! for event in ErrorStream::new(stdin, LanguageProfile::python()) {
//!     println!("{} (traceback: {})", event.error_type, event.has_traceback);
//! }
//! ```

mod parser;
mod profile;
mod types;

pub use parser::{ErrorStream, ErrorStreamParser, ParserState};
pub use profile::{LanguageProfile, UnsupportedLanguage, parse_error_header};
pub use types::*;
