//! Language profiles
//!
//! A profile holds the vocabulary needed to recognize one language's errors:
//! the errors that are reported without a traceback, and the marker token that
//! opens a traceback.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

/// Requested language has no profile
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0} is not a supported language. Use one of {supported:?}.", supported = LanguageProfile::SUPPORTED)]
pub struct UnsupportedLanguage(pub String);

/// Error grammar for one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageProfile {
    /// Language tag, also used as the search tag (e.g. `python`)
    pub name: String,

    /// Errors reported on a single line, without a traceback
    pub syntax_errors: Vec<String>,

    /// Token that opens a multi-line traceback
    pub traceback_marker: String,
}

impl LanguageProfile {
    /// Languages with a built-in profile
    pub const SUPPORTED: &'static [&'static str] = &["python"];

    /// Profile for CPython error output
    pub fn python() -> Self {
        Self {
            name: "python".to_string(),
            syntax_errors: ["SyntaxError", "IndentationError", "TabError"]
                .into_iter()
                .map(String::from)
                .collect(),
            traceback_marker: "Traceback".to_string(),
        }
    }

    /// Look up the built-in profile for a language tag
    pub fn for_language(name: &str) -> Result<Self, UnsupportedLanguage> {
        match name.to_lowercase().as_str() {
            "python" => Ok(Self::python()),
            _ => Err(UnsupportedLanguage(name.to_string())),
        }
    }

    /// Match a leading token such as `IndentationError:` against the syntax
    /// error vocabulary. Exactly one trailing punctuation character is dropped
    /// before the lookup.
    pub fn syntax_error<'a>(&self, token: &'a str) -> Option<&'a str> {
        let name = token.strip_suffix(|c: char| c.is_ascii_punctuation())?;
        self.syntax_errors
            .iter()
            .any(|known| known == name)
            .then_some(name)
    }

    /// Whether the tokens of a line contain the traceback marker
    pub fn opens_traceback<'a>(&self, mut tokens: impl Iterator<Item = &'a str>) -> bool {
        tokens.any(|token| token == self.traceback_marker)
    }
}

/// Parse the terminating line of a traceback, `ErrorType: message`
///
/// Returns `Some((error_type, message))` if the first token of the line is a
/// colon-terminated identifier (dotted paths such as `json.decoder.JSONDecodeError:`
/// are accepted). Returns `None` for any other line, including blank ones.
pub fn parse_error_header(line: &str) -> Option<(String, Option<String>)> {
    static HEADER_REGEX: OnceLock<Regex> = OnceLock::new();

    let re = HEADER_REGEX.get_or_init(|| {
        // Match `Identifier:` or `Identifier: message`
        Regex::new(r"^([A-Za-z_][A-Za-z0-9_.]*):(?:\s+(.*))?$").unwrap()
    });

    let captures = re.captures(line.trim())?;
    let error_type = captures.get(1)?.as_str().to_string();
    let message = captures
        .get(2)
        .map(|m| m.as_str().trim().to_string())
        .filter(|m| !m.is_empty());

    Some((error_type, message))
}
