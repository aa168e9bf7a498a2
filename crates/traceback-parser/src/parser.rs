//! Main parsing logic for error detection in a terminal stream

use crate::profile::{LanguageProfile, parse_error_header};
use crate::types::{ErrorEvent, StreamLine};
use log::{debug, warn};
use std::io::BufRead;

/// State of the error stream parser
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParserState {
    /// Waiting for the start of an error
    #[default]
    Idle,

    /// Inside a traceback, waiting for its `ErrorType: message` line
    InTraceback,
}

/// Classifies lines of a live stream as non-error, single-line error or
/// multi-line traceback error
#[derive(Debug, Clone)]
pub struct ErrorStreamParser {
    profile: LanguageProfile,
    state: ParserState,
}

impl ErrorStreamParser {
    /// Create a parser for the given language profile
    pub fn new(profile: LanguageProfile) -> Self {
        Self {
            profile,
            state: ParserState::Idle,
        }
    }

    /// Current parser state
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Classify a freshly read line
    ///
    /// If the line opens a traceback, continuation lines are read from `stream`
    /// until the terminating error line is found. Reaching the end of the
    /// stream inside a traceback yields `None`.
    ///
    /// # Arguments
    ///
    /// * `line` - The line just read from the stream
    /// * `stream` - The same stream, for reading traceback continuation lines
    pub fn classify<R: BufRead>(&mut self, line: &str, stream: &mut R) -> Option<ErrorEvent> {
        let mut tokens = line.split_whitespace();

        // Blank lines carry no classifiable token
        let first = tokens.next()?;

        // Syntax errors don't have a traceback
        if let Some(error_type) = self.profile.syntax_error(first) {
            let message = line
                .trim_start()
                .strip_prefix(first)
                .map(|rest| rest.trim().to_string())
                .filter(|rest| !rest.is_empty());
            return Some(ErrorEvent::single_line(error_type, message));
        }

        if self.profile.opens_traceback(line.split_whitespace()) {
            self.state = ParserState::InTraceback;
            let event = self.scan_traceback(stream);
            self.state = ParserState::Idle;
            return event;
        }

        None
    }

    /// Read continuation lines until the traceback's error line
    fn scan_traceback<R: BufRead>(&mut self, stream: &mut R) -> Option<ErrorEvent> {
        let mut skipped = 0usize;

        while let Some(line) = read_stream_line(stream) {
            match parse_error_header(&line) {
                Some((error_type, message)) => {
                    debug!(
                        "Resolved {} after {} traceback lines",
                        error_type, skipped
                    );
                    return Some(ErrorEvent::from_traceback(error_type, message));
                }
                // Frames, source excerpts and blank lines
                None => skipped += 1,
            }
        }

        debug!(
            "Stream closed inside a traceback after {} lines; no error resolved",
            skipped
        );
        None
    }
}

/// Iterator over the errors found in a stream
///
/// Ends when the stream is closed (EOF) or can no longer be read.
pub struct ErrorStream<R: BufRead> {
    reader: R,
    parser: ErrorStreamParser,
    line_number: usize,
}

impl<R: BufRead> ErrorStream<R> {
    /// Watch `reader` for errors of the given language
    pub fn new(reader: R, profile: LanguageProfile) -> Self {
        Self {
            reader,
            parser: ErrorStreamParser::new(profile),
            line_number: 0,
        }
    }

    /// Read the next line of the stream, `None` once the stream is closed
    pub fn next_line(&mut self) -> Option<StreamLine> {
        let text = read_stream_line(&mut self.reader)?;
        self.line_number += 1;
        Some(StreamLine::new(self.line_number, &text))
    }

    /// Number of lines read at top level so far
    pub fn lines_read(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> Iterator for ErrorStream<R> {
    type Item = ErrorEvent;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.next_line()?;
            if let Some(event) = self.parser.classify(&line.text, &mut self.reader) {
                debug!(
                    "Detected {} at line {} (traceback: {})",
                    event.error_type, line.number, event.has_traceback
                );
                return Some(event);
            }
        }
    }
}

/// Read one line, replacing invalid UTF-8. Returns `None` at EOF or on a read
/// error, both of which end the stream.
fn read_stream_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut buf = Vec::new();
    match reader.read_until(b'\n', &mut buf) {
        Ok(0) => None,
        Ok(_) => Some(String::from_utf8_lossy(&buf).into_owned()),
        Err(e) => {
            warn!("Failed to read from stream: {}", e);
            None
        }
    }
}
