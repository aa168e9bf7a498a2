//! Answer to the "did this solve your error?" prompt

use std::io::{BufRead, Write};

pub const PROMPT: &str = "Did this solve your error? (Y/n or custom query): ";

/// What the user wants after seeing a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The error is solved
    Done,
    /// Show the next post for the same query
    Next,
    /// Search again with free-form text
    Query(String),
}

impl Decision {
    /// Interpret one input line; blank input is invalid
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        match input {
            "" => None,
            "Y" | "y" | "yes" => Some(Decision::Done),
            "n" | "N" | "no" => Some(Decision::Next),
            text => Some(Decision::Query(text.to_string())),
        }
    }
}

/// Prompt until a valid decision is entered
///
/// End of input counts as [`Decision::Done`].
pub fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> std::io::Result<Decision> {
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(Decision::Done);
        }

        match Decision::parse(&line) {
            Some(decision) => return Ok(decision),
            None => writeln!(
                out,
                "{} is not valid input! Please try again.",
                line.trim_end_matches(['\r', '\n'])
            )?,
        }
    }
}
