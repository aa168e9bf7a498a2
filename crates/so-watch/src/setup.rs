//! Questions asked by `init` before writing a configuration file

use so_config::app_config::SUPPORTED_LANGUAGES;
use so_config::{AppConfig, OrderBy};
use std::io::{self, BufRead, Write};

/// Ask for each setting, starting from the defaults
///
/// A blank answer keeps the default shown in brackets. Once input ends,
/// the remaining settings keep their defaults.
pub fn ask_config<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<AppConfig> {
    let mut config = AppConfig::default();
    let mut questions = Questions {
        input,
        out,
        closed: false,
    };

    if let Some(language) = questions.ask(
        "What language do you want to capture errors for?",
        &config.language,
        parse_language,
    )? {
        config.language = language;
    }
    if let Some(order_by) = questions.ask(
        "How do you want to order posts? (Relevance/Newest/Active/Votes)",
        config.order_by.as_str(),
        |answer| answer.parse::<OrderBy>().ok(),
    )? {
        config.order_by = order_by;
    }
    if let Some(verified_only) = questions.ask(
        "Do you want to only display posts with verified answers?",
        yes_no(config.verified_only),
        parse_yes_no,
    )? {
        config.verified_only = verified_only;
    }
    if let Some(display_comments) = questions.ask(
        "Do you want to display comments with questions and answers?",
        yes_no(config.display_comments),
        parse_yes_no,
    )? {
        config.display_comments = display_comments;
    }
    if config.display_comments {
        if let Some(max_comments) = questions.ask(
            "What's the max number of comments to display per question or answer?",
            &config.max_comments.to_string(),
            |answer| answer.parse::<usize>().ok().filter(|n| *n >= 1),
        )? {
            config.max_comments = max_comments;
        }
    }

    Ok(config)
}

struct Questions<'a, R, W> {
    input: &'a mut R,
    out: &'a mut W,
    closed: bool,
}

impl<R: BufRead, W: Write> Questions<'_, R, W> {
    /// `None` keeps the default
    fn ask<T>(
        &mut self,
        question: &str,
        default: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> io::Result<Option<T>> {
        while !self.closed {
            write!(self.out, "{} [{}]: ", question, default)?;
            self.out.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.out)?;
                self.closed = true;
                break;
            }

            let answer = line.trim();
            if answer.is_empty() {
                return Ok(None);
            }
            match parse(answer) {
                Some(value) => return Ok(Some(value)),
                None => writeln!(self.out, "{} is not valid input! Please try again.", answer)?,
            }
        }
        Ok(None)
    }
}

fn parse_language(answer: &str) -> Option<String> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|language| language.eq_ignore_ascii_case(answer))
        .map(|language| language.to_string())
}

fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Y/n"
    } else {
        "y/N"
    }
}
