//! Post rendering
//!
//! Writes a [`PostDocument`] to a terminal, one rule per [`ContentNode`]
//! variant. Colors are emitted with crossterm commands and can be switched
//! off, which leaves the exact same text.

use crate::error::RenderError;
use crate::highlight::{Palette, TokenHighlighter};
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetForegroundColor};
use so_client::{ContentNode, ListItem, PostDocument};
use std::io::{IsTerminal, Write};

/// Line between question and answer blocks
pub const SEPARATOR: &str = "~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~";

const HEADER_COLOR: Color = Color::DarkRed;
const TEXT_COLOR: Color = Color::Grey;
const QUOTE_COLOR: Color = Color::DarkYellow;
const LIST_COLOR: Color = Color::DarkGreen;

/// Whether stdout should receive color codes
///
/// Disabled by a `NO_COLOR` environment variable or when stdout is not a
/// terminal.
pub fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

/// Renders posts to a writer
pub struct PostRenderer<W: Write> {
    out: W,
    use_color: bool,
    language: String,
    highlighter: TokenHighlighter,
    palette: Palette,
    max_comments: usize,
}

impl<W: Write> PostRenderer<W> {
    pub fn new(out: W, language: &str, use_color: bool) -> Self {
        Self {
            out,
            use_color,
            language: language.to_string(),
            highlighter: TokenHighlighter::new(),
            palette: Palette::for_language(language),
            max_comments: usize::MAX,
        }
    }

    /// Show at most `max` comments per question/answer
    pub fn with_max_comments(mut self, max: usize) -> Self {
        self.max_comments = max;
        self
    }

    /// The underlying writer, for output that is not part of a post
    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Render question, answer and their comments
    ///
    /// Posts without a question or an answer body are skipped entirely.
    pub fn render_post(&mut self, post: &PostDocument) -> Result<(), RenderError> {
        if !post.is_renderable() {
            log::debug!("Not rendering incomplete post {}", post.url);
            return Ok(());
        }

        self.line(SEPARATOR, Some(HEADER_COLOR), false)?;
        self.line("Question:", Some(HEADER_COLOR), false)?;
        self.render_body(&post.question_body)?;
        self.render_comments(post.question_comments.as_deref())?;

        self.line(SEPARATOR, Some(HEADER_COLOR), false)?;
        self.line("Answer:", Some(HEADER_COLOR), false)?;
        self.render_body(&post.answer_body)?;
        self.render_comments(post.answer_comments.as_deref())?;

        self.line(SEPARATOR, Some(HEADER_COLOR), false)?;
        self.out.flush()?;
        Ok(())
    }

    /// Render a question or answer body
    pub fn render_body(&mut self, body: &[ContentNode]) -> Result<(), RenderError> {
        for node in body {
            match node {
                ContentNode::Heading(text) => self.line(text, Some(TEXT_COLOR), true)?,
                ContentNode::Paragraph(text) => self.line(text, Some(TEXT_COLOR), false)?,
                ContentNode::Quote(text) => {
                    self.line(&format!("    {}", text), Some(QUOTE_COLOR), false)?
                }
                ContentNode::List(items) => self.render_list(items)?,
                ContentNode::CodeBlock(source) => self.render_code(source)?,
            }
        }
        Ok(())
    }

    fn render_list(&mut self, items: &[ListItem]) -> Result<(), RenderError> {
        for item in items {
            self.line(&format!("    - {}", item.text), Some(LIST_COLOR), true)?;
            if let Some(link) = &item.link {
                self.line(&format!("        link to: {}", link), Some(LIST_COLOR), false)?;
            }
        }
        Ok(())
    }

    fn render_code(&mut self, source: &str) -> Result<(), RenderError> {
        writeln!(self.out)?;
        let tokens = self.highlighter.tokenize(source, &self.language);
        for token in &tokens {
            let color = self.palette.color_for(token);
            self.styled(&token.text, color, false)?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    /// Render comments, if any were fetched
    pub fn render_comments(&mut self, comments: Option<&[String]>) -> Result<(), RenderError> {
        let Some(comments) = comments.filter(|c| !c.is_empty()) else {
            return Ok(());
        };

        self.line("\nComments:", Some(HEADER_COLOR), false)?;
        for comment in comments.iter().take(self.max_comments) {
            self.line(comment, None, false)?;
        }
        Ok(())
    }

    fn line(&mut self, text: &str, color: Option<Color>, bold: bool) -> Result<(), RenderError> {
        self.styled(text, color, bold)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn styled(&mut self, text: &str, color: Option<Color>, bold: bool) -> std::io::Result<()> {
        if !self.use_color || (color.is_none() && !bold) {
            return write!(self.out, "{}", text);
        }

        if let Some(color) = color {
            queue!(self.out, SetForegroundColor(color))?;
        }
        if bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        queue!(self.out, Print(text), SetAttribute(Attribute::Reset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plain_output(render: impl FnOnce(&mut PostRenderer<Vec<u8>>) -> Result<(), RenderError>) -> String {
        let mut renderer = PostRenderer::new(Vec::new(), "python", false);
        render(&mut renderer).unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    fn post() -> PostDocument {
        PostDocument {
            url: "https://stackoverflow.com/questions/1".to_string(),
            title: "t".to_string(),
            question_body: vec![ContentNode::Paragraph("Why?".to_string())],
            answer_body: vec![ContentNode::Paragraph("Because.".to_string())],
            question_comments: None,
            answer_comments: None,
        }
    }

    #[test]
    fn test_body_rules() {
        let body = vec![
            ContentNode::Heading("Title".to_string()),
            ContentNode::Paragraph("Text".to_string()),
            ContentNode::Quote("Quoted".to_string()),
            ContentNode::List(vec![
                ListItem {
                    text: "one".to_string(),
                    link: None,
                },
                ListItem {
                    text: "two".to_string(),
                    link: Some("https://docs.python.org".to_string()),
                },
            ]),
            ContentNode::CodeBlock("x = 1".to_string()),
        ];

        let out = plain_output(|r| r.render_body(&body));
        assert_eq!(
            out,
            "Title\nText\n    Quoted\n    - one\n    - two\n        link to: https://docs.python.org\n\nx = 1\n"
        );
    }

    #[test]
    fn test_post_layout() {
        let out = plain_output(|r| r.render_post(&post()));
        let expected = format!(
            "{sep}\nQuestion:\nWhy?\n{sep}\nAnswer:\nBecause.\n{sep}\n",
            sep = SEPARATOR
        );
        assert_eq!(out, expected);
        assert_eq!(out.matches("Question:").count(), 1);
        assert_eq!(out.matches("Answer:").count(), 1);
    }

    #[test]
    fn test_comments() {
        let mut post = post();
        post.question_comments = Some(vec!["c1".to_string(), "c2".to_string(), "c3".to_string()]);
        post.answer_comments = Some(Vec::new());

        let mut renderer = PostRenderer::new(Vec::new(), "python", false).with_max_comments(2);
        renderer.render_post(&post).unwrap();
        let out = String::from_utf8(renderer.into_inner()).unwrap();

        let expected = format!(
            "{sep}\nQuestion:\nWhy?\n\nComments:\nc1\nc2\n{sep}\nAnswer:\nBecause.\n{sep}\n",
            sep = SEPARATOR
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_incomplete_post_is_not_rendered() {
        let mut post = post();
        post.answer_body.clear();
        assert_eq!(plain_output(|r| r.render_post(&post)), "");
    }

    #[test]
    fn test_code_keeps_source_text() {
        let source = "import os\nprint(os.getcwd(), 'x')  # cwd\n";
        let out = plain_output(|r| r.render_body(&[ContentNode::CodeBlock(source.to_string())]));
        assert_eq!(out, format!("\n{}\n", source));
    }

    #[test]
    fn test_colored_output() {
        let mut renderer = PostRenderer::new(Vec::new(), "python", true);
        renderer
            .render_body(&[
                ContentNode::Quote("q".to_string()),
                ContentNode::CodeBlock("return 'a'".to_string()),
            ])
            .unwrap();
        let out = String::from_utf8(renderer.into_inner()).unwrap();

        assert!(out.contains('\u{1b}'));
        assert!(out.contains("    q"));
        assert!(out.contains("return"));
        // Quote marks are their own tokens, colored like the string body
        assert!(out.contains("\u{1b}[38;5;3m'"));
        assert!(out.contains("\u{1b}[38;5;3ma"));
        assert_eq!(strip_escapes(&out), "    q\n\nreturn 'a'\n");
    }

    fn strip_escapes(text: &str) -> String {
        let mut plain = String::new();
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                // CSI sequences end with a letter
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                plain.push(c);
            }
        }
        plain
    }
}
