//! Code lexer using syntect.

use crate::error::RenderError;
use log::warn;
use std::collections::HashMap;
use syntect::easy::ScopeRegionIterator;
use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// A lexed piece of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Scope stack of the token, innermost scope last, space separated
    /// (e.g. `source.python string.quoted.double.python`). Empty for text
    /// that could not be lexed.
    pub kind: String,
    pub text: String,
}

impl Token {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: String::new(),
            text: text.into(),
        }
    }

    /// Scopes from innermost to outermost
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.kind.split_whitespace().rev()
    }
}

/// Splits code blocks into scoped tokens.
pub struct TokenHighlighter {
    /// Syntax definitions.
    syntax_set: SyntaxSet,
    /// Syntax index by language name.
    syntax_cache: HashMap<String, usize>,
}

impl std::fmt::Debug for TokenHighlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenHighlighter")
            .field("cached_syntaxes", &self.syntax_cache.len())
            .finish()
    }
}

impl Default for TokenHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenHighlighter {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            syntax_cache: HashMap::new(),
        }
    }

    /// Lex `source` as `language`.
    ///
    /// The concatenated token texts always equal `source`. Unknown
    /// languages yield one plain token; a lexing failure turns the rest of
    /// the block into a plain token.
    pub fn tokenize(&mut self, source: &str, language: &str) -> Vec<Token> {
        if source.is_empty() {
            return Vec::new();
        }

        let idx = self.syntax_index(language);
        let syntax = self
            .syntax_set
            .syntaxes()
            .get(idx)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut state = ParseState::new(syntax);
        let mut stack = ScopeStack::new();
        let mut tokens = Vec::new();
        let mut consumed = 0;

        for line in LinesWithEndings::from(source) {
            match self.tokenize_line(&mut state, &mut stack, line) {
                Ok(line_tokens) => tokens.extend(line_tokens),
                Err(e) => {
                    warn!("{}, rendering the rest of the block as plain text", e);
                    tokens.push(Token::plain(&source[consumed..]));
                    return tokens;
                }
            }
            consumed += line.len();
        }

        tokens
    }

    fn tokenize_line(
        &self,
        state: &mut ParseState,
        stack: &mut ScopeStack,
        line: &str,
    ) -> Result<Vec<Token>, RenderError> {
        let ops = state
            .parse_line(line, &self.syntax_set)
            .map_err(|e| RenderError::Highlight(e.to_string()))?;

        let mut tokens = Vec::new();
        for (text, op) in ScopeRegionIterator::new(&ops, line) {
            stack
                .apply(op)
                .map_err(|e| RenderError::Highlight(format!("{:?}", e)))?;
            if text.is_empty() {
                continue;
            }
            tokens.push(Token {
                kind: scope_kind(stack),
                text: text.to_string(),
            });
        }
        Ok(tokens)
    }

    /// Get syntax index for a language name (cached).
    fn syntax_index(&mut self, language: &str) -> usize {
        let key = language.to_lowercase();
        if let Some(&idx) = self.syntax_cache.get(&key) {
            return idx;
        }

        let syntax: &SyntaxReference = self
            .syntax_set
            .find_syntax_by_token(&key)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let idx = self
            .syntax_set
            .syntaxes()
            .iter()
            .position(|s| s.name == syntax.name)
            .unwrap_or(0);

        self.syntax_cache.insert(key, idx);
        idx
    }
}

fn scope_kind(stack: &ScopeStack) -> String {
    stack
        .as_slice()
        .iter()
        .map(|scope| scope.build_string())
        .collect::<Vec<_>>()
        .join(" ")
}
