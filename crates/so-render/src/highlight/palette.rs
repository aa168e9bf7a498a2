//! Token kind to color mapping.

use super::highlighter::Token;
use crossterm::style::Color;

/// Scope prefix rules for Python code.
const PYTHON_RULES: &[(&str, Color)] = &[
    ("keyword.control", Color::DarkBlue),
    ("keyword.other", Color::DarkBlue),
    ("keyword.operator.logical", Color::DarkBlue),
    ("storage.type", Color::DarkBlue),
    ("storage.modifier", Color::DarkBlue),
    ("variable.language", Color::DarkBlue),
    ("support.function.builtin", Color::DarkBlue),
    ("constant.numeric", Color::DarkGreen),
    ("comment", Color::DarkGreen),
    ("string", Color::DarkYellow),
];

/// Maps token kinds to terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    rules: &'static [(&'static str, Color)],
}

impl Palette {
    pub fn python() -> Self {
        Self {
            rules: PYTHON_RULES,
        }
    }

    /// A palette without rules; every token is uncolored.
    pub fn plain() -> Self {
        Self { rules: &[] }
    }

    pub fn for_language(language: &str) -> Self {
        match language.to_lowercase().as_str() {
            "python" => Self::python(),
            _ => Self::plain(),
        }
    }

    /// Color of a token, `None` for kinds without a rule.
    ///
    /// Scopes are checked innermost first; the first scope with a rule
    /// decides.
    pub fn color_for(&self, token: &Token) -> Option<Color> {
        token
            .scopes()
            .find_map(|scope| self.rule_for_scope(scope))
    }

    fn rule_for_scope(&self, scope: &str) -> Option<Color> {
        self.rules
            .iter()
            .find(|(prefix, _)| {
                scope == *prefix
                    || scope
                        .strip_prefix(*prefix)
                        .is_some_and(|rest| rest.starts_with('.'))
            })
            .map(|(_, color)| *color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: &str) -> Token {
        Token {
            kind: kind.to_string(),
            text: "x".to_string(),
        }
    }

    #[test]
    fn test_python_colors() {
        let palette = Palette::python();
        assert_eq!(
            palette.color_for(&token("source.python keyword.control.flow.return.python")),
            Some(Color::DarkBlue)
        );
        assert_eq!(
            palette.color_for(&token("source.python constant.numeric.integer.decimal.python")),
            Some(Color::DarkGreen)
        );
        assert_eq!(
            palette.color_for(&token("source.python string.quoted.double.python")),
            Some(Color::DarkYellow)
        );
        assert_eq!(
            palette.color_for(&token("source.python comment.line.number-sign.python")),
            Some(Color::DarkGreen)
        );
    }

    #[test]
    fn test_innermost_scope_wins() {
        let palette = Palette::python();
        let kind = "source.python string.quoted.double.python constant.character.escape.python";
        // The escape has no rule, so the enclosing string decides
        assert_eq!(palette.color_for(&token(kind)), Some(Color::DarkYellow));

        let kind = "source.python comment.line.python keyword.other.python";
        assert_eq!(palette.color_for(&token(kind)), Some(Color::DarkBlue));
    }

    #[test]
    fn test_unknown_kinds_are_uncolored() {
        let palette = Palette::python();
        assert_eq!(palette.color_for(&token("source.python meta.function-call.python")), None);
        assert_eq!(palette.color_for(&token("")), None);
        assert_eq!(palette.color_for(&Token::plain("x")), None);
        // Prefix must end at a scope boundary
        assert_eq!(palette.color_for(&token("stringly.typed")), None);
    }

    #[test]
    fn test_plain_palette() {
        let palette = Palette::for_language("rust");
        assert_eq!(palette.color_for(&token("source.rust string.quoted.rust")), None);
        assert_eq!(Palette::for_language("Python"), Palette::python());
    }
}
