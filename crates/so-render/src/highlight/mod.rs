//! Lexing and coloring of code blocks.

mod highlighter;
mod palette;

pub use highlighter::{Token, TokenHighlighter};
pub use palette::Palette;
