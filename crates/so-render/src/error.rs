//! Rendering errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to write to the terminal: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to lex code block: {0}")]
    Highlight(String),
}
