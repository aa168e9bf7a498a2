//! # so-render
//!
//! Terminal rendering of scraped Stack Overflow posts.
//!
//! Bodies arrive as [`so_client::ContentNode`] sequences, so nothing here
//! depends on the HTML parser. Code blocks are lexed with syntect and each
//! token is colored through a [`Palette`]; tokens without a rule are printed
//! uncolored.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use so_render::{color_enabled, PostRenderer};
//!
//! let mut renderer = PostRenderer::new(std::io::stdout(), "python", color_enabled());
//! renderer.render_post(&post)?;
//! ```

pub mod error;
pub mod highlight;
pub mod renderer;

pub use error::RenderError;
pub use highlight::{Palette, Token, TokenHighlighter};
pub use renderer::{color_enabled, PostRenderer, SEPARATOR};
