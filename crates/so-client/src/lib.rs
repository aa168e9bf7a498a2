//! Stack Overflow search client
//!
//! This crate turns a query into a lazy sequence of scraped posts. The HTTP
//! transport sits behind the `HttpFetch` trait, so the whole pipeline can run
//! against canned pages.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              SearchPaginator                     │
//! │  - search(query) -> Posts (lazy iterator)        │
//! └─────────────────────────────────────────────────┘
//!                        │ per candidate
//!                        ▼
//! ┌─────────────────────────────────────────────────┐
//! │              PostFetcher                         │
//! │  - acceptance policy, post page, body parsing    │
//! └─────────────────────────────────────────────────┘
//!                        │
//!        ┌───────────────┴───────────────┐
//!        ▼                               ▼
//! ┌─────────────────┐         ┌─────────────────────┐
//! │ UreqFetcher     │         │ InMemoryFetcher     │
//! │ (network)       │         │ (canned pages)      │
//! └─────────────────┘         └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use so_client::{Query, SearchPaginator, UreqFetcher};
//! use so_config::AppConfig;
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let http = UreqFetcher::new(Duration::from_secs(config.fetch_timeout_secs));
//! let paginator = SearchPaginator::new(http, &config);
//!
//! for post in paginator.search(&Query::from_text("IndentationError")).take(3) {
//!     println!("{}", post.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod content;
pub mod fetcher;
pub mod markup;
pub mod paginator;
pub mod search;
pub mod types;
pub mod ureq_client;

pub use client::{fetch_page, FetchError, HttpFetch, HttpResponse, InMemoryFetcher};
pub use fetcher::{parse_post, FetchSettings, PostFetcher};
pub use paginator::{Posts, SearchPaginator};
pub use search::{build_search_url, parse_search_page};
pub use types::{AcceptancePolicy, ContentNode, ListItem, PostDocument, PostSummary, Query, SearchPage};
pub use ureq_client::UreqFetcher;
