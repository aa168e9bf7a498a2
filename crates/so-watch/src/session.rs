//! Interactive session
//!
//! Listens to the captured terminal stream, searches for every detected
//! error and lets the user page through the results.

use crate::decision::{self, Decision};
use anyhow::Result;
use log::{debug, info};
use so_client::{HttpFetch, Query, SearchPaginator};
use so_config::AppConfig;
use so_render::PostRenderer;
use std::io::{BufRead, Write};
use traceback_parser::{ErrorEvent, ErrorStream, LanguageProfile};

pub const LISTENING_BANNER: &str = "🥞 Listening for errors...";
pub const NO_RESULTS: &str = "No questions/answers found.";
pub const NO_MORE_RESULTS: &str = "No more questions/answers.";

/// How browsing the results of one query ended
#[derive(Debug, Clone, PartialEq, Eq)]
enum Browse {
    /// Solved, out of posts or out of input
    Finished,
    /// The user asked something else
    Requery(Query),
}

/// Drives detection, search, rendering and the decision prompt
pub struct SessionController<F: HttpFetch, I: BufRead, W: Write> {
    paginator: SearchPaginator<F>,
    renderer: PostRenderer<W>,
    input: I,
    profile: LanguageProfile,
}

impl<F: HttpFetch, I: BufRead, W: Write> SessionController<F, I, W> {
    /// # Arguments
    ///
    /// * `http` - Transport for search and post pages
    /// * `config` - Effective configuration
    /// * `profile` - Error grammar of the watched language
    /// * `input` - User answers to the decision prompt
    /// * `renderer` - Terminal output
    pub fn new(
        http: F,
        config: &AppConfig,
        profile: LanguageProfile,
        input: I,
        renderer: PostRenderer<W>,
    ) -> Self {
        Self {
            paginator: SearchPaginator::new(http, config),
            renderer,
            input,
            profile,
        }
    }

    /// Watch `stream` until it closes
    pub fn listen<R: BufRead>(&mut self, stream: R) -> Result<()> {
        self.banner()?;

        let mut errors = ErrorStream::new(stream, self.profile.clone());
        while let Some(event) = errors.next() {
            info!(
                "Detected {} (traceback: {}) after line {}",
                event.error_type,
                event.has_traceback,
                errors.lines_read()
            );
            self.handle_error(&event)?;
            self.banner()?;
        }

        info!("Capture stream closed after {} lines", errors.lines_read());
        Ok(())
    }

    /// Search for a detected error
    pub fn handle_error(&mut self, event: &ErrorEvent) -> Result<()> {
        self.run_query(Query::new(vec![event.error_type.clone()]))
    }

    /// Show results for `query` and any follow-up queries the user types
    ///
    /// Returns once the user is done or a query runs out of posts; earlier
    /// queries are never resumed.
    pub fn run_query(&mut self, query: Query) -> Result<()> {
        let mut query = query;
        loop {
            match self.browse(&query)? {
                Browse::Finished => return Ok(()),
                Browse::Requery(next) => {
                    info!("Custom query '{}' replaces '{}'", next, query);
                    query = next;
                }
            }
        }
    }

    fn browse(&mut self, query: &Query) -> Result<Browse> {
        let mut posts = self.paginator.search(query);
        let mut shown = 0usize;

        loop {
            let Some(post) = posts.next() else {
                let message = if shown == 0 { NO_RESULTS } else { NO_MORE_RESULTS };
                writeln!(self.renderer.writer(), "{}", message)?;
                debug!("'{}' exhausted after {} posts", query, shown);
                return Ok(Browse::Finished);
            };

            self.renderer.render_post(&post)?;
            shown += 1;

            match decision::prompt(&mut self.input, self.renderer.writer())? {
                Decision::Done => return Ok(Browse::Finished),
                Decision::Next => continue,
                Decision::Query(text) => return Ok(Browse::Requery(Query::from_text(&text))),
            }
        }
    }

    fn banner(&mut self) -> Result<()> {
        let out = self.renderer.writer();
        writeln!(out, "{}", LISTENING_BANNER)?;
        out.flush()?;
        Ok(())
    }
}
