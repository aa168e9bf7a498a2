//! Paginated search
//!
//! [`SearchPaginator::search`] returns a lazy iterator of post documents.
//! Pages are fetched one at a time, only when every candidate of the
//! previous page has been consumed.

use crate::client::{fetch_page, HttpFetch};
use crate::fetcher::{FetchSettings, PostFetcher};
use crate::search::{build_search_url, parse_search_page};
use crate::types::{PostDocument, PostSummary, Query};
use log::{debug, info};
use so_config::{AppConfig, OrderBy};
use std::collections::{HashSet, VecDeque};

/// Drives search pages and post fetches for queries
#[derive(Debug, Clone)]
pub struct SearchPaginator<F: HttpFetch> {
    fetcher: PostFetcher<F>,
    order_by: OrderBy,
    language: String,
}

impl<F: HttpFetch> SearchPaginator<F> {
    pub fn new(http: F, config: &AppConfig) -> Self {
        Self {
            fetcher: PostFetcher::new(http, FetchSettings::from(config)),
            order_by: config.order_by,
            language: config.language.clone(),
        }
    }

    /// Lazily search for `query`, starting at page 1
    pub fn search(&self, query: &Query) -> Posts<'_, F> {
        info!("Searching for '{}'", query);
        Posts {
            paginator: self,
            query: query.clone(),
            next_page: 1,
            pending: VecDeque::new(),
            seen: HashSet::new(),
            exhausted: false,
        }
    }

    fn search_url(&self, query: &Query, page: u32) -> String {
        build_search_url(
            &self.fetcher.settings().base_url,
            query,
            page,
            self.order_by,
            &self.language,
        )
    }
}

/// Lazy sequence of the post documents found for one query
///
/// Ends when a search page cannot be fetched or yields no new candidates.
/// A candidate link is visited at most once per sequence.
pub struct Posts<'a, F: HttpFetch> {
    paginator: &'a SearchPaginator<F>,
    query: Query,
    next_page: u32,
    pending: VecDeque<PostSummary>,
    seen: HashSet<String>,
    exhausted: bool,
}

impl<F: HttpFetch> Posts<'_, F> {
    /// Number of search pages requested so far
    pub fn pages_fetched(&self) -> u32 {
        self.next_page - 1
    }

    /// Fetch the next search page into `pending`
    ///
    /// Returns false when pagination is over.
    fn fill_from_next_page(&mut self) -> bool {
        let page_number = self.next_page;
        self.next_page += 1;

        let url = self.paginator.search_url(&self.query, page_number);
        let body = match fetch_page(self.paginator.fetcher.http(), &url) {
            Ok(body) => body,
            Err(e) => {
                debug!("Search page {} failed, stopping: {}", page_number, e);
                return false;
            }
        };

        let page = parse_search_page(&body, page_number);
        let total = page.candidates.len();
        let mut fresh = 0;
        for candidate in page.candidates {
            if let Some(href) = &candidate.href {
                if !self.seen.insert(href.clone()) {
                    continue;
                }
                fresh += 1;
            }
            self.pending.push_back(candidate);
        }

        debug!(
            "Search page {}: {} candidates, {} new",
            page.page_number, total, fresh
        );
        fresh > 0
    }
}

impl<F: HttpFetch> Iterator for Posts<'_, F> {
    type Item = PostDocument;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            while let Some(candidate) = self.pending.pop_front() {
                if let Some(post) = self.paginator.fetcher.fetch(&candidate) {
                    return Some(post);
                }
            }

            if self.exhausted {
                return None;
            }

            if !self.fill_from_next_page() {
                self.exhausted = true;
                self.pending.clear();
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::InMemoryFetcher;
    use crate::fetcher::tests::{post_page, BASE};

    fn config(verified_only: bool) -> AppConfig {
        AppConfig {
            base_url: BASE.to_string(),
            verified_only,
            ..AppConfig::default()
        }
    }

    fn search_url(query: &Query, page: u32) -> String {
        build_search_url(BASE, query, page, OrderBy::Relevance, "python")
    }

    /// A search page with one summary per `(id, status class)`
    fn results_page(entries: &[(u32, &str)]) -> String {
        let summaries: String = entries
            .iter()
            .map(|(id, status)| {
                format!(
                    r#"<div class="question-summary">
                         <div class="status {status}">1</div>
                         <h3><a class="question-hyperlink" href="/questions/{id}/q">Question {id}</a></h3>
                       </div>"#
                )
            })
            .collect();
        format!("<html><body>{}</body></html>", summaries)
    }

    fn five_with_one_accepted(first_id: u32) -> String {
        let entries: Vec<(u32, &str)> = (first_id..first_id + 5)
            .map(|id| {
                let status = if id == first_id { "answered-accepted" } else { "answered" };
                (id, status)
            })
            .collect();
        results_page(&entries)
    }

    fn with_posts(mut http: InMemoryFetcher, ids: impl IntoIterator<Item = u32>) -> InMemoryFetcher {
        for id in ids {
            http = http.with_page(
                format!("{}/questions/{}/q", BASE, id),
                post_page("answer accepted-answer"),
            );
        }
        http
    }

    #[test]
    fn test_two_pages_then_empty() {
        let query = Query::from_text("NameError");
        let http = InMemoryFetcher::new()
            .with_page(search_url(&query, 1), five_with_one_accepted(10))
            .with_page(search_url(&query, 2), five_with_one_accepted(20))
            .with_page(search_url(&query, 3), results_page(&[]));
        let http = with_posts(http, (10..15).chain(20..25));

        let paginator = SearchPaginator::new(&http, &config(true));
        let mut posts = paginator.search(&query);
        let docs: Vec<PostDocument> = posts.by_ref().collect();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].title, "Question 10");
        assert_eq!(docs[1].title, "Question 20");
        assert_eq!(http.request_count("/search?"), 3);
        assert_eq!(posts.pages_fetched(), 3);
        // Only accepted candidates were fetched
        assert_eq!(http.request_count("/questions/"), 2);
    }

    #[test]
    fn test_lazy_page_fetching() {
        let query = Query::from_text("NameError");
        let http = InMemoryFetcher::new()
            .with_page(search_url(&query, 1), five_with_one_accepted(10))
            .with_page(search_url(&query, 2), five_with_one_accepted(20));
        let http = with_posts(http, [10, 20]);

        let paginator = SearchPaginator::new(&http, &config(true));
        let mut posts = paginator.search(&query);

        assert!(posts.next().is_some());
        assert_eq!(http.request_count("/search?"), 1);
        assert!(posts.next().is_some());
        assert_eq!(http.request_count("/search?"), 2);
    }

    #[test]
    fn test_failed_search_page_stops() {
        let query = Query::from_text("KeyError");
        let http = InMemoryFetcher::new()
            .with_page(search_url(&query, 1), five_with_one_accepted(10))
            .with_status(search_url(&query, 2), 503)
            .with_page(search_url(&query, 3), five_with_one_accepted(30));
        let http = with_posts(http, [10, 30]);

        let paginator = SearchPaginator::new(&http, &config(true));
        let docs: Vec<_> = paginator.search(&query).collect();

        assert_eq!(docs.len(), 1);
        assert_eq!(http.request_count("/search?"), 2);
    }

    #[test]
    fn test_first_page_failure_yields_nothing() {
        let query = Query::from_text("KeyError");
        let http = InMemoryFetcher::new().with_transport_error(search_url(&query, 1));
        let paginator = SearchPaginator::new(&http, &config(false));

        let mut posts = paginator.search(&query);
        assert!(posts.next().is_none());
        assert!(posts.next().is_none());
        assert_eq!(http.requests().len(), 1);
    }

    #[test]
    fn test_failed_post_fetch_skips_candidate() {
        let query = Query::from_text("TypeError");
        let http = InMemoryFetcher::new()
            .with_page(
                search_url(&query, 1),
                results_page(&[(1, "answered-accepted"), (2, "answered-accepted")]),
            )
            .with_status(format!("{}/questions/1/q", BASE), 500);
        let http = with_posts(http, [2]);

        let paginator = SearchPaginator::new(&http, &config(true));
        let docs: Vec<_> = paginator.search(&query).collect();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].url, format!("{}/questions/2/q", BASE));
        // Page 2 is unknown to the mock (404) and ends the sequence
        assert_eq!(http.request_count("/search?"), 2);
    }

    #[test]
    fn test_repeated_page_is_not_revisited() {
        let query = Query::from_text("ValueError");
        let page = results_page(&[(1, "answered-accepted"), (2, "answered")]);
        let http = InMemoryFetcher::new()
            .with_page(search_url(&query, 1), page.clone())
            .with_page(search_url(&query, 2), page.clone())
            .with_page(search_url(&query, 3), page);
        let http = with_posts(http, [1, 2]);

        let paginator = SearchPaginator::new(&http, &config(false));
        let docs: Vec<_> = paginator.search(&query).collect();

        assert_eq!(docs.len(), 2);
        assert_eq!(http.request_count("/questions/1/q"), 1);
        assert_eq!(http.request_count("/search?"), 2);
    }

    #[test]
    fn test_never_more_documents_than_passing_candidates() {
        let query = Query::from_text("ImportError");
        let http = InMemoryFetcher::new()
            .with_page(
                search_url(&query, 1),
                results_page(&[(1, "answered-accepted"), (2, "answered"), (3, "unanswered")]),
            )
            .with_page(search_url(&query, 2), results_page(&[(4, "answered")]));
        let http = with_posts(http, 1..=4);

        let strict = SearchPaginator::new(&http, &config(true));
        assert_eq!(strict.search(&query).count(), 1);

        let lenient = SearchPaginator::new(&http, &config(false));
        assert_eq!(lenient.search(&query).count(), 3);
    }
}
