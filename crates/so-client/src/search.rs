//! Search URL construction and search-results parsing

use crate::markup::{self, find_all_by_class, find_first_by_any_class, has_class, Markup};
use crate::types::{PostSummary, Query, SearchPage};
use so_config::OrderBy;
use url::form_urlencoded;

/// Classes marking one search result, classic layout first
pub const SUMMARY_CLASSES: &[&str] = &["question-summary", "s-post-summary"];

/// Classes marking a result whose question has an accepted answer
pub const ACCEPTED_CLASSES: &[&str] = &["answered-accepted", "has-accepted-answer"];

/// Classes marking a result whose question has any answer
pub const ANSWERED_CLASSES: &[&str] = &["answered", "has-answers"];

/// Classes of the link to the full post
pub const LINK_CLASSES: &[&str] = &["question-hyperlink", "s-link"];

/// Build a search URL
///
/// Given `base_url = "https://stackoverflow.com"`, page 1, `Relevance`,
/// `python` and the query `Test Query`, the URL is:
/// `https://stackoverflow.com/search?page=1&tab=Relevance&q=%5Bpython%5D+Test+Query`
pub fn build_search_url(
    base_url: &str,
    query: &Query,
    page: u32,
    order_by: OrderBy,
    language: &str,
) -> String {
    let mut url = format!(
        "{}/search?page={}&tab={}&q=%5B{}%5D",
        base_url.trim_end_matches('/'),
        page,
        order_by,
        language
    );

    for term in query.terms() {
        url.push('+');
        url.extend(form_urlencoded::byte_serialize(term.as_bytes()));
    }

    url
}

/// Extract the post summaries of a search-results page
pub fn parse_search_page(body: &str, page_number: u32) -> SearchPage {
    let doc = Markup::parse(body);
    let root = doc.root();

    let candidates = SUMMARY_CLASSES
        .iter()
        .map(|class| find_all_by_class(root, class, None))
        .find(|summaries| !summaries.is_empty())
        .unwrap_or_default()
        .into_iter()
        .map(|summary| {
            let link = find_first_by_any_class(summary, LINK_CLASSES);
            PostSummary {
                href: link
                    .and_then(|a| markup::attr(a, "href"))
                    .map(String::from),
                title: link
                    .map(|a| markup::text(a).trim().to_string())
                    .unwrap_or_default(),
                accepted: has_marker(summary, ACCEPTED_CLASSES),
                answered: has_marker(summary, ANSWERED_CLASSES),
            }
        })
        .collect();

    SearchPage {
        page_number,
        candidates,
    }
}

/// Whether the summary or any of its descendants carries one of `classes`
fn has_marker(summary: scraper::ElementRef<'_>, classes: &[&str]) -> bool {
    classes.iter().any(|class| has_class(summary, class))
        || find_first_by_any_class(summary, classes).is_some()
}
