//! Post fetching
//!
//! Decides whether a search candidate is worth fetching, fetches the post
//! page and extracts question, answer and optional comments.

use crate::client::{fetch_page, HttpFetch};
use crate::content::{absolute_url, classify_body};
use crate::markup::{self, find_all_by_class, find_first_by_any_class, find_first_by_class, Markup};
use crate::types::{AcceptancePolicy, ContentNode, PostDocument, PostSummary};
use log::debug;
use scraper::ElementRef;
use so_config::AppConfig;

/// Class of the question container
pub const QUESTION_CLASS: &str = "question";

/// Answer containers, the accepted answer first
pub const ANSWER_CLASSES: &[&str] = &["accepted-answer", "answer"];

/// Classes of the body inside a question or answer container
pub const BODY_CLASSES: &[&str] = &["post-text", "js-post-body"];

const COMMENT_CLASS: &str = "comment-body";
const COMMENT_TEXT_CLASS: &str = "comment-copy";

/// Settings of the fetcher taken from the app config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    pub base_url: String,
    pub policy: AcceptancePolicy,
    /// Comments per question/answer, `None` when comments are off
    pub comment_limit: Option<usize>,
}

impl From<&AppConfig> for FetchSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            policy: AcceptancePolicy::from_verified_only(config.verified_only),
            comment_limit: config.display_comments.then_some(config.max_comments),
        }
    }
}

/// Fetches and parses the full post behind a search candidate
#[derive(Debug, Clone)]
pub struct PostFetcher<F: HttpFetch> {
    http: F,
    settings: FetchSettings,
}

impl<F: HttpFetch> PostFetcher<F> {
    pub fn new(http: F, settings: FetchSettings) -> Self {
        Self { http, settings }
    }

    pub fn http(&self) -> &F {
        &self.http
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    /// Fetch the post behind `summary`
    ///
    /// Returns None without any request if the candidate fails the
    /// acceptance policy or has no link, and None if the request fails or
    /// the page lacks a question or an answer.
    pub fn fetch(&self, summary: &PostSummary) -> Option<PostDocument> {
        if !summary.passes(self.settings.policy) {
            debug!("Skipping '{}': no qualifying answer", summary.title);
            return None;
        }

        let Some(href) = summary.href.as_deref() else {
            debug!("Skipping '{}': no post link", summary.title);
            return None;
        };
        let url = absolute_url(&self.settings.base_url, href);

        let body = match fetch_page(&self.http, &url) {
            Ok(body) => body,
            Err(e) => {
                debug!("No post fetched: {}", e);
                return None;
            }
        };

        let post = parse_post(&body, &url, &summary.title, &self.settings);
        if post.is_none() {
            debug!("Dropping {}: question or answer missing", url);
        }
        post
    }
}

/// Extract a post document from a post page
///
/// Returns None unless both the question and the answer body are found and
/// non-empty.
pub fn parse_post(body: &str, url: &str, title: &str, settings: &FetchSettings) -> Option<PostDocument> {
    let doc = Markup::parse(body);
    let root = doc.root();

    let question = find_first_by_class(root, QUESTION_CLASS)?;
    let answer = find_first_by_any_class(root, ANSWER_CLASSES)?;

    let question_body = post_body(question, &settings.base_url)?;
    let answer_body = post_body(answer, &settings.base_url)?;

    let post = PostDocument {
        url: url.to_string(),
        title: title.to_string(),
        question_body,
        answer_body,
        question_comments: settings.comment_limit.map(|limit| comments(question, limit)),
        answer_comments: settings.comment_limit.map(|limit| comments(answer, limit)),
    };

    post.is_renderable().then_some(post)
}

fn post_body(container: ElementRef<'_>, base_url: &str) -> Option<Vec<ContentNode>> {
    let body = find_first_by_any_class(container, BODY_CLASSES)?;
    Some(classify_body(body, base_url))
}

/// Comment texts of a container; comments without text are skipped
fn comments(container: ElementRef<'_>, limit: usize) -> Vec<String> {
    find_all_by_class(container, COMMENT_CLASS, Some(limit))
        .into_iter()
        .filter_map(|comment| find_first_by_class(comment, COMMENT_TEXT_CLASS))
        .map(|copy| markup::text(copy).trim().to_string())
        .collect()
}
