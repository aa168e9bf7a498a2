//! Search and post data types
//!
//! These types are owned copies of what was scraped from the site, so that
//! rendering never depends on the HTML parser.

/// Search terms sent to the site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    terms: Vec<String>,
}

impl Query {
    pub fn new(terms: Vec<String>) -> Self {
        Self { terms }
    }

    /// Split free-form text into terms
    pub fn from_text(text: &str) -> Self {
        Self::new(text.split_whitespace().map(String::from).collect())
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.terms.join(" "))
    }
}

/// Which candidates are worth fetching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptancePolicy {
    /// Only posts with an accepted answer
    AcceptedOnly,
    /// Posts with any answer, accepted or not
    Answered,
}

impl AcceptancePolicy {
    pub fn from_verified_only(verified_only: bool) -> Self {
        if verified_only {
            AcceptancePolicy::AcceptedOnly
        } else {
            AcceptancePolicy::Answered
        }
    }
}

/// A search result entry referencing a full post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSummary {
    /// Relative link to the post (e.g. `/questions/123/title`)
    pub href: Option<String>,

    /// Question title as shown in the results
    pub title: String,

    /// The question has an accepted answer
    pub accepted: bool,

    /// The question has at least one answer
    pub answered: bool,
}

impl PostSummary {
    /// Whether the candidate passes the acceptance policy
    pub fn passes(&self, policy: AcceptancePolicy) -> bool {
        match policy {
            AcceptancePolicy::AcceptedOnly => self.accepted,
            AcceptancePolicy::Answered => self.accepted || self.answered,
        }
    }
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage {
    pub page_number: u32,
    pub candidates: Vec<PostSummary>,
}

/// A list entry with its optional link target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub text: String,
    pub link: Option<String>,
}

/// A classified element of a question or answer body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
    Heading(String),
    Paragraph(String),
    Quote(String),
    List(Vec<ListItem>),
    /// Raw source text, already flattened out of any token markup
    CodeBlock(String),
}

/// A fully scraped question with its answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDocument {
    /// Absolute URL of the post
    pub url: String,

    pub title: String,

    pub question_body: Vec<ContentNode>,

    pub answer_body: Vec<ContentNode>,

    /// Present only when comments were requested
    pub question_comments: Option<Vec<String>>,

    /// Present only when comments were requested
    pub answer_comments: Option<Vec<String>>,
}

impl PostDocument {
    /// A post is shown only with both a question and an answer
    pub fn is_renderable(&self) -> bool {
        !self.question_body.is_empty() && !self.answer_body.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(accepted: bool, answered: bool) -> PostSummary {
        PostSummary {
            href: Some("/questions/1/x".to_string()),
            title: "x".to_string(),
            accepted,
            answered,
        }
    }

    #[test]
    fn test_acceptance_policy() {
        let accepted_only = AcceptancePolicy::from_verified_only(true);
        let answered = AcceptancePolicy::from_verified_only(false);

        assert!(summary(true, true).passes(accepted_only));
        assert!(!summary(false, true).passes(accepted_only));
        assert!(summary(false, true).passes(answered));
        assert!(summary(true, false).passes(answered));
        assert!(!summary(false, false).passes(answered));
    }

    #[test]
    fn test_query_from_text() {
        let query = Query::from_text("  NameError   name 'xyz' ");
        assert_eq!(query.terms(), ["NameError", "name", "'xyz'"]);
        assert_eq!(query.to_string(), "NameError name 'xyz'");
        assert!(Query::from_text("   ").is_empty());
    }
}
