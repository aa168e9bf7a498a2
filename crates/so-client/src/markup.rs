//! HTML tree queries
//!
//! A thin layer over `scraper` exposing only what the scraping code needs:
//! parse, find-first and find-all by class, attribute and text access, and a
//! recursive text flatten for code blocks.

use log::debug;
use scraper::{ElementRef, Html, Node, Selector};

/// A parsed HTML document
pub struct Markup {
    html: Html,
}

impl Markup {
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    /// The `<html>` element
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }
}

/// Parse a CSS selector, logging invalid input instead of failing
fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            debug!("Invalid selector {:?}: {:?}", css, e);
            None
        }
    }
}

/// First descendant of `scope` carrying `class`
pub fn find_first_by_class<'a>(scope: ElementRef<'a>, class: &str) -> Option<ElementRef<'a>> {
    let selector = selector(&format!(".{}", class))?;
    scope.select(&selector).next()
}

/// First descendant carrying any of `classes`, tried in order
pub fn find_first_by_any_class<'a>(
    scope: ElementRef<'a>,
    classes: &[&str],
) -> Option<ElementRef<'a>> {
    classes
        .iter()
        .find_map(|class| find_first_by_class(scope, class))
}

/// Descendants of `scope` carrying `class`, at most `limit` of them
pub fn find_all_by_class<'a>(
    scope: ElementRef<'a>,
    class: &str,
    limit: Option<usize>,
) -> Vec<ElementRef<'a>> {
    select_all(scope, &format!(".{}", class), limit)
}

/// Descendants of `scope` matching a CSS selector, at most `limit` of them
pub fn select_all<'a>(scope: ElementRef<'a>, css: &str, limit: Option<usize>) -> Vec<ElementRef<'a>> {
    let Some(selector) = selector(css) else {
        return Vec::new();
    };
    scope
        .select(&selector)
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

/// Whether the element itself carries `class`
pub fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// Attribute value of an element
pub fn attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

/// All text below an element, concatenated
pub fn text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Concatenate every text leaf below `element`, descending through any
/// wrapper elements
///
/// Highlighted code wraps each token in its own `<span>`, possibly several
/// levels deep; the flattened text is the original source.
pub fn flatten_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    collect_text(element, &mut out);
    out
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    collect_text(child, out);
                }
            }
            _ => {}
        }
    }
}
