//! Post body classification
//!
//! Walks the top-level elements of a question or answer body and turns each
//! one into a [`ContentNode`]. Elements without a rendering rule are dropped.

use crate::markup::{self, select_all};
use crate::types::{ContentNode, ListItem};
use scraper::ElementRef;
use url::Url;

/// Classify the children of a post body
///
/// # Arguments
///
/// * `body` - The post body element (`post-text` / `js-post-body`)
/// * `base_url` - Site URL used to make relative list links absolute
pub fn classify_body(body: ElementRef<'_>, base_url: &str) -> Vec<ContentNode> {
    body.children()
        .filter_map(ElementRef::wrap)
        .filter_map(|element| classify_element(element, base_url))
        .collect()
}

fn classify_element(element: ElementRef<'_>, base_url: &str) -> Option<ContentNode> {
    let node = match element.value().name() {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            ContentNode::Heading(markup::text(element).trim().to_string())
        }
        "p" => ContentNode::Paragraph(markup::text(element).trim().to_string()),
        "blockquote" => ContentNode::Quote(markup::text(element).trim().to_string()),
        "ul" | "ol" => ContentNode::List(list_items(element, base_url)),
        "pre" => {
            // Highlighted blocks keep the source in a nested <code>
            let code = select_all(element, "code", Some(1))
                .into_iter()
                .next()
                .unwrap_or(element);
            ContentNode::CodeBlock(markup::flatten_text(code))
        }
        _ => return None,
    };
    Some(node)
}

fn list_items(list: ElementRef<'_>, base_url: &str) -> Vec<ListItem> {
    select_all(list, "li", None)
        .into_iter()
        .map(|item| ListItem {
            text: markup::text(item).trim().to_string(),
            link: select_all(item, "a[href]", Some(1))
                .into_iter()
                .next()
                .and_then(|a| markup::attr(a, "href"))
                .map(|href| absolute_url(base_url, href)),
        })
        .collect()
}

/// Resolve `href` against the site URL; unparseable input is kept as is
pub fn absolute_url(base_url: &str, href: &str) -> String {
    Url::parse(base_url)
        .and_then(|base| base.join(href))
        .map(|url| url.to_string())
        .unwrap_or_else(|_| href.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::{find_first_by_class, Markup};
    use pretty_assertions::assert_eq;

    const BASE: &str = "https://stackoverflow.com";

    fn classify(html: &str) -> Vec<ContentNode> {
        let doc = Markup::parse(&format!(r#"<div class="post-text">{}</div>"#, html));
        let body = find_first_by_class(doc.root(), "post-text").unwrap();
        classify_body(body, BASE)
    }

    #[test]
    fn test_classifies_each_rule() {
        let nodes = classify(
            r#"<h2> Title </h2>
               <p>Some <em>text</em>.</p>
               <blockquote><p>quoted</p></blockquote>
               <ul><li>plain</li><li><a href="/q/1">linked</a></li></ul>
               <pre class="lang-py"><code>print(1)</code></pre>
               <hr>
               <div>ignored</div>"#,
        );

        assert_eq!(
            nodes,
            vec![
                ContentNode::Heading("Title".to_string()),
                ContentNode::Paragraph("Some text.".to_string()),
                ContentNode::Quote("quoted".to_string()),
                ContentNode::List(vec![
                    ListItem {
                        text: "plain".to_string(),
                        link: None
                    },
                    ListItem {
                        text: "linked".to_string(),
                        link: Some("https://stackoverflow.com/q/1".to_string())
                    },
                ]),
                ContentNode::CodeBlock("print(1)".to_string()),
            ]
        );
    }

    #[test]
    fn test_code_block_flattens_token_spans() {
        let nodes = classify(
            r#"<pre><code><span class="hljs-keyword">import</span> <span><span>os</span></span></code></pre>"#,
        );
        assert_eq!(nodes, vec![ContentNode::CodeBlock("import os".to_string())]);
    }

    #[test]
    fn test_pre_without_code() {
        let nodes = classify("<pre>x = 1</pre>");
        assert_eq!(nodes, vec![ContentNode::CodeBlock("x = 1".to_string())]);
    }

    #[test]
    fn test_empty_body() {
        assert!(classify("").is_empty());
        assert!(classify("<div><p>nested too deep</p></div>").is_empty());
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(absolute_url(BASE, "/questions/1"), "https://stackoverflow.com/questions/1");
        assert_eq!(absolute_url(BASE, "https://docs.python.org/3/"), "https://docs.python.org/3/");
        assert_eq!(absolute_url("not a url", "/x"), "/x");
    }
}
