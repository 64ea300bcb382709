use crate::favicon::favicon_tag;
use crate::parsers::{Scanner, Token, extract_metadata, extract_metadata_from_str};
use scraper::{Html, Selector};
use std::io::{BufReader, Read};

/// Title as a full HTML5 parser sees it
fn dom_title(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let selector = Selector::parse("title").unwrap();
    doc.select(&selector)
        .next()
        .map(|n| n.text().collect::<String>())
        .filter(|t| !t.is_empty())
}

/// `content` of the first `meta[name=description]` as a full HTML5 parser sees it
fn dom_description(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let selector = Selector::parse("meta[name='description'][content]").unwrap();
    doc.select(&selector)
        .next()
        .and_then(|e| e.value().attr("content").map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENTS: &[&str] = &[
        "<html><head><title>Plain</title></head></html>",
        "<!DOCTYPE html><html><head><meta charset=utf-8><title>Tom &amp; Jerry</title></head><body></body></html>",
        "<title>Unclosed body<p>never closed",
        "<html><head><script>var t = '<title>no</title>';</script><title>Yes</title>",
        "<html><!-- <title>commented</title> --><head><title>Real</title></head></html>",
        "<TITLE>Upper</TITLE><META NAME=description CONTENT=upper>",
        "<head><meta content=\"after\" name=\"description\"><title>Order</title></head>",
        "<head><meta name=description content='single &lt;quoted&gt;'></head>",
        "<html><head><title>Caf&eacute; &mdash; &copy; 2024</title></head></html>",
        "<head><meta name=\"description\" content=\"It&rsquo;s &ldquo;fine&rdquo; &hellip;\"></head>",
    ];

    #[test]
    fn test_end_to_end() {
        let html = r#"<html><head><link rel="shortcut icon" href="favicon.png"><title>Hi</title><meta name="description" content="d"></head></html>"#;
        let meta = extract_metadata(html.as_bytes());

        assert_eq!(meta.title.as_deref(), Some("Hi"));
        assert_eq!(meta.description.as_deref(), Some("d"));
        assert_eq!(
            favicon_tag(meta.favicon.as_deref().unwrap_or_default(), "https://a.b/x/y"),
            r#"<link rel="icon" href="https://a.b/x/favicon.png">"#
        );
    }

    #[test]
    fn test_plain_text_yields_empty_tag() {
        let meta = extract_metadata_from_str("nothing to see");
        assert!(meta.is_empty());
        assert_eq!(
            favicon_tag(meta.favicon.as_deref().unwrap_or_default(), "https://a.b/"),
            ""
        );
    }

    #[test]
    fn test_bad_favicon_reference_yields_empty_tag() {
        let meta = extract_metadata_from_str(r#"<link rel="icon" href="bad uri">"#);
        assert_eq!(meta.favicon.as_deref(), Some("bad uri"));
        assert_eq!(favicon_tag("bad uri", "https://ex.com/"), "");
    }

    #[test]
    fn test_titles_agree_with_dom_parser() {
        for html in DOCUMENTS {
            let meta = extract_metadata_from_str(html);
            assert_eq!(meta.title, dom_title(html), "title mismatch for {}", html);
        }
    }

    #[test]
    fn test_descriptions_agree_with_dom_parser() {
        for html in DOCUMENTS {
            let meta = extract_metadata_from_str(html);
            assert_eq!(
                meta.description,
                dom_description(html),
                "description mismatch for {}",
                html
            );
        }
    }

    #[test]
    fn test_scanner_is_lazy() {
        // Taking the first token must not need the rest of the stream
        let endless = BufReader::new(std::io::repeat(b'x'));
        let mut scanner = Scanner::new("<title>".as_bytes().chain(endless));
        assert!(matches!(scanner.next(), Some(Token::StartTag(ref tag)) if tag.name == "title"));
    }
}
