use crate::parsers::scanner::{Scanner, StartTag, Token};
use crate::results::PageMetadata;
use std::io::BufRead;

/// Extracts the title, description and favicon reference from an HTML stream.
///
/// The scanner is driven to the end of the stream. Each field is set by the
/// first element that qualifies and never overwritten afterwards. Finding
/// nothing is not an error; the returned record is simply empty.
pub fn extract_metadata<R: BufRead>(reader: R) -> PageMetadata {
    let mut tokens = Scanner::new(reader);
    let mut meta = PageMetadata::default();
    let mut title_seen = false;

    while let Some(token) = tokens.next() {
        let Token::StartTag(tag) = token else {
            continue;
        };

        match tag.name.as_str() {
            "title" if !title_seen => {
                title_seen = true;
                // The token right after <title> is taken as its content
                if let Some(Token::Text(text)) = tokens.next() {
                    ::log::debug!("Found title: {:?}", text);
                    meta.title = Some(text);
                }
            }
            "meta" if meta.description.is_none() => {
                meta.description = description_of(&tag);
            }
            "link" if meta.favicon.is_none() => {
                meta.favicon = favicon_of(&tag);
                if let Some(href) = &meta.favicon {
                    ::log::debug!("Found favicon link: {}", href);
                }
            }
            _ => {}
        }
    }

    meta
}

/// Convenience wrapper for HTML already held in memory
pub fn extract_metadata_from_str(html: &str) -> PageMetadata {
    extract_metadata(html.as_bytes())
}

fn description_of(tag: &StartTag) -> Option<String> {
    let name = tag.attr("name")?;
    if !name.trim().eq_ignore_ascii_case("description") {
        return None;
    }
    tag.attr("content").map(str::to_string)
}

fn favicon_of(tag: &StartTag) -> Option<String> {
    let rel = tag.attr("rel")?;
    if !is_icon_rel(rel) {
        return None;
    }
    tag.attr("href")
        .filter(|href| !href.trim().is_empty())
        .map(str::to_string)
}

/// Matches `icon` and `shortcut icon`, ignoring case and spacing
fn is_icon_rel(rel: &str) -> bool {
    let mut keywords = rel.split_ascii_whitespace();
    match (keywords.next(), keywords.next(), keywords.next()) {
        (Some(only), None, None) => only.eq_ignore_ascii_case("icon"),
        (Some(first), Some(second), None) => {
            first.eq_ignore_ascii_case("shortcut") && second.eq_ignore_ascii_case("icon")
        }
        _ => false,
    }
}
