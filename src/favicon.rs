//! Favicon reference resolution and `<link>` tag rendering.
//!
//! Everything here is fail-soft: an unusable reference or base URL yields
//! `None` (or an empty tag) rather than an error.

use crate::utils::escape_html;
use url::{ParseError, Url};

/// Resolves a raw favicon `href` against the page URL it came from.
///
/// Absolute references are returned as parsed. Relative ones are resolved
/// against `base_url` with standard RFC 3986 reference resolution. Returns
/// `None` when the reference is blank or not a valid URI reference, or when
/// a relative reference meets an unparsable base.
pub fn resolve_favicon(raw_href: &str, base_url: &str) -> Option<Url> {
    let reference = raw_href.trim_matches(|c: char| c.is_ascii_whitespace());
    if reference.is_empty() {
        return None;
    }

    if !is_uri_reference(reference) {
        ::log::debug!("Ignoring unparsable favicon reference: {:?}", reference);
        return None;
    }

    match Url::parse(reference) {
        Ok(absolute) => Some(absolute),
        Err(ParseError::RelativeUrlWithoutBase) => {
            let base = match Url::parse(base_url) {
                Ok(base) => base,
                Err(e) => {
                    ::log::debug!("Cannot resolve favicon, bad base URL {}: {}", base_url, e);
                    return None;
                }
            };
            base.join(reference)
                .map_err(|e| ::log::debug!("Failed to resolve {} against {}: {}", reference, base, e))
                .ok()
        }
        Err(e) => {
            ::log::debug!("Ignoring favicon reference {:?}: {}", reference, e);
            None
        }
    }
}

/// Renders `<link rel="icon" href="URL">` for the resolved favicon, or an
/// empty string when there is nothing to link to
pub fn favicon_tag(raw_href: &str, base_url: &str) -> String {
    resolve_favicon(raw_href, base_url)
        .map(|url| link_tag(&url))
        .unwrap_or_default()
}

/// Renders the icon link for an already resolved URL
pub fn link_tag(url: &Url) -> String {
    format!(r#"<link rel="icon" href="{}">"#, escape_html(url.as_str()))
}

/// Checks the characters of a URI reference against RFC 3986.
///
/// The url crate accepts and percent-encodes spaces and other characters a
/// strict parser would reject, so they are filtered out here first.
/// Non-ASCII characters are allowed and left to the url crate to encode.
fn is_uri_reference(reference: &str) -> bool {
    let mut bytes = reference.bytes();
    while let Some(b) = bytes.next() {
        match b {
            b'%' => {
                let escape = (bytes.next(), bytes.next());
                if !matches!(escape, (Some(hi), Some(lo)) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit())
                {
                    return false;
                }
            }
            b' ' | b'<' | b'>' | b'"' | b'{' | b'}' | b'|' | b'\\' | b'^' | b'`' => return false,
            b if b.is_ascii_control() => return false,
            _ => {}
        }
    }
    true
}
