use serde::{Deserialize, Serialize};

/// Metadata recovered from a single pass over an HTML document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Text of the first `<title>` element, verbatim
    pub title: Option<String>,

    /// `content` of the first `<meta name="description">`
    pub description: Option<String>,

    /// Raw `href` of the first icon link, possibly relative
    pub favicon: Option<String>,
}

impl PageMetadata {
    /// True when none of the fields were found
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.favicon.is_none()
    }

    /// The title, or `fallback` when the document had none or it was empty
    pub fn title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => fallback,
        }
    }
}
