//! Link previews for redirects.
//!
//! Given a target URL, fetch the page, pull its title, description and
//! favicon out of the HTML in a single streaming pass, and render a small
//! page that carries that metadata while redirecting browsers to the target.

// Re-export modules
pub mod config;
pub mod error;
pub mod favicon;
pub mod fetch;
pub mod notify;
pub mod parsers;
pub mod render;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{PreviewConfig, TelegramConfig};
pub use error::{Error, Result};
pub use favicon::{favicon_tag, resolve_favicon};
pub use parsers::{extract_metadata, extract_metadata_from_str};
pub use results::PageMetadata;

use serde::Serialize;
use std::io::BufRead;
use std::path::Path;

/// A finished preview for one target
#[derive(Debug, Clone, Serialize)]
pub struct PreviewPage {
    /// The redirect target, also the base for the favicon
    pub target: String,

    /// What was found in the target's HTML
    pub metadata: PageMetadata,

    /// Absolute favicon URL, when the document had a usable one
    pub favicon_url: Option<String>,

    /// The rendered redirect page
    #[serde(skip)]
    pub html: String,
}

impl PreviewPage {
    fn build(target: String, metadata: PageMetadata, fallback_title: &str) -> Self {
        let icon_url = metadata
            .favicon
            .as_deref()
            .and_then(|href| resolve_favicon(href, &target));
        let tag = icon_url.as_ref().map(favicon::link_tag).unwrap_or_default();
        let html = render::render_with_favicon_tag(&target, &metadata, fallback_title, &tag);

        Self {
            target,
            metadata,
            favicon_url: icon_url.map(String::from),
            html,
        }
    }
}

/// Builder for generating a preview of one target URL
pub struct Preview {
    target: String,
    config: PreviewConfig,
}

impl Preview {
    /// Create a new Preview builder for the given target URL
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            config: PreviewConfig::default(),
        }
    }

    /// Apply a configuration
    pub fn with_config(mut self, config: PreviewConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file<P: AsRef<Path>>(
        self,
        path: P,
    ) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let config = PreviewConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Apply configuration from a JSON string
    pub fn with_config_str(
        self,
        json: &str,
    ) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let config = PreviewConfig::from_json(json)?;
        Ok(self.with_config(config))
    }

    /// Override the fetch timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.config.timeout_secs = seconds;
        self
    }

    /// Override the title used when the target has none
    pub fn with_fallback_title(mut self, title: impl Into<String>) -> Self {
        self.config.fallback_title = title.into();
        self
    }

    /// The configuration this builder will use
    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    /// Fetch the target and build its preview
    pub async fn generate(self) -> Result<PreviewPage> {
        let url = fetch::parse_target(&self.target)?;
        let metadata = fetch::fetch_metadata(&url, &self.config).await?;
        Ok(PreviewPage::build(
            self.target,
            metadata,
            &self.config.fallback_title,
        ))
    }

    /// Build the preview from HTML supplied by the caller; the target is only
    /// used as the favicon base and redirect destination
    pub fn generate_from<R: BufRead>(self, reader: R) -> PreviewPage {
        let metadata = extract_metadata(reader);
        PreviewPage::build(self.target, metadata, &self.config.fallback_title)
    }
}
