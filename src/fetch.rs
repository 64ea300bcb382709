use crate::config::PreviewConfig;
use crate::error::{Error, Result};
use crate::parsers::extract_metadata;
use crate::results::PageMetadata;
use reqwest::StatusCode;
use std::io::BufReader;
use std::time::Duration;
use tokio::time::timeout;
use url::Url;

/// Parses and checks a preview target. Only absolute http(s) URLs are accepted.
pub fn parse_target(target: &str) -> Result<Url> {
    let url = Url::parse(target).map_err(|e| Error::InvalidUrl {
        url: target.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::InvalidUrl {
            url: target.to_string(),
            reason: format!("unsupported scheme {}", other),
        }),
    }
}

/// Fetches `url` and extracts its metadata while the body streams in.
///
/// The request and the scan run on tokio's blocking pool so the body is fed
/// to the scanner straight from the socket. The whole operation is bounded by
/// the configured timeout; when it elapses the extraction is abandoned and
/// nothing is returned.
pub async fn fetch_metadata(url: &Url, config: &PreviewConfig) -> Result<PageMetadata> {
    let limit = config.timeout();
    let target = url.clone();
    let user_agent = config.user_agent.clone();

    ::log::info!("Fetching metadata from {}", url);
    let task =
        tokio::task::spawn_blocking(move || fetch_blocking(&target, &user_agent, limit));

    match timeout(limit, task).await {
        Ok(joined) => joined?,
        Err(_) => {
            ::log::error!("Timeout fetching: {}", url);
            Err(Error::Timeout(limit))
        }
    }
}

fn fetch_blocking(url: &Url, user_agent: &str, limit: Duration) -> Result<PageMetadata> {
    let start = std::time::Instant::now();
    let client = reqwest::blocking::Client::builder()
        .user_agent(user_agent)
        .timeout(limit)
        .build()?;

    let response = client.get(url.clone()).send()?;
    let status = response.status();
    if status != StatusCode::OK {
        ::log::warn!("Fetching {} returned {}", url, status);
        return Err(Error::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let meta = extract_metadata(BufReader::new(response));
    ::log::debug!(
        "Extracted metadata from {} in {:.2} seconds",
        url,
        start.elapsed().as_secs_f64()
    );
    Ok(meta)
}
