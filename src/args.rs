use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "link-preview")]
#[command(about = "Builds a redirect page that carries the target's title, description and favicon")]
#[command(version)]
pub struct Args {
    /// Target URL to preview and redirect to
    pub url: String,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Read the HTML from this file ("-" for stdin) instead of fetching the URL
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Fetch timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Title to use when the target has none
    #[arg(long)]
    pub fallback_title: Option<String>,

    /// Print the extracted metadata as JSON instead of the redirect page
    #[arg(long)]
    pub json: bool,

    /// Send a visit notification to the configured Telegram chat
    #[arg(long)]
    pub notify: bool,

    /// Client address reported in the notification
    #[arg(long)]
    pub client_ip: Option<String>,
}
