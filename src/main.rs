use clap::Parser;
use link_preview::notify::{self, Notifier, visit_message};
use link_preview::{Preview, PreviewConfig, PreviewPage};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ::log::error!("Failed to build preview: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = load_config(&args)?;
    ::log::info!("Building preview for: {}", args.url);

    // The notification goes out while the page is being fetched
    let notification = if args.notify {
        let notifier = Notifier::new(config.telegram.clone());
        if notifier.is_configured() {
            let message = visit_message(args.client_ip.as_deref(), &args.url);
            Some(notifier.spawn_send(message))
        } else {
            ::log::warn!(
                "Notification requested but {} or {} is not set",
                link_preview::config::BOT_TOKEN_VAR,
                link_preview::config::CHAT_ID_VAR
            );
            None
        }
    } else {
        None
    };

    notify::run_alongside(notification, build_and_print(&args, config)).await
}

async fn build_and_print(args: &Args, config: PreviewConfig) -> Result<(), Box<dyn Error>> {
    let preview = Preview::new(args.url.clone()).with_config(config);
    let page = match &args.input {
        Some(path) => preview.generate_from(open_input(path)?),
        None => preview.generate().await?,
    };

    print_page(&page, args.json)
}

/// Config file (or defaults), then environment, then command-line flags
fn load_config(args: &Args) -> Result<PreviewConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => {
            ::log::debug!("Loading configuration from file: {}", path.display());
            PreviewConfig::from_file(path)?
        }
        None => PreviewConfig::default(),
    }
    .with_env_overrides();

    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(title) = &args.fallback_title {
        config.fallback_title = title.clone();
    }

    Ok(config)
}

fn open_input(path: &Path) -> io::Result<Box<dyn BufRead>> {
    if path == Path::new("-") {
        Ok(Box::new(io::stdin().lock()))
    } else {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }
}

fn print_page(page: &PreviewPage, json: bool) -> Result<(), Box<dyn Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(page)?);
    } else {
        println!("{}", page.html);
    }
    Ok(())
}
