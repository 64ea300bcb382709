use clap::Parser;
use link_preview::Preview;
use std::error::Error;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL to preview
    #[arg(short, long)]
    url: String,

    /// JSON configuration string
    #[arg(short, long)]
    config: Option<String>,

    /// Path to JSON configuration file
    #[arg(short = 'f', long)]
    config_file: Option<String>,

    /// Fetch timeout in seconds
    #[arg(short, long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger
    env_logger::init();

    // Parse command line arguments
    let args = Args::parse();

    println!("Building preview for URL: {}", args.url);

    let mut builder = Preview::new(args.url);

    // Apply configuration from file if specified
    if let Some(config_file) = args.config_file {
        println!("Loading configuration from file: {}", config_file);
        builder = builder.with_config_file(config_file)?;
    }

    // Apply configuration from string if specified (overrides file config)
    if let Some(config_str) = args.config {
        println!("Applying configuration from string");
        builder = builder.with_config_str(&config_str)?;
    }

    if let Some(timeout) = args.timeout {
        println!("Overriding timeout: {}s", timeout);
        builder = builder.with_timeout(timeout);
    }

    let start_time = std::time::Instant::now();
    let page = builder.generate().await?;

    println!("Title:       {:?}", page.metadata.title);
    println!("Description: {:?}", page.metadata.description);
    println!("Favicon:     {:?}", page.favicon_url);
    println!(
        "Done in {:.2} seconds.",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}
