//! Linkscout main entry point
//!
//! Command-line interface for the broken-link crawler.

use anyhow::Result;
use clap::Parser;
use linkscout::config::CrawlConfig;
use linkscout::crawler::Engine;
use linkscout::report;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Linkscout: crawl a site and report every link that fails to resolve
///
/// Starting from the given URL, Linkscout follows same-host hyperlinks
/// breadth-first and records every link that returns a non-success status
/// or cannot be fetched at all. With --collect-all-metadata it also
/// records meta tags and JSON-LD structured data for every page.
#[derive(Parser, Debug)]
#[command(name = "linkscout")]
#[command(version)]
#[command(about = "Crawls a site and reports every broken link", long_about = None)]
struct Cli {
    /// Start URL; its host defines the same-host filter
    #[arg(value_name = "URL", env = "URL")]
    url: String,

    /// Protection bypass key, sent as a header on every request
    #[arg(long, env = "BYPASS_SECRET", hide_env_values = true)]
    bypass_secret: String,

    /// Collect meta tags and structured data for every fetched page
    #[arg(long)]
    collect_all_metadata: bool,

    /// Where to write the broken-link report
    #[arg(long, default_value = "./broken-links.json")]
    broken_links_output: PathBuf,

    /// Where to write the metadata report (with --collect-all-metadata)
    #[arg(long, default_value = "./all-metadata.json")]
    metadata_output: PathBuf,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = CrawlConfig {
        start_url: cli.url,
        bypass_key: cli.bypass_secret,
        collect_metadata: cli.collect_all_metadata,
        broken_links_path: cli.broken_links_output,
        metadata_path: cli.metadata_output,
    };

    let exit_code = match run(config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

/// Runs the crawl and writes the reports
///
/// Exit codes: 0 = no broken links, 1 = broken links found, 2 = fatal
/// configuration or IO error (the caller maps Err to 2).
async fn run(config: CrawlConfig) -> Result<i32> {
    let engine = Engine::new(&config)?;

    println!("Checking links for: {}", engine.start_url());

    let outcome = engine.run().await;

    report::write_broken_links(&config.broken_links_path, &outcome.broken_links)?;
    eprintln!(
        "Broken links exported to {}",
        config.broken_links_path.display()
    );

    if config.collect_metadata {
        report::write_metadata(&config.metadata_path, &outcome.metadata_records)?;
        eprintln!(
            "Page metadata exported to {}",
            config.metadata_path.display()
        );
    }

    report::print_summary(&outcome);

    Ok(report::exit_code(&outcome.broken_links))
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linkscout=info,warn"),
            1 => EnvFilter::new("linkscout=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
