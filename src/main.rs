//! cv-finder main entry point
//!
//! This is the command-line interface for the cv-finder crawler.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cv_finder::config::{load_config, Config};
use cv_finder::crawler::Crawler;
use cv_finder::output::{print_report, Envelope};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// cv-finder: locate a résumé/CV on a website
///
/// Crawls outward from a start page, staying on the same host and at most
/// three links deep, and reports the first CV document it finds or the page
/// that looks most like one.
#[derive(Parser, Debug)]
#[command(name = "cv-finder")]
#[command(version = "1.0.0")]
#[command(about = "Locate a CV on a website", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, global = true, env = "CV_FINDER_CONFIG", value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl from URL and print the JSON envelope
    Find {
        /// Start page, including the http:// or https:// scheme
        url: String,

        /// Print crawl statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Run the HTTP service
    Serve {
        /// Address to bind (host:port); overrides [server] bind
        #[arg(long, env = "CV_FINDER_BIND")]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    match cli.command {
        Command::Find { url, stats } => handle_find(&config, &url, stats).await,
        Command::Serve { bind } => handle_serve(config, bind).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("cv_finder=info,warn"),
            1 => EnvFilter::new("cv_finder=debug,info"),
            2 => EnvFilter::new("cv_finder=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles `find`: one crawl, envelope on stdout
async fn handle_find(config: &Config, url: &str, stats: bool) -> Result<()> {
    let crawler = Crawler::from_config(config).context("failed to build HTTP client")?;

    let result = match crawler.crawl(url).await {
        Ok(report) => {
            if stats {
                print_report(&report);
            }
            Ok(report.outcome.into_result())
        }
        Err(e) => Err(e),
    };

    let envelope = Envelope::from_crawl(&result);
    println!("{}", serde_json::to_string_pretty(&envelope)?);

    if envelope.status_code != 200 {
        std::process::exit(1);
    }
    Ok(())
}

/// Handles `serve`: runs the HTTP service until shutdown
async fn handle_serve(mut config: Config, bind: Option<String>) -> Result<()> {
    if let Some(bind) = bind {
        config.server.bind = bind;
    }

    cv_finder::server::serve(&config)
        .await
        .context("HTTP service failed")
}
