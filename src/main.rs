// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr, so stdout only carries email addresses)
// 3. Crawl the domain, printing emails as they are found
// 4. Print "Scraping Complete" and exit 0, whatever happened along the way
//
// Rust concepts used:
// - async/await: reqwest is async, so the crawler runs on tokio
// - anyhow::Result: lets run() bubble up any error with context attached
// - Generics: the crawler writes to stdout, or to io::sink() in JSON mode
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod crawl; // src/crawl/ - frontier, scope, fetching and the crawl loop
mod error; // src/error.rs - crawl and fetch error types
mod extract; // src/extract/ - link and email extraction

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use crawl::{CrawlConfig, CrawlReport, Crawler};
use std::io::{self, Write};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Please enter a domain!";
const COMPLETE: &str = "Scraping Complete";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    match cli.domain() {
        Some(domain) => {
            // Errors are reported, never turned into an exit code
            if let Err(e) = run(&cli, domain).await {
                error!("{:#}", e);
            }
        }
        None => print_line(io::stdout(), USAGE),
    }

    if cli.json {
        info!("{}", COMPLETE);
    } else {
        print_line(io::stdout(), COMPLETE);
    }
}

async fn run(cli: &Cli, domain: &str) -> Result<()> {
    let config = cli.crawl_config(domain);

    if cli.json {
        let report = scrape(config, io::sink()).await?;
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        print_line(io::stdout(), &json);
    } else {
        scrape(config, io::stdout()).await?;
    }

    Ok(())
}

// Crawls with emails streamed to `out`, and returns the final report.
async fn scrape<W: Write>(config: CrawlConfig, out: W) -> Result<CrawlReport> {
    let domain = config.domain.clone();
    let mut crawler = Crawler::new(config, out)?;

    crawler
        .crawl()
        .await
        .with_context(|| format!("crawl of {} stopped early", domain))?;

    Ok(crawler.report())
}

// println! panics when stdout is gone (e.g. a closed pipe); a lost line must
// not change the exit status, so the error is only logged.
fn print_line<W: Write>(mut out: W, line: &str) {
    if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
        warn!("failed to write to stdout: {}", e);
    }
}
