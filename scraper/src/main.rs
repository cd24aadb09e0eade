//! WeWorkRemotely Job Scraper
//!
//! Scrapes one category page from WeWorkRemotely.com
//! and saves the jobs to data/jobs.json

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wwr_scraper::{scrape, Fetcher, WeWorkRemotely, DEFAULT_CATEGORY};

#[derive(Parser, Debug)]
#[command(
    name = "wwr-scraper",
    about = "Scrape remote job listings from We Work Remotely into a JSON file"
)]
struct Cli {
    /// Category slug, as in /categories/remote-<category>-jobs.
    #[arg(long, env = "WWR_CATEGORY", default_value = DEFAULT_CATEGORY)]
    category: String,

    /// Pages to scrape. Only the first page is fetched today.
    #[arg(long, env = "WWR_PAGES", default_value_t = 1)]
    pages: u32,

    /// Where the scraped jobs are written (overwritten on every run).
    #[arg(long, env = "WWR_OUTPUT", default_value = "data/jobs.json")]
    output: PathBuf,

    /// Directory receiving the raw HTML snapshots.
    #[arg(long, env = "WWR_DEBUG_DIR", default_value = ".")]
    debug_dir: PathBuf,

    /// Number of jobs to print once saved.
    #[arg(long, default_value_t = 3)]
    preview: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!("🔍 Starting WeWorkRemotely Job Scraper...");

    let fetcher = Fetcher::new(cli.debug_dir.clone())?;
    let extractor = WeWorkRemotely::new()?;

    let jobs = scrape(&fetcher, &extractor, &cli.category, cli.pages)?;
    tracing::info!("📊 Total jobs found: {}", jobs.len());

    common::save_jobs(&cli.output, &jobs)?;
    tracing::info!("💾 Saved {} jobs to {:?}", jobs.len(), cli.output);

    if jobs.is_empty() {
        println!("No jobs found.");
        return Ok(());
    }

    println!("\nFirst {} jobs:", cli.preview.min(jobs.len()));
    for (i, job) in jobs.iter().take(cli.preview).enumerate() {
        println!("{}. {} at {}", i + 1, job.title, job.company);
        println!("   Salary: {}", job.salary);
        println!("   URL: {}", job.url);
        println!();
    }

    Ok(())
}
