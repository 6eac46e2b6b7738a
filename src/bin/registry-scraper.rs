//! Registry scraper CLI
//!
//! Reads company names (one per line), looks each one up on the registry site and writes the
//! merged profile and roster data to a CSV file.

use anyhow::Context;
use clap::Parser;
use registry_scraper::pipeline::{self, DEFAULT_INPUT, DEFAULT_OUTPUT, DEFAULT_SEARCH_BASE};
use registry_scraper::{BrowserSession, ColumnPolicy, ConnectionOptions, LaunchOptions, Pipeline, PipelineConfig,
                       ScraperError};
use std::{path::PathBuf, time::Duration};

#[derive(Parser)]
#[command(name = "registry-scraper")]
#[command(version)]
#[command(about = "Scrape company details from a registry search site into CSV", long_about = None)]
struct Cli {
    /// File with one company name per line
    #[arg(long, short = 'i', value_name = "PATH", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// CSV file to write (overwritten on the first row)
    #[arg(long, short = 'o', value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Search URL prefix; the company name is appended verbatim
    #[arg(long, value_name = "URL", default_value = DEFAULT_SEARCH_BASE)]
    base_url: String,

    /// Seconds to wait for each page before skipping the company
    #[arg(long, value_name = "SECS", default_value = "30")]
    timeout_secs: u64,

    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    chrome_path: Option<PathBuf>,

    /// Persistent browser profile directory
    #[arg(long, value_name = "DIR")]
    user_data_dir: Option<PathBuf>,

    /// Disable the Chrome sandbox (needed when running as root in containers)
    #[arg(long)]
    no_sandbox: bool,

    /// WebSocket endpoint URL of an already running browser
    #[arg(long, value_name = "URL")]
    ws_endpoint: Option<String>,

    /// Place values under the header column of the same name instead of by position
    #[arg(long)]
    align_columns: bool,

    /// Print a JSON summary of the run after the completion line
    #[arg(long)]
    json_summary: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let companies = match pipeline::load_companies(&cli.input) {
        Ok(companies) => companies,
        Err(ScraperError::InputUnavailable { path, source }) => {
            log::debug!("Cannot read {}: {}", path.display(), source);
            println!("The file '{}' was not found.", path.display());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let timeout = Duration::from_secs(cli.timeout_secs);

    let session = match cli.ws_endpoint {
        Some(ref endpoint) => {
            BrowserSession::connect(ConnectionOptions::new(endpoint.clone()).timeout(timeout.as_millis() as u64))
        }
        None => {
            let mut options = LaunchOptions::new().headless(!cli.headed).sandbox(!cli.no_sandbox).navigation_timeout(timeout);
            if let Some(ref path) = cli.chrome_path {
                options = options.chrome_path(path.clone());
            }
            if let Some(ref dir) = cli.user_data_dir {
                options = options.user_data_dir(dir.clone());
            }
            BrowserSession::launch(options)
        }
    }
    .context("Failed to start browser session")?;

    let policy = if cli.align_columns { ColumnPolicy::Aligned } else { ColumnPolicy::Positional };
    let config = PipelineConfig::new()
        .input(&cli.input)
        .output(&cli.output)
        .search_base(cli.base_url.clone())
        .column_policy(policy);

    let summary = Pipeline::new(&session, config).run_companies(&companies).context("Scrape aborted")?;

    if cli.json_summary {
        println!("{}", summary.to_json()?);
    }

    if let Err(e) = session.close() {
        log::warn!("Failed to close browser tab: {}", e);
    }
    Ok(())
}
