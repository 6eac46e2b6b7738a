//! # registry-scraper
//!
//! Scrapes a public company-registry search site for every name in a company list and writes one
//! CSV row per company found: the registration attributes from the profile table, followed by the
//! officer/director roster collapsed into comma-joined columns.
//!
//! Pages are rendered in Chrome/Chromium through the DevTools Protocol, so content filled in by
//! client-side scripts is present before the tables are read.
//!
//! ## Running
//!
//! ```bash
//! # companies.txt in the working directory, one name per line
//! cargo run --release
//!
//! # Custom paths, visible browser, columns matched by name instead of position
//! cargo run --release -- --input names.txt --output out.csv --headed --align-columns
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use registry_scraper::{BrowserSession, LaunchOptions, Pipeline, PipelineConfig};
//!
//! # fn main() -> registry_scraper::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::default())?;
//! let mut pipeline = Pipeline::new(session, PipelineConfig::new().input("companies.txt"));
//!
//! let summary = pipeline.run()?;
//! println!("{} rows written, {} skipped", summary.written, summary.skipped.len());
//! # Ok(())
//! # }
//! ```
//!
//! Anything implementing [`PageFetcher`] can stand in for the browser:
//!
//! ```rust
//! use registry_scraper::{PageFetcher, Result, registry};
//!
//! struct Canned(&'static str);
//!
//! impl PageFetcher for Canned {
//!     fn fetch_html(&self, _url: &str) -> Result<String> {
//!         Ok(self.0.to_string())
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let html = Canned("<p>No results</p>").fetch_html("https://example.com")?;
//! assert!(registry::resolve_detail_link(&html).is_none());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`browser`]: Browser session management and the [`PageFetcher`] seam
//! - [`dom`]: HTML parsing and class-signature lookups
//! - [`registry`]: Detail link resolution and table extraction for the registry site
//! - [`output`]: CSV row writer with explicit header state
//! - [`pipeline`]: The per-company driver
//! - [`error`]: Error types and result aliases

pub mod browser;
pub mod dom;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod registry;

pub use browser::{BrowserSession, ConnectionOptions, LaunchOptions, PageFetcher};
pub use error::{Result, ScraperError};
pub use output::{ColumnPolicy, HeaderState, RowWriter};
pub use pipeline::{Pipeline, PipelineConfig, RunSummary, SkipReason};
pub use registry::{CompanyRecord, Roster};
