//! Sequential scrape of a company list into the output table
//!
//! Each company goes through the same stages, one at a time:
//!
//! ```text
//! FetchingSearch -> ResolvingLink -> FetchingDetail -> Extracting -> Writing
//!                        |
//!                        +-> Skipped (no detail link)
//! ```
//!
//! A page load that times out skips the company; every other fetch or filesystem error ends the
//! run.

use crate::browser::PageFetcher;
use crate::error::{Result, ScraperError};
use crate::output::{ColumnPolicy, HeaderState, RowWriter};
use crate::registry::{self, CompanyRecord};
use serde::Serialize;
use std::{fs,
          io::{self, Write},
          path::{Path, PathBuf}};

pub const DEFAULT_INPUT: &str = "companies.txt";
pub const DEFAULT_OUTPUT: &str = "companies_output.csv";
pub const DEFAULT_SEARCH_BASE: &str = "https://www.indiafilings.com/check-company-name-availability/name?search_text=";

/// Stage of a single company's trip through the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    FetchingSearch,
    ResolvingLink,
    FetchingDetail,
    Extracting,
    Writing,
    Skipped,
}

/// Why a company contributed no row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The search page had no company card
    NoDetailLink,

    /// The company card linked somewhere that is not a usable URL
    InvalidDetailLink { href: String },

    /// A page load timed out
    TimedOut { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedCompany {
    pub company: String,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Outcome of a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub output: PathBuf,
    pub processed: usize,
    pub written: usize,
    pub skipped: Vec<SkippedCompany>,
}

impl RunSummary {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Where to read names from, where to write rows, and which site to search
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub search_base: String,
    pub column_policy: ColumnPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            search_base: DEFAULT_SEARCH_BASE.to_string(),
            column_policy: ColumnPolicy::default(),
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input = path.into();
        self
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    pub fn search_base(mut self, base: impl Into<String>) -> Self {
        self.search_base = base.into();
        self
    }

    pub fn column_policy(mut self, policy: ColumnPolicy) -> Self {
        self.column_policy = policy;
        self
    }
}

/// Read the company list: one name per line, trimmed, blank lines dropped
pub fn load_companies(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .map_err(|source| ScraperError::InputUnavailable { path: path.to_path_buf(), source })?;

    Ok(contents.lines().map(str::trim).filter(|line| !line.is_empty()).map(str::to_string).collect())
}

enum CompanyOutcome {
    Written,
    Skipped(SkipReason),
}

/// Drives the scrape for every company in the input list
pub struct Pipeline<F: PageFetcher> {
    fetcher: F,
    config: PipelineConfig,

    /// Progress and skip lines for the user; stdout unless replaced
    console: Box<dyn Write>,
}

impl<F: PageFetcher> Pipeline<F> {
    pub fn new(fetcher: F, config: PipelineConfig) -> Self {
        Self { fetcher, config, console: Box::new(io::stdout()) }
    }

    /// Send progress lines somewhere other than stdout
    pub fn with_console(mut self, console: impl Write + 'static) -> Self {
        self.console = Box::new(console);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load the company list from the configured input and process it
    ///
    /// Returns [`ScraperError::InputUnavailable`] before anything is fetched or written when the
    /// list cannot be read.
    pub fn run(&mut self) -> Result<RunSummary> {
        let companies = load_companies(&self.config.input)?;
        self.run_companies(&companies)
    }

    /// Process an already loaded company list
    pub fn run_companies(&mut self, companies: &[String]) -> Result<RunSummary> {
        log::info!("Processing {} companies from {}", companies.len(), self.config.input.display());

        let writer = RowWriter::new(&self.config.output, self.config.column_policy);
        let mut header = HeaderState::new();
        let mut summary = RunSummary { output: self.config.output.clone(), ..Default::default() };

        for company in companies {
            writeln!(self.console, "Processing: {}", company)?;
            summary.processed += 1;

            let reason = match self.process_company(company, &writer, &mut header) {
                Ok(CompanyOutcome::Written) => {
                    summary.written += 1;
                    continue;
                }
                Ok(CompanyOutcome::Skipped(reason)) => reason,
                Err(ScraperError::Timeout { url, timeout_secs }) => {
                    log::warn!("Timed out after {}s loading {} for {}", timeout_secs, url, company);
                    SkipReason::TimedOut { url }
                }
                Err(e) => return Err(e),
            };

            match &reason {
                SkipReason::NoDetailLink | SkipReason::InvalidDetailLink { .. } => {
                    writeln!(self.console, "Skipping {} due to missing details.", company)?
                }
                SkipReason::TimedOut { url } => writeln!(self.console, "Skipping {}: fetch timed out ({})", company, url)?,
            }
            log::debug!("{}: {:?}", company, Stage::Skipped);
            summary.skipped.push(SkippedCompany { company: company.clone(), reason });
        }

        writeln!(self.console, "Data extraction completed. Output written to {}.", self.config.output.display())?;
        self.console.flush()?;
        log::info!(
            "Processed {} companies: {} written, {} skipped",
            summary.processed,
            summary.written,
            summary.skipped.len()
        );

        Ok(summary)
    }

    fn process_company(&mut self, company: &str, writer: &RowWriter, header: &mut HeaderState) -> Result<CompanyOutcome> {
        self.enter(company, Stage::FetchingSearch);
        let search_url = registry::search_url(&self.config.search_base, company);
        let search_html = self.fetcher.fetch_html(&search_url)?;

        self.enter(company, Stage::ResolvingLink);
        let Some(href) = registry::resolve_detail_link(&search_html) else {
            writeln!(self.console, "No detailed result found for {}", company)?;
            return Ok(CompanyOutcome::Skipped(SkipReason::NoDetailLink));
        };
        let detail_url = match registry::absolutize(&search_url, &href) {
            Ok(url) => url,
            Err(e) => {
                // A card that links nowhere is treated like no card at all
                log::warn!("Unusable detail link for {}: {}", company, e);
                return Ok(CompanyOutcome::Skipped(SkipReason::InvalidDetailLink { href }));
            }
        };

        self.enter(company, Stage::FetchingDetail);
        let detail_html = self.fetcher.fetch_html(&detail_url)?;

        self.enter(company, Stage::Extracting);
        let record: CompanyRecord = registry::extract_record(&detail_html);

        self.enter(company, Stage::Writing);
        writer.write(company, &record, header)?;

        Ok(CompanyOutcome::Written)
    }

    fn enter(&self, company: &str, stage: Stage) {
        log::debug!("{}: {:?}", company, stage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_companies_trims_and_skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "  Acme Pvt Ltd  \n\n   \nGhost Co\r\n").unwrap();

        let companies = load_companies(file.path()).unwrap();
        assert_eq!(companies, vec!["Acme Pvt Ltd", "Ghost Co"]);
    }

    #[test]
    fn test_load_companies_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_companies(&dir.path().join("companies.txt")).unwrap_err();
        assert!(matches!(err, ScraperError::InputUnavailable { .. }));
    }

    #[test]
    fn test_config_defaults_use_fixed_paths() {
        let config = PipelineConfig::default();
        assert_eq!(config.input, PathBuf::from("companies.txt"));
        assert_eq!(config.output, PathBuf::from("companies_output.csv"));
        assert!(config.search_base.ends_with("?search_text="));
        assert_eq!(config.column_policy, ColumnPolicy::Positional);
    }

    #[test]
    fn test_summary_json() {
        let summary = RunSummary {
            output: PathBuf::from("out.csv"),
            processed: 2,
            written: 1,
            skipped: vec![SkippedCompany { company: "Ghost Co".to_string(), reason: SkipReason::NoDetailLink }],
        };

        let json: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();
        assert_eq!(json["written"], 1);
        assert_eq!(json["skipped"][0]["company"], "Ghost Co");
        assert_eq!(json["skipped"][0]["reason"], "no_detail_link");
    }

    #[test]
    fn test_summary_json_invalid_link_carries_href() {
        let summary = RunSummary {
            skipped: vec![SkippedCompany {
                company: "Broken Co".to_string(),
                reason: SkipReason::InvalidDetailLink { href: "http://".to_string() },
            }],
            ..Default::default()
        };

        let json: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();
        assert_eq!(json["skipped"][0]["reason"], "invalid_detail_link");
        assert_eq!(json["skipped"][0]["href"], "http://");
    }
}
