//! Page rendering through a Chrome/Chromium instance
//!
//! - [`LaunchOptions`] / [`ConnectionOptions`]: how to obtain a browser
//! - [`BrowserSession`]: a single-tab session that loads pages with a timeout
//! - [`PageFetcher`]: the seam the pipeline fetches pages through

pub mod config;
pub mod fetcher;
pub mod session;

pub use config::{ConnectionOptions, DEFAULT_NAVIGATION_TIMEOUT, LaunchOptions};
pub use fetcher::PageFetcher;
pub use session::BrowserSession;
