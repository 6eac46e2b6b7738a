use crate::browser::BrowserSession;
use crate::error::Result;

/// Source of rendered HTML for a URL
///
/// The pipeline only ever needs "give me the page at this URL", so the browser sits behind this
/// trait and tests can swap in canned pages.
pub trait PageFetcher {
    /// Load `url` and return the rendered document
    ///
    /// A page that does not finish loading in time must surface as
    /// [`ScraperError::Timeout`](crate::error::ScraperError::Timeout).
    fn fetch_html(&self, url: &str) -> Result<String>;
}

impl PageFetcher for BrowserSession {
    fn fetch_html(&self, url: &str) -> Result<String> {
        log::debug!("Fetching {}", url);
        let html = self.load(url)?;
        log::debug!("Fetched {} ({} bytes)", url, html.len());
        Ok(html)
    }
}

impl<F: PageFetcher + ?Sized> PageFetcher for &F {
    fn fetch_html(&self, url: &str) -> Result<String> {
        (**self).fetch_html(url)
    }
}
