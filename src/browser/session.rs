use crate::{browser::config::{ConnectionOptions, LaunchOptions},
            error::{Result, ScraperError}};
use headless_chrome::{Browser, Tab};
use std::{ffi::OsStr,
          sync::{Arc, Mutex, mpsc},
          thread,
          time::Duration};

/// Browser session that renders pages in a single Chrome/Chromium tab
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,

    /// Tab used for page loads; replaced after a load is abandoned
    tab: Mutex<Arc<Tab>>,

    /// Upper bound on each page load, from navigation start to content read-back
    navigation_timeout: Duration,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // Keep the browser alive across long company lists (default is 30 seconds).
        // This also bounds single CDP calls, so page loads carry their own deadline in `load`.
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));

        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }

        if let Some(dir) = options.user_data_dir {
            launch_opts.user_data_dir = Some(dir);
        }

        launch_opts.sandbox = options.sandbox;

        let browser = Browser::new(launch_opts).map_err(|e| ScraperError::LaunchFailed(e.to_string()))?;

        let tab = browser.new_tab().map_err(|e| ScraperError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        log::info!("Launched browser (headless: {})", options.headless);

        Ok(Self::with_tab(browser, tab, options.navigation_timeout))
    }

    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        let browser =
            Browser::connect(options.ws_url.clone()).map_err(|e| ScraperError::ConnectionFailed(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| ScraperError::TabOperationFailed(format!("Failed to create tab: {}", e)))?;

        log::info!("Connected to browser at {}", options.ws_url);

        Ok(Self::with_tab(browser, tab, Duration::from_millis(options.timeout)))
    }

    fn with_tab(browser: Browser, tab: Arc<Tab>, navigation_timeout: Duration) -> Self {
        tab.set_default_timeout(navigation_timeout);
        Self { browser, tab: Mutex::new(tab), navigation_timeout }
    }

    /// Get the tab used for page loads
    pub fn tab(&self) -> Result<Arc<Tab>> {
        let tab = self
            .tab
            .lock()
            .map_err(|e| ScraperError::TabOperationFailed(format!("Failed to lock tab: {}", e)))?;
        Ok(Arc::clone(&tab))
    }

    /// Get the underlying Browser instance
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    pub fn navigation_timeout(&self) -> Duration {
        self.navigation_timeout
    }

    /// Navigate to a URL and return the rendered document
    ///
    /// The whole sequence (navigation request, load wait, content read-back) must finish within
    /// the navigation timeout. A server that accepts the connection but never answers keeps
    /// `Page.navigate` pending, so the sequence runs on a worker thread and is abandoned on expiry.
    pub fn load(&self, url: &str) -> Result<String> {
        let tab = self.tab()?;
        let timeout_secs = self.navigation_timeout.as_secs();

        let worker_tab = Arc::clone(&tab);
        let worker_url = url.to_string();
        let result = run_with_deadline(url, self.navigation_timeout, move || {
            load_in_tab(&worker_tab, &worker_url, timeout_secs)
        });

        if let Err(ScraperError::Timeout { .. }) = result {
            self.abandon(tab);
        }

        result
    }

    /// Stop a hung load and move later loads to a fresh tab
    fn abandon(&self, tab: Arc<Tab>) {
        let _ = tab.stop_loading();

        let fresh = match self.browser.new_tab() {
            Ok(fresh) => fresh,
            Err(e) => {
                log::warn!("Failed to replace abandoned tab, reusing it: {}", e);
                return;
            }
        };
        fresh.set_default_timeout(self.navigation_timeout);

        match self.tab.lock() {
            Ok(mut current) => *current = fresh,
            Err(e) => log::warn!("Failed to replace abandoned tab: {}", e),
        }

        if let Err(e) = tab.close(false) {
            log::debug!("Failed to close abandoned tab: {}", e);
        }
    }

    /// Close the browser tab
    pub fn close(&self) -> Result<()> {
        // The browser process itself exits when `Browser` is dropped
        self.tab()?
            .close(false)
            .map_err(|e| ScraperError::TabOperationFailed(format!("Failed to close tab: {}", e)))?;
        Ok(())
    }
}

fn load_in_tab(tab: &Tab, url: &str, timeout_secs: u64) -> Result<String> {
    tab.navigate_to(url).map_err(|e| navigation_error(url, timeout_secs, e))?;
    tab.wait_until_navigated().map_err(|e| navigation_error(url, timeout_secs, e))?;
    tab.get_content().map_err(|e| ScraperError::ContentFailed(e.to_string()))
}

/// Classify a headless_chrome navigation failure
fn navigation_error(url: &str, timeout_secs: u64, e: anyhow::Error) -> ScraperError {
    if e.downcast_ref::<headless_chrome::util::Timeout>().is_some() {
        return ScraperError::Timeout { url: url.to_string(), timeout_secs };
    }

    ScraperError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e))
}

/// Run `job` on a worker thread and give up on it after `timeout`
///
/// An abandoned worker is left to finish on its own; its result is discarded.
pub(crate) fn run_with_deadline<T, F>(url: &str, timeout: Duration, job: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();

    thread::Builder::new()
        .name("page-load".to_string())
        .spawn(move || {
            let _ = tx.send(job());
        })
        .map_err(|e| ScraperError::NavigationFailed(format!("Failed to start load of {}: {}", url, e)))?;

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => {
            Err(ScraperError::Timeout { url: url.to_string(), timeout_secs: timeout.as_secs() })
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            Err(ScraperError::NavigationFailed(format!("Load of {} ended without a result", url)))
        }
    }
}
