// src/core/browser.rs
//
// Headless Chrome session for JavaScript-rendered contract pages.

use std::ffi::OsStr;
use std::fmt::Display;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use headless_chrome::{Browser, LaunchOptions, Tab};

use super::net::{FetchError, PageFetcher};
use crate::config::consts::{NAV_TIMEOUT_MS, USER_AGENT};

struct Session {
    // Field order matters: the tab must go before the browser process.
    tab: Arc<Tab>,
    _browser: Browser,
}

/// Owns exactly one browser process and one tab. Closed explicitly by the
/// runner, and again on drop if the runner bailed out early.
pub struct BrowserFetcher {
    session: Option<Session>,
    render_wait: Duration,
}

impl BrowserFetcher {
    pub fn launch(render_wait: Duration) -> Result<Self, FetchError> {
        let args = vec![
            OsStr::new("--disable-blink-features=AutomationControlled"),
            OsStr::new("--disable-dev-shm-usage"),
        ];
        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .args(args)
            .idle_browser_timeout(Duration::from_secs(600))
            .build()
            .map_err(|e| FetchError::Launch(e.to_string()))?;

        let browser = Browser::new(options).map_err(|e| FetchError::Launch(e.to_string()))?;
        let tab = browser.new_tab().map_err(|e| FetchError::Launch(e.to_string()))?;
        tab.set_default_timeout(Duration::from_millis(NAV_TIMEOUT_MS));
        tab.set_user_agent(USER_AGENT, None, None)
            .map_err(|e| FetchError::Launch(e.to_string()))?;

        logf!("Browser session started (render wait {} ms)", render_wait.as_millis());
        Ok(Self { session: Some(Session { tab, _browser: browser }), render_wait })
    }
}

impl PageFetcher for BrowserFetcher {
    fn fetch(&mut self, url: &str) -> Result<String, FetchError> {
        let session = self.session.as_ref().ok_or(FetchError::Closed)?;
        session.tab.navigate_to(url).map_err(nav_err(url))?;
        session.tab.wait_until_navigated().map_err(nav_err(url))?;

        // Client-side widgets fill in the contract block after load.
        if !self.render_wait.is_zero() {
            thread::sleep(self.render_wait);
        }

        session.tab.get_content().map_err(nav_err(url))
    }

    fn close(&mut self) -> Result<(), FetchError> {
        if let Some(session) = self.session.take() {
            if let Err(e) = session.tab.close(true) {
                logw!("Closing tab failed: {e}");
            }
            logf!("Browser session closed");
        }
        Ok(())
    }
}

fn nav_err<E: Display>(url: &str) -> impl Fn(E) -> FetchError + '_ {
    move |e| FetchError::Navigation { url: s!(url), reason: e.to_string() }
}

impl Drop for BrowserFetcher {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
