// src/render/chrome.rs
// Headless Chrome via the DevTools protocol. Blocking, one tab per session.

use std::ffi::OsStr;
use std::sync::Arc;

use headless_chrome::{Browser, LaunchOptions, Tab};

use super::{RenderSession, Renderer};
use crate::config::ExtractOptions;
use crate::error::ExtractError;

/// Launches a fresh headless browser per session.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChromeRenderer;

impl Renderer for ChromeRenderer {
    type Session = ChromeSession;

    fn launch(&self, opts: &ExtractOptions) -> Result<ChromeSession, ExtractError> {
        let launch = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .window_size(Some(opts.viewport))
            .args(vec![OsStr::new("--disable-gpu")])
            .build()
            .map_err(|e| ExtractError::Session(e.to_string()))?;

        let browser = Browser::new(launch).map_err(|e| ExtractError::Session(e.to_string()))?;
        let tab = browser.new_tab().map_err(|e| ExtractError::Session(e.to_string()))?;
        tab.set_user_agent(&opts.user_agent, None, None)
            .map_err(|e| ExtractError::Session(e.to_string()))?;

        logd!("chrome session up ({}x{})", opts.viewport.0, opts.viewport.1);
        Ok(ChromeSession { tab, _browser: browser })
    }
}

/// Field order matters: the tab goes before the browser process it lives in.
pub struct ChromeSession {
    tab: Arc<Tab>,
    _browser: Browser,
}

impl RenderSession for ChromeSession {
    fn load(&mut self, url: &str) -> Result<(), ExtractError> {
        let fail = |e: &dyn std::fmt::Display| ExtractError::PageLoad {
            url: s!(url),
            reason: e.to_string(),
        };
        self.tab.navigate_to(url).map_err(|e| fail(&e))?;
        self.tab.wait_until_navigated().map_err(|e| fail(&e))?;
        Ok(())
    }

    fn content(&mut self) -> Result<String, ExtractError> {
        self.tab.get_content().map_err(|e| ExtractError::Render(e.to_string()))
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        logd!("closing chrome session");
    }
}
