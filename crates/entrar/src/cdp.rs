//! Real browser control via the Chrome DevTools Protocol.
//!
//! Compiled with the `browser` feature. Uses chromiumoxide to launch a
//! chromium instance and drive one [`CdpSession`] per page. Each session
//! operation is a single CDP round-trip; failures map into [`EntrarError`]
//! variants and propagate without retry.

use std::sync::Arc;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::fixture::Fixture;
use crate::locator::Locator;
use crate::result::{EntrarError, EntrarResult};
use crate::session::{Action, ElementHandle, Session};

/// Browser launch configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

/// Browser instance with a live CDP connection
#[derive(Debug)]
pub struct Browser {
    inner: Arc<Mutex<CdpBrowser>>,
    #[allow(dead_code)]
    handle: tokio::task::JoinHandle<()>,
}

impl Browser {
    /// Launch a new browser instance
    ///
    /// # Errors
    ///
    /// Returns error if the browser cannot be launched
    pub async fn launch(config: BrowserConfig) -> EntrarResult<Self> {
        let mut builder = CdpConfig::builder();

        if !config.headless {
            builder = builder.with_head();
        }

        if !config.sandbox {
            builder = builder.no_sandbox();
        }

        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder
            .build()
            .map_err(|e| EntrarError::BrowserLaunchError { message: e })?;

        let (browser, mut handler) = CdpBrowser::launch(cdp_config).await.map_err(|e| {
            EntrarError::BrowserLaunchError {
                message: e.to_string(),
            }
        })?;

        // Drive the CDP event stream until the connection drops.
        let handle = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        debug!(headless = config.headless, "browser launched");
        Ok(Self {
            inner: Arc::new(Mutex::new(browser)),
            handle,
        })
    }

    /// Open a fresh session (one page/tab)
    ///
    /// # Errors
    ///
    /// Returns error if the page cannot be created
    pub async fn new_session(&self) -> EntrarResult<CdpSession> {
        let browser = self.inner.lock().await;
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| EntrarError::PageError {
                message: e.to_string(),
            })?;

        Ok(CdpSession {
            url: String::from("about:blank"),
            inner: Arc::new(Mutex::new(page)),
        })
    }

    /// Close the browser
    ///
    /// # Errors
    ///
    /// Returns error if shutdown fails
    pub async fn close(self) -> EntrarResult<()> {
        let mut browser = self.inner.lock().await;
        browser
            .close()
            .await
            .map_err(|e| EntrarError::BrowserLaunchError {
                message: e.to_string(),
            })?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ElementInfo {
    tag: String,
    text: Option<String>,
}

/// One live browser page driven over CDP
#[derive(Debug)]
pub struct CdpSession {
    url: String,
    inner: Arc<Mutex<CdpPage>>,
}

impl CdpSession {
    async fn eval<T: serde::de::DeserializeOwned>(&self, expr: String) -> EntrarResult<T> {
        let page = self.inner.lock().await;
        let result = page
            .evaluate(expr)
            .await
            .map_err(|e| EntrarError::PageError {
                message: e.to_string(),
            })?;
        result.into_value().map_err(|e| EntrarError::PageError {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl Session for CdpSession {
    async fn navigate(&mut self, url: &str) -> EntrarResult<()> {
        debug!(url, "navigate");
        {
            let page = self.inner.lock().await;
            page.goto(url)
                .await
                .map_err(|e| EntrarError::NavigationError {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
        }
        self.url = url.to_string();
        Ok(())
    }

    async fn locate(&mut self, locator: &Locator) -> EntrarResult<ElementHandle> {
        let query = locator.to_query();
        let expr = format!(
            "(() => {{ const el = {query}; \
             return el ? {{ tag: el.tagName.toLowerCase(), text: el.innerText ?? el.textContent }} : null; }})()"
        );
        let info: Option<ElementInfo> = self.eval(expr).await?;
        info.map_or_else(
            || {
                Err(EntrarError::ElementNotFound {
                    locator: locator.to_string(),
                })
            },
            |info| {
                // The handle carries the lookup expression; actions re-resolve
                // it, so a reload between locate and act is tolerated.
                Ok(ElementHandle {
                    id: query.clone(),
                    tag_name: info.tag,
                    text_content: info.text,
                })
            },
        )
    }

    async fn act(&mut self, element: &ElementHandle, action: Action) -> EntrarResult<()> {
        let query = &element.id;
        let expr = match action {
            Action::Click => {
                format!(
                    "(() => {{ const el = {query}; if (!el) return false; el.click(); return true; }})()"
                )
            }
            Action::Fill(text) => {
                let escaped =
                    serde_json::to_string(&text).map_err(|e| EntrarError::InputError {
                        message: e.to_string(),
                    })?;
                format!(
                    "(() => {{ const el = {query}; if (!el) return false; \
                     el.value = {escaped}; \
                     el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
                     el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
                     return true; }})()"
                )
            }
        };
        let resolved: bool = self.eval(expr).await?;
        if resolved {
            Ok(())
        } else {
            Err(EntrarError::ElementNotFound {
                locator: query.clone(),
            })
        }
    }

    async fn read_text(&mut self, element: &ElementHandle) -> EntrarResult<String> {
        let query = &element.id;
        let expr = format!(
            "(() => {{ const el = {query}; \
             return el ? (el.innerText ?? el.textContent ?? '') : null; }})()"
        );
        let text: Option<String> = self.eval(expr).await?;
        text.ok_or_else(|| EntrarError::ElementNotFound {
            locator: query.clone(),
        })
    }

    fn current_url(&self) -> &str {
        &self.url
    }
}

/// Fixture owning one browser and one session for a test's duration.
#[derive(Debug, Default)]
pub struct BrowserFixture {
    config: BrowserConfig,
    browser: Option<Browser>,
    session: Option<CdpSession>,
}

impl BrowserFixture {
    /// Create a fixture with the given launch configuration
    #[must_use]
    pub fn new(config: BrowserConfig) -> Self {
        Self {
            config,
            browser: None,
            session: None,
        }
    }

    /// The live session, once set up.
    ///
    /// # Errors
    ///
    /// Returns [`EntrarError::InvalidState`] before setup or after teardown.
    pub fn session_mut(&mut self) -> EntrarResult<&mut CdpSession> {
        self.session.as_mut().ok_or(EntrarError::InvalidState {
            message: "browser fixture not set up".to_string(),
        })
    }
}

#[async_trait]
impl Fixture for BrowserFixture {
    async fn setup(&mut self) -> EntrarResult<()> {
        let browser = Browser::launch(self.config.clone()).await?;
        self.session = Some(browser.new_session().await?);
        self.browser = Some(browser);
        Ok(())
    }

    async fn teardown(&mut self) -> EntrarResult<()> {
        self.session = None;
        if let Some(browser) = self.browser.take() {
            browser.close().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = BrowserConfig::default();
        assert!(config.headless);
        assert!(config.sandbox);
        assert!(config.chromium_path.is_none());
    }

    #[test]
    fn test_config_builders() {
        let config = BrowserConfig::default()
            .with_headless(false)
            .with_no_sandbox()
            .with_chromium_path("/usr/bin/chromium");
        assert!(!config.headless);
        assert!(!config.sandbox);
        assert_eq!(config.chromium_path.as_deref(), Some("/usr/bin/chromium"));
    }
}
