use anyhow::{Context, Result};
use fantoccini::{Client, ClientBuilder};
use rand::Rng;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

use crate::extract;

/// Ceiling on progressive-scroll steps, in case page height keeps growing.
const MAX_SCROLL_STEPS: usize = 40;

/// Browser session for rendering search-results pages
pub struct Browser {
    client: Client,
    browser_type: BrowserType,
}

/// Supported browser types
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum BrowserType {
    /// Mozilla Firefox
    Firefox,
    /// Google Chrome/Chromium
    Chrome,
}

impl std::str::FromStr for BrowserType {
    type Err = anyhow::Error;

    /// Parse browser type from string (case-insensitive)
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "firefox" => Ok(BrowserType::Firefox),
            "chrome" | "chromium" => Ok(BrowserType::Chrome),
            _ => anyhow::bail!("Unsupported browser: {}", s),
        }
    }
}

impl BrowserType {
    /// Get the WebDriver URL for this browser type
    pub fn webdriver_url(&self) -> &'static str {
        match self {
            BrowserType::Firefox => "http://localhost:4444",
            BrowserType::Chrome => "http://localhost:9515",
        }
    }
}

impl Browser {
    /// Open a session against a locally running WebDriver.
    ///
    /// The session carries a randomized user-agent string and suppresses
    /// the usual automation tells. Connection failure is fatal to the run;
    /// there is no retry.
    pub async fn new(
        browser_type: BrowserType,
        headless: bool,
        proxy: Option<&str>,
    ) -> Result<Self> {
        info!("Connecting to {:?} WebDriver", browser_type);

        let user_agent = fake_user_agent::get_rua();
        let mut caps = serde_json::Map::new();

        match browser_type {
            BrowserType::Firefox => {
                let mut firefox_opts = serde_json::Map::new();
                let mut args = Vec::new();

                if headless {
                    args.push("--headless".to_string());
                }
                args.push("--width=1920".to_string());
                args.push("--height=1080".to_string());

                firefox_opts.insert("args".to_string(), json!(args));
                firefox_opts.insert(
                    "prefs".to_string(),
                    json!({
                        "general.useragent.override": user_agent,
                        "dom.webdriver.enabled": false,
                    }),
                );
                caps.insert("moz:firefoxOptions".to_string(), json!(firefox_opts));
            }
            BrowserType::Chrome => {
                let mut chrome_opts = serde_json::Map::new();
                let mut args = vec!["--no-sandbox".to_string()];

                if headless {
                    args.push("--headless=new".to_string());
                    args.push("--disable-gpu".to_string());
                    args.push("--disable-dev-shm-usage".to_string());
                }

                args.push("--disable-blink-features=AutomationControlled".to_string());
                args.push(format!("user-agent={user_agent}"));
                args.push("--window-size=1920,1080".to_string());

                chrome_opts.insert("args".to_string(), json!(args));
                chrome_opts.insert(
                    "excludeSwitches".to_string(),
                    json!(["enable-automation"]),
                );
                chrome_opts.insert("useAutomationExtension".to_string(), json!(false));
                caps.insert("goog:chromeOptions".to_string(), json!(chrome_opts));
            }
        }

        if let Some(proxy) = proxy {
            caps.insert(
                "proxy".to_string(),
                json!({
                    "proxyType": "manual",
                    "httpProxy": proxy,
                    "sslProxy": proxy,
                }),
            );
        }

        let webdriver_url = browser_type.webdriver_url();
        debug!("Connecting to WebDriver at {}", webdriver_url);

        let client = ClientBuilder::rustls()
            .capabilities(caps)
            .connect(webdriver_url)
            .await
            .context("Failed to connect to WebDriver")?;

        // Best-effort: hide navigator.webdriver from naive bot checks
        let _ = client
            .execute(
                "Object.defineProperty(navigator, 'webdriver', {get: () => undefined})",
                vec![],
            )
            .await;

        if let Err(e) = client.set_window_size(1920, 1080).await {
            debug!("Note: Could not set window size: {}", e);
        }

        Ok(Browser {
            client,
            browser_type,
        })
    }

    pub fn browser_type(&self) -> BrowserType {
        self.browser_type
    }

    pub async fn goto(&self, url: &str) -> Result<()> {
        info!("Navigating to {}", url);

        self.client.goto(url).await?;

        // Wait for the page to be ready before reading anything from it
        let wait_script = "return document.readyState === 'complete';";
        for _ in 0..20 {
            match self.client.execute(wait_script, vec![]).await {
                Ok(val) if val.as_bool().unwrap_or(false) => break,
                _ => tokio::time::sleep(Duration::from_millis(100)).await,
            }
        }

        Ok(())
    }

    /// Raw rendered HTML of the current page
    pub async fn page_source(&self) -> Result<String> {
        Ok(self.client.source().await?)
    }

    /// Scroll down half a viewport at a time until the page stops growing.
    ///
    /// Page height is re-measured after every step because lazy-loaded
    /// content keeps extending it. Each step pauses a random short interval
    /// to look like a human reader.
    pub async fn scroll_to_bottom(&self) -> Result<()> {
        let mut total_height = self.measure("return document.body.scrollHeight;").await?;
        let viewport_height = self.measure("return window.innerHeight;").await?;
        let step = (viewport_height / 2.0).max(1.0);
        let mut position = 0.0;

        for _ in 0..MAX_SCROLL_STEPS {
            if position >= total_height {
                break;
            }
            self.client
                .execute(&format!("window.scrollTo(0, {position});"), vec![])
                .await?;
            position += step;

            let pause = {
                let mut rng = rand::thread_rng();
                Duration::from_millis(rng.gen_range(500..1500))
            };
            tokio::time::sleep(pause).await;

            let new_height = self.measure("return document.body.scrollHeight;").await?;
            if new_height > total_height {
                total_height = new_height;
            }
        }

        debug!("Scrolled to bottom ({}px)", total_height);
        Ok(())
    }

    /// Whether a usable "next page" control is present, decided on the
    /// rendered HTML. A rendered-but-disabled control counts as absent.
    ///
    /// Read failures count as "no next page"; pagination treats that as
    /// the natural end of results rather than an error.
    pub async fn has_next_page(&self) -> bool {
        match self.page_source().await {
            Ok(html) => extract::has_enabled_next_control(&html),
            Err(_) => false,
        }
    }

    async fn measure(&self, script: &str) -> Result<f64> {
        let value = self.client.execute(script, vec![]).await?;
        Ok(value.as_f64().unwrap_or(0.0))
    }

    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        info!("Browser session closed");
        Ok(())
    }
}
