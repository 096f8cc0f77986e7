use crate::browser::page::ToolshotPage;
use anyhow::Result;
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use std::collections::HashMap;
use webdriver::capabilities::Capabilities;

/// Thin wrapper around a `fantoccini` WebDriver client, configured for
/// deterministic local-page rendering.
pub struct ToolshotDriver {
    pub client: Client,
}

impl ToolshotDriver {
    /// Create a new driver connected to a running WebDriver service
    /// (Chromedriver at `http://localhost:9515` in the default setup).
    ///
    /// The window is sized before any navigation so every capture in the
    /// session uses the same viewport.
    pub async fn connect(
        webdriver_url: &str,
        headless: bool,
        window: (u32, u32),
    ) -> Result<Self> {
        let mut caps = Capabilities::new();
        let mut chrome_opts = HashMap::new();

        let mut args = vec![
            "--disable-gpu".to_string(),
            "--hide-scrollbars".to_string(),
            "--mute-audio".to_string(),
            "--force-color-profile=srgb".to_string(),
            format!("--window-size={},{}", window.0, window.1),
        ];
        if headless {
            args.push("--headless=new".to_string());
        }
        chrome_opts.insert("args".to_string(), json!(args));
        caps.insert("goog:chromeOptions".to_string(), json!(chrome_opts));

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(webdriver_url)
            .await?;
        client.set_window_size(window.0, window.1).await?;

        Ok(Self { client })
    }

    /// Navigate to `url` and return a [`ToolshotPage`] once the document
    /// body is present.
    pub async fn goto(&self, url: &str) -> Result<ToolshotPage> {
        let page = ToolshotPage::new(self.client.clone());
        page.goto(url).await?;
        Ok(page)
    }

    /// Close the underlying browser session.
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }
}
