use anyhow::Result;
use fantoccini::{Client, Locator};
use std::time::Duration;
use tracing::debug;

/// How long [`ToolshotPage::goto`] pauses after the body appears, giving
/// stylesheets and first-paint scripts a chance to settle before capture.
const SETTLE_DELAY: Duration = Duration::from_millis(500);

/// High-level page wrapper for navigation, readiness checks, and capture.
///
/// The wrapped [`Client`] is a cheap handle; clones share one browser
/// session, so a single page is reused for every target in a run.
pub struct ToolshotPage {
    pub(crate) client: Client,
}

impl ToolshotPage {
    /// Construct a page wrapper around an existing WebDriver client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Navigate to `url` and wait for the document body to appear.
    ///
    /// The body wait is a readiness proxy, not a functional assertion: a
    /// page that renders an error body still counts as loaded.
    pub async fn goto(&self, url: &str) -> Result<()> {
        self.client.goto(url).await?;
        self.client
            .wait()
            .for_element(Locator::Css("body"))
            .await?;
        tokio::time::sleep(SETTLE_DELAY).await;
        debug!(target: "browser.page", %url, "document body present");
        Ok(())
    }

    /// Return the page title.
    pub async fn title(&self) -> Result<String> {
        self.client.title().await.map_err(anyhow::Error::from)
    }

    /// Return the current page URL.
    pub async fn current_url(&self) -> Result<String> {
        self.client
            .current_url()
            .await
            .map(|url| url.to_string())
            .map_err(anyhow::Error::from)
    }

    /// Capture the current window as PNG bytes.
    pub async fn screenshot_png(&self) -> Result<Vec<u8>> {
        self.client.screenshot().await.map_err(anyhow::Error::from)
    }
}
