use anyhow::Result;
use toolshot_drivers::browser::driver::ToolshotDriver;
use url::Url;

/// What a single page load produced: the title for the readiness check and
/// the PNG bytes for the verification artifact.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    pub url: Url,
    pub title: String,
    pub screenshot_png: Vec<u8>,
}

/// Seam between the runner loop and the browser, so the loop's ordering and
/// isolation behavior can be exercised without a WebDriver endpoint.
#[async_trait::async_trait]
pub trait PageCapturer: Send + Sync {
    async fn capture(&self, url: &Url) -> Result<PageSnapshot>;
}

/// Concrete capturer backed by the fantoccini-based driver.
///
/// One browser session is established at [`connect`](Self::connect) and
/// reused for every target; [`close`](Self::close) releases it after the run.
pub struct FantocciniCapturer {
    driver: ToolshotDriver,
}

impl FantocciniCapturer {
    pub async fn connect(
        webdriver_url: &str,
        headless: bool,
        window: (u32, u32),
    ) -> Result<Self> {
        let driver = ToolshotDriver::connect(webdriver_url, headless, window).await?;
        Ok(Self { driver })
    }

    pub async fn close(self) -> Result<()> {
        self.driver.close().await
    }
}

#[async_trait::async_trait]
impl PageCapturer for FantocciniCapturer {
    async fn capture(&self, url: &Url) -> Result<PageSnapshot> {
        let page = self.driver.goto(url.as_str()).await?;
        let title = page.title().await?;
        let screenshot_png = page.screenshot_png().await?;
        Ok(PageSnapshot {
            url: url.clone(),
            title,
            screenshot_png,
        })
    }
}
