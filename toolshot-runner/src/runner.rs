use crate::capture::{FantocciniCapturer, PageCapturer};
use crate::report::{RunReport, TargetOutcome, TargetRecord};
use crate::target::VerificationTarget;
use std::fs;
use std::path::PathBuf;
use toolshot_common::{Result, RunnerSettings, ToolshotError};
use tracing::{error, info, warn};

/// Sequential verification loop over an ordered target list.
///
/// Each target is handled in isolation: any error while building the URL,
/// loading the page, or writing the screenshot is logged and recorded, and
/// the loop moves on to the next target.
pub struct VerificationRunner {
    settings: RunnerSettings,
}

impl VerificationRunner {
    pub fn new(settings: RunnerSettings) -> Self {
        Self { settings }
    }

    /// Run every target in order against `capturer`.
    ///
    /// Only failing to prepare the output directory is fatal; per-target
    /// failures never are.
    pub async fn run(
        &self,
        capturer: &dyn PageCapturer,
        targets: &[VerificationTarget],
    ) -> Result<RunReport> {
        fs::create_dir_all(&self.settings.out_dir).map_err(ToolshotError::OutputDir)?;

        let mut report = RunReport::default();
        for target in targets {
            let outcome = match self.verify_one(capturer, target).await {
                Ok((path, title_ok)) => {
                    info!(target: "runner", id = %target.id, path = %path.display(), "screenshot saved");
                    TargetOutcome::Captured { path, title_ok }
                }
                Err(e) => {
                    error!(target: "runner", id = %target.id, "verification failed: {e:#}");
                    TargetOutcome::Failed {
                        error: format!("{e:#}"),
                    }
                }
            };
            report.push(TargetRecord {
                id: target.id.clone(),
                outcome,
            });
        }
        Ok(report)
    }

    async fn verify_one(
        &self,
        capturer: &dyn PageCapturer,
        target: &VerificationTarget,
    ) -> anyhow::Result<(PathBuf, bool)> {
        let url = target.index_url(&self.settings.base_dir)?;
        info!(target: "runner", "Verifying {} at {}", target.id, url);

        let snapshot = capturer.capture(&url).await?;
        let title_ok = self.check_title(target, &snapshot.title);

        let path = target.screenshot_path(&self.settings.out_dir);
        fs::write(&path, &snapshot.screenshot_png)?;
        Ok((path, title_ok))
    }

    /// Loose readiness check on the loaded title. Mismatches are surfaced in
    /// the log and the report but never block the capture.
    fn check_title(&self, target: &VerificationTarget, title: &str) -> bool {
        if title.trim().is_empty() {
            warn!(target: "runner", id = %target.id, "page title is empty");
            return false;
        }
        if let Some(expected) = &target.expected_title {
            if !title.contains(expected.as_str()) {
                warn!(
                    target: "runner",
                    id = %target.id,
                    %title,
                    %expected,
                    "page title does not contain expected text"
                );
                return false;
            }
        }
        true
    }
}

/// Verify `targets` with a browser session scoped to this call.
///
/// The session is established before the first target and released after the
/// last one, regardless of how many targets failed in between.
pub async fn run_verification(
    settings: &RunnerSettings,
    targets: &[VerificationTarget],
) -> Result<RunReport> {
    let capturer = FantocciniCapturer::connect(
        &settings.webdriver_url,
        settings.headless,
        settings.window,
    )
    .await
    .map_err(ToolshotError::Driver)?;

    let runner = VerificationRunner::new(settings.clone());
    let report = runner.run(&capturer, targets).await;

    if let Err(e) = capturer.close().await {
        warn!(target: "runner", "failed to close browser session: {e:#}");
    }
    report
}
