//! Runner-loop behavior against a scripted capturer: attempt order,
//! per-target failure isolation, and screenshot file handling.

use anyhow::{bail, Result};
use std::path::Path;
use std::sync::Mutex;
use toolshot_common::RunnerSettings;
use toolshot_runner::{
    PageCapturer, PageSnapshot, RunReport, TargetOutcome, VerificationRunner, VerificationTarget,
};
use url::Url;

/// Capturer that records every URL it is asked for and fails on demand.
struct ScriptedCapturer {
    visited: Mutex<Vec<String>>,
    fail_substrings: Vec<String>,
    title: String,
    png: Mutex<Vec<u8>>,
}

impl ScriptedCapturer {
    fn new(title: &str) -> Self {
        Self {
            visited: Mutex::new(Vec::new()),
            fail_substrings: Vec::new(),
            title: title.to_string(),
            png: Mutex::new(b"\x89PNG-stub".to_vec()),
        }
    }

    fn failing_on(mut self, substring: &str) -> Self {
        self.fail_substrings.push(substring.to_string());
        self
    }

    fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }

    fn set_png(&self, bytes: &[u8]) {
        *self.png.lock().unwrap() = bytes.to_vec();
    }
}

#[async_trait::async_trait]
impl PageCapturer for ScriptedCapturer {
    async fn capture(&self, url: &Url) -> Result<PageSnapshot> {
        self.visited.lock().unwrap().push(url.to_string());
        for s in &self.fail_substrings {
            if url.as_str().contains(s.as_str()) {
                bail!("net::ERR_FILE_NOT_FOUND loading {url}");
            }
        }
        Ok(PageSnapshot {
            url: url.clone(),
            title: self.title.clone(),
            screenshot_png: self.png.lock().unwrap().clone(),
        })
    }
}

fn settings_in(dir: &Path) -> RunnerSettings {
    RunnerSettings {
        base_dir: dir.to_path_buf(),
        out_dir: dir.join("verification"),
        ..RunnerSettings::default()
    }
}

fn targets(ids: &[&str]) -> Vec<VerificationTarget> {
    ids.iter().map(|id| VerificationTarget::new(*id)).collect()
}

#[tokio::test]
async fn attempts_every_target_in_order_despite_failures() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(dir.path());
    let capturer = ScriptedCapturer::new("Tool").failing_on("999-missing");
    let runner = VerificationRunner::new(settings.clone());

    let list = targets(&["001-background-remover", "999-missing", "036-retro-filter"]);
    let report = runner.run(&capturer, &list).await.unwrap();

    // Every target was attempted exactly once, in list order.
    let visited = capturer.visited();
    assert_eq!(visited.len(), 3);
    assert!(visited[0].contains("001-background-remover"));
    assert!(visited[1].contains("999-missing"));
    assert!(visited[2].contains("036-retro-filter"));

    assert_eq!(report.captured(), 2);
    assert_eq!(report.failed(), 1);
    match &report.records[1].outcome {
        TargetOutcome::Failed { error } => assert!(error.contains("999-missing")),
        other => panic!("expected failure for 999-missing, got {other:?}"),
    }

    // Screenshots exist only for the targets that succeeded.
    assert!(settings.out_dir.join("001-background-remover.png").exists());
    assert!(settings.out_dir.join("036-retro-filter.png").exists());
    assert!(!settings.out_dir.join("999-missing.png").exists());
}

#[tokio::test]
async fn rerun_overwrites_screenshots_instead_of_duplicating() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(dir.path());
    let capturer = ScriptedCapturer::new("Retro Filter");
    let runner = VerificationRunner::new(settings.clone());
    let list = targets(&["036-retro-filter"]);

    runner.run(&capturer, &list).await.unwrap();
    capturer.set_png(b"\x89PNG-second-render");
    runner.run(&capturer, &list).await.unwrap();

    let entries: Vec<_> = std::fs::read_dir(&settings.out_dir).unwrap().collect();
    assert_eq!(entries.len(), 1, "re-runs must overwrite, not duplicate");
    let bytes = std::fs::read(settings.out_dir.join("036-retro-filter.png")).unwrap();
    assert_eq!(bytes, b"\x89PNG-second-render");
}

#[tokio::test]
async fn title_checks_warn_but_do_not_block_capture() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(dir.path());
    let capturer = ScriptedCapturer::new("");
    let runner = VerificationRunner::new(settings.clone());

    let list = vec![VerificationTarget::with_title("036-retro-filter", "Retro Filter")];
    let report = runner.run(&capturer, &list).await.unwrap();

    assert_eq!(report.failed(), 0);
    assert_eq!(report.title_warnings(), 1);
    match &report.records[0].outcome {
        TargetOutcome::Captured { path, title_ok } => {
            assert!(!title_ok);
            assert!(path.exists(), "capture still proceeds on a title warning");
        }
        other => panic!("expected capture, got {other:?}"),
    }
}

#[tokio::test]
async fn matching_expected_title_is_clean() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(dir.path());
    let capturer = ScriptedCapturer::new("036 Retro Filter — Toolbox");
    let runner = VerificationRunner::new(settings.clone());

    let list = vec![VerificationTarget::with_title("036-retro-filter", "Retro Filter")];
    let report = runner.run(&capturer, &list).await.unwrap();

    assert_eq!(report.title_warnings(), 0);
    assert_eq!(report.summary(), "1 captured, 0 failed, 0 title warnings (1 targets)");
}

#[tokio::test]
async fn all_failures_still_produce_a_complete_report() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(dir.path());
    let capturer = ScriptedCapturer::new("Tool")
        .failing_on("tools/"); // every target URL matches
    let runner = VerificationRunner::new(settings.clone());

    let list = targets(&["001-background-remover", "036-retro-filter"]);
    let report: RunReport = runner.run(&capturer, &list).await.unwrap();

    assert_eq!(capturer.visited().len(), 2);
    assert_eq!(report.failed(), 2);
    assert_eq!(report.captured(), 0);
    // The output directory was still prepared even though nothing landed.
    assert!(settings.out_dir.is_dir());
}
