use serde::Serialize;
use std::path::PathBuf;

/// How a single target ended up.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TargetOutcome {
    /// The page loaded and a screenshot was written. `title_ok` is false
    /// when the title was empty or did not contain the expected text; that
    /// is a diagnostic, not a failure.
    Captured { path: PathBuf, title_ok: bool },
    /// Navigation, capture, or the file write failed; nothing was written.
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct TargetRecord {
    pub id: String,
    #[serde(flatten)]
    pub outcome: TargetOutcome,
}

/// Per-target outcomes for a whole run, in attempt order.
///
/// The report is an observability artifact: however it looks, the process
/// still exits 0.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub records: Vec<TargetRecord>,
}

impl RunReport {
    pub fn push(&mut self, record: TargetRecord) {
        self.records.push(record);
    }

    pub fn captured(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, TargetOutcome::Captured { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, TargetOutcome::Failed { .. }))
            .count()
    }

    pub fn title_warnings(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, TargetOutcome::Captured { title_ok: false, .. }))
            .count()
    }

    /// One-line summary for the end of the run.
    pub fn summary(&self) -> String {
        format!(
            "{} captured, {} failed, {} title warnings ({} targets)",
            self.captured(),
            self.failed(),
            self.title_warnings(),
            self.records.len()
        )
    }
}
