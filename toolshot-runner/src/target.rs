use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use url::Url;

/// One tool page to be visually verified.
///
/// Constructed up-front from the manifest (or the built-in list), read-only
/// for the duration of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationTarget {
    /// Path-safe identifier; resolves to `tools/<id>/index.html` and names
    /// the screenshot file.
    pub id: String,
    /// Optional expected display title, compared loosely after load.
    pub expected_title: Option<String>,
}

impl VerificationTarget {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            expected_title: None,
        }
    }

    pub fn with_title(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            expected_title: Some(title.into()),
        }
    }

    /// Build the `file://` URL of this target's page under `base_dir`.
    ///
    /// Relative base directories are resolved against the current working
    /// directory, since `file://` URLs must be absolute.
    pub fn index_url(&self, base_dir: &Path) -> Result<Url> {
        let base = if base_dir.is_absolute() {
            base_dir.to_path_buf()
        } else {
            std::env::current_dir()?.join(base_dir)
        };
        let index = base.join("tools").join(&self.id).join("index.html");
        Url::from_file_path(&index)
            .map_err(|_| anyhow!("cannot express {} as a file URL", index.display()))
    }

    /// Deterministic screenshot path for this target, overwritten on re-runs.
    pub fn screenshot_path(&self, out_dir: &Path) -> PathBuf {
        out_dir.join(format!("{}.png", self.id))
    }
}

/// Built-in target list used when neither the manifest nor the CLI names
/// any targets. Ids mirror the `tools/` tree this runner was written for.
pub fn default_targets() -> Vec<VerificationTarget> {
    [
        "001-background-remover",
        "011-super-resolution-4x",
        "021-object-removal",
        "036-retro-filter",
        "050-id-photo-generator",
    ]
    .into_iter()
    .map(VerificationTarget::new)
    .collect()
}
