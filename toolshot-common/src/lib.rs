//! Common types and utilities shared across Toolshot crates.
//!
//! This crate defines the runner settings, observability helpers, and shared
//! error types used throughout the Toolshot workspace. It is intentionally
//! lightweight and dependency‑minimal so that all crates can depend on it
//! without introducing heavy transitive costs.
//!
//! # Overview
//!
//! - [`RunnerSettings`]: Directories and browser options for a verification run
//! - [`observability`]: Centralised tracing/logging initialisation
//! - [`ToolshotError`] and [`Result`]: Shared error handling
//!
//! # Examples
//!
//! Constructing default settings:
//!
//! ```rust
//! use toolshot_common::RunnerSettings;
//!
//! let mut settings = RunnerSettings::default();
//! settings.headless = false;
//! assert_eq!(settings.out_dir.to_str(), Some("verification"));
//! ```
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod observability;

/// Settings for a verification run.
///
/// This structure is passed to the runner and the driver layer to configure
/// where pages are read from, where screenshots land, and how the browser
/// session is established.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerSettings {
    /// Directory containing the `tools/<id>/index.html` tree. Relative paths
    /// are resolved against the current working directory.
    pub base_dir: PathBuf,
    /// Directory screenshots are written to. Created up‑front if missing.
    pub out_dir: PathBuf,
    /// WebDriver endpoint the browser session connects to.
    pub webdriver_url: String,
    /// Whether to run the browser without a visible window.
    pub headless: bool,
    /// Window size applied before capture, as `(width, height)` pixels.
    pub window: (u32, u32),
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            out_dir: PathBuf::from("verification"),
            webdriver_url: "http://localhost:9515".to_string(),
            headless: true,
            window: (1280, 800),
        }
    }
}

/// Error types used across the Toolshot system.
#[derive(thiserror::Error, Debug)]
pub enum ToolshotError {
    /// A driver (browser, WebDriver endpoint) reported an error during setup.
    #[error("Driver error: {0}")]
    Driver(#[from] anyhow::Error),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The output directory could not be prepared.
    #[error("Output directory error: {0}")]
    OutputDir(#[source] std::io::Error),
}

/// Convenient alias for results that use [`ToolshotError`].
pub type Result<T> = std::result::Result<T, ToolshotError>;
