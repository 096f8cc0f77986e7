//! The verification runner: iterate tool pages, capture screenshots, report.
//!
//! For each [`VerificationTarget`] in order, the runner builds a local-file
//! URL, loads it through a [`PageCapturer`], and writes the resulting PNG to
//! the output directory. Failures are isolated per target: the runner logs
//! them, records them in the [`RunReport`], and moves on.
//!
//! - [`VerificationTarget`]: one tool page, identified by a path-safe id
//! - [`PageCapturer`] / [`FantocciniCapturer`]: the browser seam
//! - [`VerificationRunner`] / [`run_verification`]: the sequential loop
//! - [`RunReport`]: per-target outcomes for the summary line
pub mod capture;
pub mod report;
pub mod runner;
pub mod target;

pub use capture::{FantocciniCapturer, PageCapturer, PageSnapshot};
pub use report::{RunReport, TargetOutcome, TargetRecord};
pub use runner::{run_verification, VerificationRunner};
pub use target::{default_targets, VerificationTarget};
