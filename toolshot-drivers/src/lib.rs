//! Driver layer for browser automation.
//!
//! This crate exposes the browser driver and page helpers the verification
//! runner uses to load tool pages and capture screenshots.
//!
//! - [`browser::driver::ToolshotDriver`]: WebDriver client wrapper
//! - [`browser::page::ToolshotPage`]: navigation, readiness wait, and capture
pub mod browser;
