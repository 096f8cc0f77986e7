use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use toolshot_common::observability::{init_logging, LogConfig};
use toolshot_common::RunnerSettings;
use toolshot_config::{ToolshotConfig, ToolshotConfigLoader};
use toolshot_runner::{default_targets, run_verification, VerificationTarget};
use tracing::{info, warn};

/// Load each tool page in a headless browser and capture a screenshot for
/// manual inspection. Per-target failures are logged and skipped; the
/// process exits 0 either way.
#[derive(Debug, Parser)]
#[command(name = "toolshot", version)]
struct Cli {
    /// Manifest path. A missing file is fine: env overrides and the
    /// built-in target list apply.
    #[arg(short, long, default_value = "toolshot.yaml")]
    config: PathBuf,

    /// Directory containing the `tools/<id>/index.html` tree.
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Directory screenshots are written to.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// WebDriver endpoint to connect to.
    #[arg(long, env = "TOOLSHOT_WEBDRIVER_URL")]
    webdriver_url: Option<String>,

    /// Run with a visible browser window instead of headless.
    #[arg(long)]
    headed: bool,

    /// Verify only these target ids instead of the configured list.
    targets: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = ToolshotConfigLoader::new()
        .with_optional_file(&cli.config)
        .load()?;

    init_logging(LogConfig::default())?;

    let settings = build_settings(&cli, &cfg);
    let targets = select_targets(&cli, &cfg);
    info!(
        target: "toolshot",
        count = targets.len(),
        base_dir = %settings.base_dir.display(),
        out_dir = %settings.out_dir.display(),
        "starting verification run"
    );

    let report = run_verification(&settings, &targets).await?;

    // Best-effort machine-readable companion to the screenshots.
    let report_path = settings.out_dir.join("report.json");
    match serde_json::to_vec_pretty(&report) {
        Ok(bytes) => {
            if let Err(e) = std::fs::write(&report_path, bytes) {
                warn!(target: "toolshot", "could not write {}: {e}", report_path.display());
            }
        }
        Err(e) => warn!(target: "toolshot", "could not serialize run report: {e}"),
    }

    info!(target: "toolshot", "run complete: {}", report.summary());

    // Per-target failures are visible in the log and the report, never in
    // the exit code.
    Ok(())
}

fn build_settings(cli: &Cli, cfg: &ToolshotConfig) -> RunnerSettings {
    RunnerSettings {
        base_dir: cli
            .base_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&cfg.paths.base_dir)),
        out_dir: cli
            .out_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&cfg.paths.out_dir)),
        webdriver_url: cli
            .webdriver_url
            .clone()
            .unwrap_or_else(|| cfg.browser.webdriver_url.clone()),
        headless: !cli.headed && cfg.browser.headless,
        window: (cfg.browser.window_width, cfg.browser.window_height),
    }
}

fn select_targets(cli: &Cli, cfg: &ToolshotConfig) -> Vec<VerificationTarget> {
    let configured: Vec<VerificationTarget> = cfg
        .targets
        .iter()
        .filter(|t| t.enabled.unwrap_or(true))
        .map(|t| match &t.title {
            Some(title) => VerificationTarget::with_title(&t.id, title),
            None => VerificationTarget::new(&t.id),
        })
        .collect();

    if !cli.targets.is_empty() {
        // Positional ids win; pick up the expected title when configured.
        return cli
            .targets
            .iter()
            .map(|id| {
                configured
                    .iter()
                    .find(|t| &t.id == id)
                    .cloned()
                    .unwrap_or_else(|| VerificationTarget::new(id))
            })
            .collect();
    }

    if configured.is_empty() {
        default_targets()
    } else {
        configured
    }
}
