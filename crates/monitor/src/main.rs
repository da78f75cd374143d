//! Remote Health Monitoring System - Main Entry Point
//!
//! Usage: `rhms [config.toml]`

use anyhow::{Context, Result};
use monitor::{init_logging, run, Settings};
use std::path::PathBuf;
use tracing::info;

fn main() -> Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(config_path.as_deref()).context("Failed to load settings")?;

    init_logging(&settings.logging)?;

    info!("=== Remote Health Monitoring v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Starting {}...", settings.system_name);

    let report = run(&settings)?;

    println!("{}", report.status);
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("Failed to serialize report")?
    );

    Ok(())
}
