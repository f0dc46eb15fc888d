//! Check Command - Verify that a conversion run can succeed
//!
//! Runs two smoke checks before any real work:
//!
//! - the FAT API base URL answers with a success status
//! - the output directory accepts new directories and files

use crate::output;
use anyhow::Context;
use fat2fsh_core::{Fat2FshConfig, RegistryClient};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Timeout for the API reachability probe
const PING_TIMEOUT: Duration = Duration::from_secs(10);

/// Name of the scratch directory created inside the output directory
const PROBE_DIR: &str = ".fat2fsh-check";

/// Execute the check command
pub async fn check_command(
    output_dir: &Path,
    base_url: Option<String>,
    mut config: Fat2FshConfig,
) -> anyhow::Result<()> {
    if let Some(base_url) = base_url {
        config.api.base_url = base_url;
    }

    let api = check_api(&config).await;
    output::print_check("FAT API is reachable", &api);

    let dirs = check_output_dir(output_dir, &config);
    output::print_check("Directory creation and file writing works", &dirs);

    let passed = [&api, &dirs].iter().filter(|r| r.is_ok()).count();
    println!("\nResults: {}/2 checks passed", passed);

    if passed < 2 {
        anyhow::bail!("{} of 2 checks failed", 2 - passed);
    }
    Ok(())
}

async fn check_api(config: &Fat2FshConfig) -> anyhow::Result<()> {
    let client = RegistryClient::new(&config.api)?;
    info!("Pinging {}", client.base_url());
    client.ping(PING_TIMEOUT).await?;
    Ok(())
}

/// Create the artifact layout under a scratch directory, write a file, clean up
fn check_output_dir(output_dir: &Path, config: &Fat2FshConfig) -> anyhow::Result<()> {
    let probe_root = output_dir.join(PROBE_DIR);
    let raw_dir = probe_root.join(&config.output.raw_dir);
    let fsh_dir = probe_root.join(&config.output.fsh_dir);

    fs::create_dir_all(&raw_dir)
        .with_context(|| format!("Failed to create {}", raw_dir.display()))?;
    fs::create_dir_all(&fsh_dir)
        .with_context(|| format!("Failed to create {}", fsh_dir.display()))?;

    let probe_file = raw_dir.join("test.json");
    let write_result = fs::write(&probe_file, r#"{"test": "data"}"#)
        .with_context(|| format!("Failed to write {}", probe_file.display()));

    fs::remove_dir_all(&probe_root)
        .with_context(|| format!("Failed to clean up {}", probe_root.display()))?;
    debug!("Removed probe directory {}", probe_root.display());

    write_result
}
