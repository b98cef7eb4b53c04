use anyhow::{Context, Result};
use tracing::info;

use super::load_config;
use crate::cli::GlobalArgs;

pub fn show_config_command(global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    if let Some(dir) = &config.base_dir {
        info!("Paths are resolved against {}", dir.display());
    }

    let json = serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
    println!("{json}");
    Ok(())
}
