pub mod init;
pub mod run;
pub mod show_config;

pub use init::init_command;
pub use run::run_command;
pub use show_config::show_config_command;

use anyhow::{Context, Result};
use nucleus_runner_core::{config::Config, system_properties};
use std::env;
use tracing::debug;

use crate::cli::GlobalArgs;

/// Load the config named by `--config`, or the nearest one above the current
/// directory, with the global flags applied
pub fn load_config(global: &GlobalArgs) -> Result<Config> {
    let mut config = match &global.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => {
            let cwd = env::current_dir().context("Failed to get current directory")?;
            Config::discover(&cwd)?
        }
    };

    global.apply(&mut config);
    Ok(config)
}

/// Publish `-D` flags as system properties
pub fn set_system_properties(properties: &[(String, String)]) {
    for (key, value) in properties {
        debug!("Setting system property {}={}", key, value);
        system_properties::set(key.as_str(), value.as_str());
    }
}
