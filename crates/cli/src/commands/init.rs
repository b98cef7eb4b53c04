use anyhow::{Context, Result};
use std::{env, fs, path::Path};
use tracing::info;

use crate::config::create_default_config;
use nucleus_runner_core::config::CONFIG_FILE_NAMES;

pub fn init_command(cwd: Option<&Path>, force: bool) -> Result<()> {
    // Determine the project root
    let project_root = match cwd {
        Some(cwd) => cwd.to_path_buf(),
        None => env::current_dir().context("Failed to get current directory")?,
    };

    let project_root = project_root
        .canonicalize()
        .context("Failed to canonicalize project root")?;

    let config_path = project_root.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        println!("❌ Config already exists at: {}", config_path.display());
        println!("   Use --force to overwrite");
        return Ok(());
    }

    println!(
        "🚀 Initializing nucleus-runner in: {}",
        project_root.display()
    );

    fs::write(&config_path, create_default_config())
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    info!("Wrote {}", config_path.display());

    println!("✅ Created config: {}", config_path.display());
    println!("\n📌 Next steps:");
    println!("   Add the DataNucleus jars to 'plugin_artifacts'");
    println!("   Add your project's dependencies to 'classpath_elements'");
    println!("   Run: nucleus-runner enhance");

    Ok(())
}
