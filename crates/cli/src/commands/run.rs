use anyhow::{Context, Result};
use nucleus_runner_core::{Error, Operation, Plan, RunOutcome, ToolRunner};
use tracing::{debug, info};

use super::{load_config, set_system_properties};
use crate::cli::{Commands, GlobalArgs};
use crate::display::print_command_breakdown;

pub fn run_command(operation: Operation, command: &Commands, global: &GlobalArgs) -> Result<()> {
    let mut config = load_config(global)?;
    command.apply(&mut config);
    set_system_properties(&global.properties);

    debug!(
        "Running {} against {}",
        operation,
        config.metadata_dir().display()
    );
    let runner = ToolRunner::new(config);

    if global.dry_run {
        return match runner.plan(operation)? {
            Plan::Skipped(reason) => {
                println!("⏭️  Nothing to run for {}: {}", operation, reason);
                Ok(())
            }
            Plan::Ready(plan) => {
                let command = runner.preview_command(&plan)?;
                println!("{}", command.to_shell_command());
                if let Some(ref dir) = command.working_dir {
                    println!("Working directory: {}", dir.display());
                }
                print_command_breakdown(&plan, &command);
                Ok(())
            }
        };
    }

    info!("Running {} ({})", operation, operation.tool());
    match runner.run(operation) {
        Ok(RunOutcome::Skipped(reason)) => {
            println!("⏭️  Skipped {}: {}", operation, reason);
            Ok(())
        }
        Ok(RunOutcome::Completed(_)) => {
            println!("✅ {} completed", operation);
            Ok(())
        }
        Err(Error::ToolFailed { tool, code, .. }) => {
            eprintln!(
                "❌ The tool {} exited with a non-zero exit code ({})",
                tool, code
            );
            std::process::exit(if code > 0 { code } else { 1 });
        }
        Err(e) => Err(e).with_context(|| format!("Failed to run {}", operation)),
    }
}
