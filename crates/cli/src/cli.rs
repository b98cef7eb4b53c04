use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use nucleus_runner_core::{
    Operation,
    config::{Config, FileListPolicy},
};
use std::path::{Path, PathBuf};

use crate::commands::{init_command, run_command, show_config_command};
use crate::utils::parse_property;

#[derive(Parser, Debug)]
#[command(name = "nucleus-runner")]
#[command(version, about, long_about = None)]
#[command(subcommand_required = true, arg_required_else_help = true)]
#[command(
    after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging\n    JAVA_HOME         Java installation used to launch the tools"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags accepted by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file to use instead of searching upwards for one
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the metadata files and compiled classes
    #[arg(long, global = true, value_name = "DIR")]
    pub metadata_dir: Option<PathBuf>,

    /// Pass -v to the tool and log the classpath
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Pass -q to the enhancer and only log warnings
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Set a system property; overrides a configured tool property of the same name
    #[arg(short = 'D', global = true, value_name = "KEY=VALUE", value_parser = parse_property)]
    pub properties: Vec<(String, String)>,

    /// Print the command without executing it
    #[arg(long, global = true)]
    pub dry_run: bool,
}

impl GlobalArgs {
    /// Default log level when RUST_LOG is not set
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    pub fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.metadata_dir {
            config.metadata_directory = from_working_dir(dir);
        }
        config.verbose |= self.verbose;
        config.quiet |= self.quiet;
    }
}

/// Paths typed on the command line are relative to where the command runs,
/// not to the config file
fn from_working_dir(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Options shared by both tools
#[derive(Args, Debug, Clone, Default)]
pub struct ToolArgs {
    /// Run against a persistence unit instead of the discovered files
    #[arg(long, value_name = "NAME")]
    pub persistence_unit: Option<String>,

    /// API of the metadata (JDO, JPA, ...)
    #[arg(long)]
    pub api: Option<String>,
}

impl ToolArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(unit) = &self.persistence_unit {
            config.persistence_unit_name = Some(unit.clone());
        }
        if let Some(api) = &self.api {
            config.api = api.clone();
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct EnhanceArgs {
    #[command(flatten)]
    pub tool: ToolArgs,

    /// Write enhanced classes here instead of enhancing in place
    #[arg(long, value_name = "DIR")]
    pub target_dir: Option<PathBuf>,

    /// Pass the file list through a side file: always, never or auto
    #[arg(long, value_name = "POLICY")]
    pub file_list: Option<String>,
}

impl EnhanceArgs {
    fn apply(&self, config: &mut Config) {
        self.tool.apply(config);
        if let Some(dir) = &self.target_dir {
            config.enhancer.target_directory = Some(from_working_dir(dir));
        }
        if let Some(policy) = &self.file_list {
            config.enhancer.use_file_list_file = FileListPolicy::parse_lenient(policy);
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct SchemaArgs {
    #[command(flatten)]
    pub tool: ToolArgs,

    /// Properties file with the datastore connection details
    #[arg(long, value_name = "FILE")]
    pub props: Option<String>,
}

impl SchemaArgs {
    fn apply(&self, config: &mut Config) {
        self.tool.apply(config);
        if let Some(props) = &self.props {
            config.schema.props = Some(props.clone());
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Enhance the persistable classes
    Enhance(EnhanceArgs),
    /// Report which classes are enhanced, without enhancing
    EnhanceCheck(ToolArgs),
    /// Create a database (catalog/schema) in the datastore
    SchemaCreateDatabase {
        #[command(flatten)]
        schema: SchemaArgs,

        #[arg(long)]
        catalog_name: Option<String>,

        #[arg(long)]
        schema_name: Option<String>,
    },
    /// Delete a schema from the datastore
    SchemaDeleteSchema {
        #[command(flatten)]
        schema: SchemaArgs,

        /// Schema to delete
        #[arg(long)]
        schema_name: Option<String>,
    },
    /// Delete and then recreate the schema for the classes
    SchemaDeleteCreate {
        #[command(flatten)]
        schema: SchemaArgs,

        /// Write the DDL to this file
        #[arg(long, value_name = "FILE")]
        ddl_file: Option<String>,

        /// Write DDL for the complete schema, not only the missing parts
        #[arg(long)]
        complete_ddl: bool,

        #[arg(long)]
        include_auto_start: bool,
    },
    /// Print schema information for the classes
    SchemaInfo(SchemaArgs),
    /// Print information about the datastore
    SchemaDbinfo(SchemaArgs),
    /// Initialize nucleus-runner configuration
    Init {
        /// Specify the directory to initialize (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        cwd: Option<PathBuf>,

        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
    /// Print the effective configuration as JSON
    ShowConfig,
}

impl Commands {
    /// Operation this subcommand runs, if it runs one
    pub fn operation(&self) -> Option<Operation> {
        let op = match self {
            Commands::Enhance(_) => Operation::Enhance,
            Commands::EnhanceCheck(_) => Operation::EnhanceCheck,
            Commands::SchemaCreateDatabase { .. } => Operation::SchemaCreateDatabase,
            Commands::SchemaDeleteSchema { .. } => Operation::SchemaDeleteSchema,
            Commands::SchemaDeleteCreate { .. } => Operation::SchemaDeleteCreate,
            Commands::SchemaInfo(_) => Operation::SchemaInfo,
            Commands::SchemaDbinfo(_) => Operation::SchemaDbinfo,
            Commands::Init { .. } | Commands::ShowConfig => return None,
        };
        Some(op)
    }

    /// Fold this subcommand's options into `config`
    pub fn apply(&self, config: &mut Config) {
        match self {
            Commands::Enhance(args) => args.apply(config),
            Commands::EnhanceCheck(args) => args.apply(config),
            Commands::SchemaCreateDatabase {
                schema,
                catalog_name,
                schema_name,
            } => {
                schema.apply(config);
                if catalog_name.is_some() {
                    config.schema.catalog_name = catalog_name.clone();
                }
                if schema_name.is_some() {
                    config.schema.schema_name = schema_name.clone();
                }
            }
            Commands::SchemaDeleteSchema {
                schema,
                schema_name,
            } => {
                schema.apply(config);
                if schema_name.is_some() {
                    config.schema.schema_name = schema_name.clone();
                }
            }
            Commands::SchemaDeleteCreate {
                schema,
                ddl_file,
                complete_ddl,
                include_auto_start,
            } => {
                schema.apply(config);
                if ddl_file.is_some() {
                    config.schema.ddl_file = ddl_file.clone();
                }
                config.schema.complete_ddl |= complete_ddl;
                config.schema.include_auto_start |= include_auto_start;
            }
            Commands::SchemaInfo(args) | Commands::SchemaDbinfo(args) => args.apply(config),
            Commands::Init { .. } | Commands::ShowConfig => {}
        }
    }
}

impl Cli {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        tracing::debug!("Executing {:?}", self.command);

        match &self.command {
            Commands::Init { cwd, force } => init_command(cwd.as_deref(), *force),
            Commands::ShowConfig => show_config_command(&self.global),
            command => match command.operation() {
                Some(operation) => run_command(operation, command, &self.global),
                None => Ok(()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "nucleus-runner",
            "schema-info",
            "-v",
            "--props",
            "datanucleus.properties",
            "-D",
            "javax.jdo.option.ConnectionURL=jdbc:h2:mem:test",
        ])
        .unwrap();

        assert!(cli.global.verbose);
        assert_eq!(
            cli.global.properties,
            vec![(
                "javax.jdo.option.ConnectionURL".to_string(),
                "jdbc:h2:mem:test".to_string()
            )]
        );
        assert_eq!(cli.command.operation(), Some(Operation::SchemaInfo));
    }

    #[test]
    fn test_subcommand_options_override_config() {
        let cli = Cli::try_parse_from([
            "nucleus-runner",
            "--metadata-dir",
            "build/classes",
            "enhance",
            "--api",
            "JPA",
            "--target-dir",
            "build/enhanced",
            "--file-list",
            "ALWAYS",
        ])
        .unwrap();

        let mut config = Config::default();
        cli.global.apply(&mut config);
        cli.command.apply(&mut config);

        let cwd = std::env::current_dir().unwrap();
        assert_eq!(config.metadata_directory, cwd.join("build/classes"));
        assert_eq!(config.api, "JPA");
        assert_eq!(
            config.enhancer.target_directory,
            Some(cwd.join("build/enhanced"))
        );
        assert_eq!(config.enhancer.use_file_list_file, FileListPolicy::Always);
    }

    #[test]
    fn test_delete_schema_takes_schema_name() {
        let cli = Cli::try_parse_from([
            "nucleus-runner",
            "schema-delete-schema",
            "--schema-name",
            "ACME",
        ])
        .unwrap();

        let mut config = Config::default();
        cli.command.apply(&mut config);
        assert_eq!(config.schema.schema_name.as_deref(), Some("ACME"));
    }

    #[test]
    fn test_malformed_property_is_rejected() {
        let err = Cli::try_parse_from(["nucleus-runner", "enhance", "-D", "novalue"]).unwrap_err();
        assert!(err.to_string().contains("KEY=VALUE"));
    }
}
