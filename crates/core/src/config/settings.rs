use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{DEFAULT_FILE_LIST_THRESHOLD, FileListPolicy, LoggingConfig};

pub const CONFIG_FILE_NAMES: [&str; 2] = [".nucleus-runner.json", "nucleus-runner.json"];

pub const DEFAULT_METADATA_DIRECTORY: &str = "target/classes";
pub const DEFAULT_METADATA_INCLUDES: &str = "**/*.jdo, **/*.class";
pub const DEFAULT_API: &str = "JDO";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Config {
    /// Root directory scanned for metadata files, also first on the classpath
    pub metadata_directory: PathBuf,
    /// Comma-separated glob patterns relative to the metadata directory
    pub metadata_includes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_excludes: Option<String>,

    /// Tool jars, placed ahead of the project classpath
    pub plugin_artifacts: Vec<PathBuf>,
    pub classpath_elements: Vec<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub java_executable: Option<PathBuf>,
    pub logging: LoggingConfig,

    pub verbose: bool,
    pub quiet: bool,
    pub fork: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persistence_unit_name: Option<String>,
    pub api: String,

    pub enhancer: EnhancerConfig,
    pub schema: SchemaToolConfig,

    // Directory relative paths are resolved against (not part of the JSON)
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct EnhancerConfig {
    /// Write enhanced classes here instead of in place
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_directory: Option<PathBuf>,
    pub always_detachable: bool,
    pub ignore_metadata_for_missing_classes: bool,
    pub generate_pk: bool,
    pub generate_constructor: bool,
    pub detach_listener: bool,
    pub use_file_list_file: FileListPolicy,
    pub file_list_threshold: usize,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            target_directory: None,
            always_detachable: false,
            ignore_metadata_for_missing_classes: false,
            generate_pk: true,
            generate_constructor: true,
            detach_listener: false,
            use_file_list_file: FileListPolicy::Auto,
            file_list_threshold: DEFAULT_FILE_LIST_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct SchemaToolConfig {
    /// Properties file handed to SchemaTool with `-props`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<String>,
    /// Passed to the JVM as `-D<key>=<value>`
    pub tool_properties: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ddl_file: Option<String>,
    pub complete_ddl: bool,
    pub include_auto_start: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            metadata_directory: PathBuf::from(DEFAULT_METADATA_DIRECTORY),
            metadata_includes: DEFAULT_METADATA_INCLUDES.to_string(),
            metadata_excludes: None,
            plugin_artifacts: Vec::new(),
            classpath_elements: Vec::new(),
            java_executable: None,
            logging: LoggingConfig::default(),
            verbose: false,
            quiet: false,
            fork: true,
            persistence_unit_name: None,
            api: DEFAULT_API.to_string(),
            enhancer: EnhancerConfig::default(),
            schema: SchemaToolConfig::default(),
            base_dir: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("Failed to read {}: {e}", path.display()))
        })?;
        let mut config: Config = serde_json::from_str(&contents).map_err(|e| {
            Error::ConfigError(format!("Failed to parse {}: {e}", path.display()))
        })?;
        // A bare file name has an empty parent; anchor it to the current directory
        let absolute = std::path::absolute(path).map_err(|e| {
            Error::ConfigError(format!("Failed to resolve {}: {e}", path.display()))
        })?;
        config.base_dir = absolute.parent().map(Path::to_path_buf);
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Walk up from `start_path` looking for a config file
    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.is_file() {
                    return Some(config_path);
                }
            }

            current = current.parent()?;
        }
    }

    /// Load the nearest config file above `start_path`, or defaults rooted at
    /// `start_path` when there is none
    pub fn discover(start_path: &Path) -> Result<Self> {
        match Self::find_config_file(start_path) {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!(
                    "No config file found above {}, using defaults",
                    start_path.display()
                );
                Ok(Self {
                    base_dir: Some(start_path.to_path_buf()),
                    ..Default::default()
                })
            }
        }
    }

    /// Resolve a configured path against the config file's directory
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    pub fn metadata_dir(&self) -> PathBuf {
        self.resolve_path(&self.metadata_directory)
    }

    pub fn resolved_artifacts(&self) -> Vec<PathBuf> {
        self.plugin_artifacts
            .iter()
            .map(|p| self.resolve_path(p))
            .collect()
    }

    pub fn resolved_classpath_elements(&self) -> Vec<PathBuf> {
        self.classpath_elements
            .iter()
            .map(|p| self.resolve_path(p))
            .collect()
    }

    /// The non-blank persistence-unit name, if any
    pub fn persistence_unit(&self) -> Option<&str> {
        self.persistence_unit_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}
