//! Translation of an invocation into tool arguments
//!
//! Every operation shares one rule set:
//!
//! 1. operation selector plus its own options
//! 2. `-q` or `-v` (quiet wins)
//! 3. `-pu <name>` when a persistence unit is named
//! 4. `-api <value>`
//! 5. tool-specific options, emitted only when they differ from the tool's defaults
//! 6. input files, inline or through a `-flf` side file, unless a
//!    persistence unit supplies them

use super::file_list::FileListFile;
use crate::{
    config::{Config, EnhancerConfig, FileListPolicy, SchemaToolConfig},
    error::Result,
    types::{Operation, Tool},
};
use std::path::PathBuf;

/// Everything needed to translate one operation. Built once per invocation.
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    pub operation: Operation,
    pub quiet: bool,
    pub verbose: bool,
    pub persistence_unit: Option<String>,
    pub api: String,
    pub enhancer: EnhancerConfig,
    pub schema: SchemaToolConfig,
    pub files: Vec<PathBuf>,
}

impl ToolInvocation {
    pub fn from_config(config: &Config, operation: Operation, files: Vec<PathBuf>) -> Self {
        let mut enhancer = config.enhancer.clone();
        enhancer.target_directory = enhancer
            .target_directory
            .as_deref()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| config.resolve_path(dir));

        Self {
            operation,
            quiet: config.quiet,
            verbose: config.verbose,
            persistence_unit: config.persistence_unit().map(str::to_string),
            api: config.api.clone(),
            enhancer,
            schema: config.schema.clone(),
            files,
        }
    }

    pub fn tool(&self) -> Tool {
        self.operation.tool()
    }

    /// Produce the ordered argument list. File arguments are left symbolic
    /// until [`ToolArguments::prepare`] decides how to pass them.
    pub fn translate(&self) -> ToolArguments {
        let tool = self.tool();
        let mut args = mode_arguments(self.operation, &self.enhancer, &self.schema);

        if self.quiet && tool.supports_quiet() {
            args.push("-q".to_string());
        } else if self.verbose {
            args.push("-v".to_string());
        }

        if let Some(unit) = &self.persistence_unit {
            args.push("-pu".to_string());
            args.push(unit.clone());
        }

        args.push("-api".to_string());
        args.push(self.api.clone());

        match tool {
            Tool::Enhancer => args.extend(enhancer_flags(&self.enhancer)),
            Tool::SchemaTool => {
                if let Some(props) = non_blank(&self.schema.props) {
                    args.push("-props".to_string());
                    args.push(props.to_string());
                }
            }
        }

        let files = if self.persistence_unit.is_some() {
            FileArguments::None
        } else if tool.supports_file_list_file()
            && self
                .enhancer
                .use_file_list_file
                .use_file_list(&self.files, self.enhancer.file_list_threshold)
        {
            FileArguments::ListFile(self.files.clone())
        } else {
            FileArguments::Inline(self.files.clone())
        };

        ToolArguments { args, files }
    }
}

/// Operation selector and the options that belong to it
fn mode_arguments(
    operation: Operation,
    enhancer: &EnhancerConfig,
    schema: &SchemaToolConfig,
) -> Vec<String> {
    let mut args: Vec<String> = operation.selector().map(String::from).into_iter().collect();

    match operation {
        Operation::Enhance => {
            if let Some(dir) = &enhancer.target_directory {
                args.push("-d".to_string());
                args.push(dir.display().to_string());
            }
        }
        Operation::SchemaCreateDatabase => {
            if let Some(catalog) = non_blank(&schema.catalog_name) {
                args.push("-catalog".to_string());
                args.push(catalog.to_string());
            }
            if let Some(name) = non_blank(&schema.schema_name) {
                args.push("-schema".to_string());
                args.push(name.to_string());
            }
        }
        Operation::SchemaDeleteSchema => {
            if let Some(name) = non_blank(&schema.schema_name) {
                args.push(name.to_string());
            }
        }
        Operation::SchemaDeleteCreate => {
            if let Some(ddl) = non_blank(&schema.ddl_file) {
                args.push("-ddlFile".to_string());
                args.push(ddl.to_string());
            }
            if schema.complete_ddl {
                args.push("-completeDdl".to_string());
            }
            if schema.include_auto_start {
                args.push("-includeAutoStart".to_string());
            }
        }
        Operation::EnhanceCheck | Operation::SchemaInfo | Operation::SchemaDbinfo => {}
    }

    args
}

fn enhancer_flags(enhancer: &EnhancerConfig) -> Vec<String> {
    let mut args = Vec::new();
    if enhancer.always_detachable {
        args.push("-alwaysDetachable".to_string());
    }
    if enhancer.ignore_metadata_for_missing_classes {
        args.push("-ignoreMetaDataForMissingClasses".to_string());
    }
    if !enhancer.generate_pk {
        args.extend(["-generatePK".to_string(), "false".to_string()]);
    }
    if !enhancer.generate_constructor {
        args.extend(["-generateConstructor".to_string(), "false".to_string()]);
    }
    if enhancer.detach_listener {
        args.extend(["-detachListener".to_string(), "true".to_string()]);
    }
    args
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// How input files reach the tool
#[derive(Debug, Clone, PartialEq)]
pub enum FileArguments {
    /// A persistence unit supplies its own files
    None,
    Inline(Vec<PathBuf>),
    ListFile(Vec<PathBuf>),
}

/// Translated arguments, before any side file is written
#[derive(Debug, Clone, PartialEq)]
pub struct ToolArguments {
    pub args: Vec<String>,
    pub files: FileArguments,
}

/// Arguments ready for execution, owning the side file if one was written
#[derive(Debug)]
pub struct PreparedArguments {
    pub args: Vec<String>,
    pub file_list: Option<FileListFile>,
}

impl ToolArguments {
    /// Final argument list, writing the side file when the policy asks for one
    pub fn prepare(&self) -> Result<PreparedArguments> {
        let mut args = self.args.clone();
        let file_list = match &self.files {
            FileArguments::None => None,
            FileArguments::Inline(files) => {
                args.extend(files.iter().map(|f| absolute_display(f)));
                None
            }
            FileArguments::ListFile(files) => {
                let list = FileListFile::write(files)?;
                args.push("-flf".to_string());
                args.push(list.path().display().to_string());
                Some(list)
            }
        };
        Ok(PreparedArguments { args, file_list })
    }

    /// Argument list for display only; never touches the filesystem
    pub fn preview(&self) -> Vec<String> {
        let mut args = self.args.clone();
        match &self.files {
            FileArguments::None => {}
            FileArguments::Inline(files) => {
                args.extend(files.iter().map(|f| absolute_display(f)));
            }
            FileArguments::ListFile(files) => {
                args.push("-flf".to_string());
                args.push(format!("<file list of {} entries>", files.len()));
            }
        }
        args
    }

    pub fn file_count(&self) -> usize {
        match &self.files {
            FileArguments::None => 0,
            FileArguments::Inline(files) | FileArguments::ListFile(files) => files.len(),
        }
    }
}

fn absolute_display(path: &std::path::Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::file_list::read_file_list;
    use std::fs;

    fn files() -> Vec<PathBuf> {
        vec![
            PathBuf::from("/work/classes/org/acme/Customer.class"),
            PathBuf::from("/work/classes/org/acme/package.jdo"),
        ]
    }

    fn invocation(operation: Operation) -> ToolInvocation {
        let mut config = Config::default();
        config.enhancer.use_file_list_file = FileListPolicy::Never;
        ToolInvocation::from_config(&config, operation, files())
    }

    fn line(args: &ToolArguments) -> String {
        args.preview().join(" ")
    }

    fn has_pair(args: &[String], flag: &str, value: &str) -> bool {
        args.windows(2).any(|w| w[0] == flag && w[1] == value)
    }

    #[test]
    fn test_enhance_defaults() {
        let args = invocation(Operation::Enhance).translate();
        insta::assert_snapshot!(
            line(&args),
            @"-api JDO /work/classes/org/acme/Customer.class /work/classes/org/acme/package.jdo"
        );
    }

    #[test]
    fn test_enhance_check_selector_first_and_quiet_wins() {
        let mut inv = invocation(Operation::EnhanceCheck);
        inv.quiet = true;
        inv.verbose = true;
        let args = inv.translate();
        assert_eq!(args.args[0], "-checkonly");
        assert_eq!(args.args[1], "-q");
        assert!(!args.args.contains(&"-v".to_string()));
    }

    #[test]
    fn test_schema_tool_ignores_quiet() {
        let mut inv = invocation(Operation::SchemaInfo);
        inv.quiet = true;
        inv.verbose = true;
        let args = inv.translate();
        assert_eq!(&args.args[..2], &["-schemainfo".to_string(), "-v".to_string()]);
    }

    #[test]
    fn test_persistence_unit_suppresses_files() {
        for operation in Operation::ALL {
            let mut inv = invocation(operation);
            inv.persistence_unit = Some("billing".to_string());
            let args = inv.translate();
            let rendered = args.preview();

            assert!(has_pair(&rendered, "-pu", "billing"), "{operation}");
            assert_eq!(args.files, FileArguments::None);
            assert!(!rendered.iter().any(|a| a.ends_with(".class") || a.ends_with(".jdo")));
        }
    }

    #[test]
    fn test_generate_pk_only_when_disabled() {
        let args = invocation(Operation::Enhance).translate();
        assert!(!args.args.iter().any(|a| a.contains("generatePK")));

        let mut inv = invocation(Operation::Enhance);
        inv.enhancer.generate_pk = false;
        let args = inv.translate();
        assert!(has_pair(&args.args, "-generatePK", "false"));
    }

    #[test]
    fn test_enhancer_flags_in_order() {
        let mut inv = invocation(Operation::Enhance);
        inv.verbose = true;
        inv.enhancer.target_directory = Some(PathBuf::from("/work/enhanced"));
        inv.enhancer.always_detachable = true;
        inv.enhancer.ignore_metadata_for_missing_classes = true;
        inv.enhancer.generate_constructor = false;
        inv.enhancer.detach_listener = true;
        inv.files.clear();

        insta::assert_snapshot!(
            line(&inv.translate()),
            @"-d /work/enhanced -v -api JDO -alwaysDetachable -ignoreMetaDataForMissingClasses -generateConstructor false -detachListener true"
        );
    }

    #[test]
    fn test_schema_operations() {
        let mut inv = invocation(Operation::SchemaCreateDatabase);
        inv.schema.catalog_name = Some("CAT".to_string());
        inv.schema.schema_name = Some("APP".to_string());
        inv.schema.props = Some("datanucleus.properties".to_string());
        inv.files.clear();
        insta::assert_snapshot!(
            line(&inv.translate()),
            @"-createDatabase -catalog CAT -schema APP -api JDO -props datanucleus.properties"
        );

        let mut inv = invocation(Operation::SchemaDeleteSchema);
        inv.schema.schema_name = Some("APP".to_string());
        assert_eq!(&inv.translate().args[..2], &["-deleteSchema".to_string(), "APP".to_string()]);

        let mut inv = invocation(Operation::SchemaDeleteCreate);
        inv.schema.ddl_file = Some("target/schema.sql".to_string());
        inv.schema.complete_ddl = true;
        inv.schema.include_auto_start = true;
        inv.api = "JPA".to_string();
        inv.files.clear();
        insta::assert_snapshot!(
            line(&inv.translate()),
            @"-deletecreate -ddlFile target/schema.sql -completeDdl -includeAutoStart -api JPA"
        );

        let inv = invocation(Operation::SchemaDbinfo);
        assert_eq!(inv.translate().args[0], "-dbinfo");
    }

    #[test]
    fn test_enhancer_only_flags_not_sent_to_schema_tool() {
        let mut inv = invocation(Operation::SchemaInfo);
        inv.enhancer.generate_pk = false;
        inv.enhancer.always_detachable = true;
        inv.enhancer.use_file_list_file = FileListPolicy::Always;
        let args = inv.translate();

        assert!(!args.args.iter().any(|a| a == "-generatePK" || a == "-alwaysDetachable"));
        assert!(matches!(args.files, FileArguments::Inline(_)));
    }

    #[test]
    fn test_file_list_file_written_on_prepare() {
        let mut inv = invocation(Operation::Enhance);
        inv.enhancer.use_file_list_file = FileListPolicy::Always;
        let args = inv.translate();
        assert!(matches!(args.files, FileArguments::ListFile(_)));
        assert_eq!(
            args.preview().last().unwrap(),
            "<file list of 2 entries>"
        );

        let prepared = args.prepare().unwrap();
        let list = prepared.file_list.expect("side file");
        let flf = prepared.args.iter().position(|a| a == "-flf").unwrap();
        assert_eq!(prepared.args[flf + 1], list.path().display().to_string());
        assert_eq!(read_file_list(list.path()).unwrap(), files());

        let path = list.path().to_path_buf();
        list.discard().unwrap();
        assert!(fs::metadata(path).is_err());
    }

    #[test]
    fn test_empty_file_list_is_not_an_error() {
        let mut inv = invocation(Operation::Enhance);
        inv.files.clear();
        let prepared = inv.translate().prepare().unwrap();
        assert_eq!(prepared.args, vec!["-api".to_string(), "JDO".to_string()]);
        assert!(prepared.file_list.is_none());
    }
}
