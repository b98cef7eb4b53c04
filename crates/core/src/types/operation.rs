use crate::{impl_case_insensitive_deserialize, utils::serde_helpers::normalize_variant_name};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The external tool an operation is executed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    Enhancer,
    SchemaTool,
}

impl_case_insensitive_deserialize!(
    Tool,
    Enhancer => "enhancer",
    SchemaTool => "schema_tool"
);

impl Tool {
    /// Fully-qualified class name of the tool's `main` entry point
    pub fn entry_point(&self) -> &'static str {
        match self {
            Tool::Enhancer => "org.datanucleus.enhancer.DataNucleusEnhancer",
            Tool::SchemaTool => "org.datanucleus.store.schema.SchemaTool",
        }
    }

    /// Only the enhancer understands `-q`
    pub fn supports_quiet(&self) -> bool {
        matches!(self, Tool::Enhancer)
    }

    /// Only the enhancer understands `-flf <file>`
    pub fn supports_file_list_file(&self) -> bool {
        matches!(self, Tool::Enhancer)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.entry_point())
    }
}

/// One goal the runner can execute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    Enhance,
    EnhanceCheck,
    SchemaCreateDatabase,
    SchemaDeleteSchema,
    SchemaDeleteCreate,
    SchemaInfo,
    SchemaDbinfo,
}

impl_case_insensitive_deserialize!(
    Operation,
    Enhance => "enhance",
    EnhanceCheck => "enhance-check",
    SchemaCreateDatabase => "schema-create-database",
    SchemaDeleteSchema => "schema-delete-schema",
    SchemaDeleteCreate => "schema-delete-create",
    SchemaInfo => "schema-info",
    SchemaDbinfo => "schema-dbinfo"
);

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::Enhance,
        Operation::EnhanceCheck,
        Operation::SchemaCreateDatabase,
        Operation::SchemaDeleteSchema,
        Operation::SchemaDeleteCreate,
        Operation::SchemaInfo,
        Operation::SchemaDbinfo,
    ];

    pub fn tool(&self) -> Tool {
        match self {
            Operation::Enhance | Operation::EnhanceCheck => Tool::Enhancer,
            Operation::SchemaCreateDatabase
            | Operation::SchemaDeleteSchema
            | Operation::SchemaDeleteCreate
            | Operation::SchemaInfo
            | Operation::SchemaDbinfo => Tool::SchemaTool,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Enhance => "enhance",
            Operation::EnhanceCheck => "enhance-check",
            Operation::SchemaCreateDatabase => "schema-create-database",
            Operation::SchemaDeleteSchema => "schema-delete-schema",
            Operation::SchemaDeleteCreate => "schema-delete-create",
            Operation::SchemaInfo => "schema-info",
            Operation::SchemaDbinfo => "schema-dbinfo",
        }
    }

    /// The flag that selects this mode in the tool, if the mode has one.
    /// Plain enhancement is the enhancer's default mode.
    pub fn selector(&self) -> Option<&'static str> {
        match self {
            Operation::Enhance => None,
            Operation::EnhanceCheck => Some("-checkonly"),
            Operation::SchemaCreateDatabase => Some("-createDatabase"),
            Operation::SchemaDeleteSchema => Some("-deleteSchema"),
            Operation::SchemaDeleteCreate => Some("-deletecreate"),
            Operation::SchemaInfo => Some("-schemainfo"),
            Operation::SchemaDbinfo => Some("-dbinfo"),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_variant_name(s);
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.name() == key)
            .ok_or_else(|| format!("unknown operation '{s}'"))
    }
}
