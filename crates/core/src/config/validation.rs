//! Configuration checks run before an operation is translated

use super::Config;
use crate::{
    error::{Error, Result},
    types::Operation,
};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Missing required option: {0}")]
    MissingRequired(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::ConfigError(err.to_string())
    }
}

/// Check that `config` carries everything `operation` needs
pub fn validate_for(config: &Config, operation: Operation) -> Result<()> {
    check(config, operation).map_err(Error::from)
}

fn check(config: &Config, operation: Operation) -> std::result::Result<(), ValidationError> {
    if config.api.trim().is_empty() {
        return Err(ValidationError::InvalidValue("api must not be blank".to_string()));
    }

    if config.metadata_includes.trim().is_empty() {
        return Err(ValidationError::InvalidValue(
            "metadata_includes must name at least one pattern".to_string(),
        ));
    }

    if operation == Operation::SchemaDeleteSchema
        && config
            .schema
            .schema_name
            .as_deref()
            .is_none_or(|name| name.trim().is_empty())
    {
        return Err(ValidationError::MissingRequired(
            "schema.schema_name is required for schema-delete-schema".to_string(),
        ));
    }

    if config.quiet && config.verbose {
        tracing::warn!("Both quiet and verbose are set; quiet takes precedence");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_schema_requires_schema_name() {
        let config = Config::default();
        let err = check(&config, Operation::SchemaDeleteSchema).unwrap_err();
        assert!(matches!(err, ValidationError::MissingRequired(_)));

        let mut config = Config::default();
        config.schema.schema_name = Some("APP".to_string());
        assert!(validate_for(&config, Operation::SchemaDeleteSchema).is_ok());
    }

    #[test]
    fn test_blank_api_is_rejected() {
        let config = Config {
            api: " ".to_string(),
            ..Default::default()
        };
        let err = validate_for(&config, Operation::Enhance).unwrap_err();
        assert!(matches!(err, Error::ConfigError(msg) if msg.contains("api")));
    }

    #[test]
    fn test_quiet_and_verbose_is_allowed() {
        let config = Config {
            quiet: true,
            verbose: true,
            ..Default::default()
        };
        assert!(validate_for(&config, Operation::EnhanceCheck).is_ok());
    }
}
