//! Logging configuration handed to the invoked tool

use serde::{Deserialize, Serialize};
use std::path::Path;

pub const LOG4J_PROPERTY: &str = "log4j.configuration";
pub const LOG4J2_PROPERTY: &str = "log4j.configurationFile";
pub const JDK_LOG_PROPERTY: &str = "java.util.logging.config.file";

/// References to logging configuration resources for the invoked tool.
/// When several are set the first of log4j, log4j2, JDK logging wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log4j_configuration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log4j2_configuration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jdk_log_configuration: Option<String>,
}

/// A resolved `-D<key>=<value>` logging property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingProperty {
    pub key: &'static str,
    pub value: String,
}

impl LoggingProperty {
    pub fn to_jvm_arg(&self) -> String {
        format!("-D{}={}", self.key, self.value)
    }
}

impl LoggingConfig {
    /// Pick the active logging scheme and turn its reference into a URL
    pub fn resolve(&self, base_dir: Option<&Path>) -> Option<LoggingProperty> {
        let candidates = [
            (LOG4J_PROPERTY, &self.log4j_configuration),
            (LOG4J2_PROPERTY, &self.log4j2_configuration),
            (JDK_LOG_PROPERTY, &self.jdk_log_configuration),
        ];

        candidates
            .into_iter()
            .find_map(|(key, reference)| {
                reference
                    .as_deref()
                    .filter(|r| !r.trim().is_empty())
                    .map(|r| LoggingProperty {
                        key,
                        value: to_url(r.trim(), base_dir),
                    })
            })
    }
}

/// URLs pass through untouched; anything else is a file path
fn to_url(reference: &str, base_dir: Option<&Path>) -> String {
    if has_url_scheme(reference) {
        return reference.to_string();
    }

    let path = Path::new(reference);
    let absolute = match base_dir {
        Some(base) if path.is_relative() => base.join(path),
        _ => std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()),
    };
    format!("file:{}", absolute.display())
}

fn has_url_scheme(reference: &str) -> bool {
    match reference.split_once(':') {
        // Single letters are drive prefixes such as `C:`
        Some((scheme, _)) if scheme.len() > 1 => scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')),
        _ => false,
    }
}
