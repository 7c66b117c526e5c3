//! Runtime configuration.
//!
//! Deserialized from a TOML file. Every section has a sensible
//! default, so an empty file (or no file at all) yields a fully
//! working configuration.
//!
//! # Example TOML
//!
//! ```toml
//! [grant.naming]
//! group = "affiliation-{affiliation}-{side}-group"
//! policy = "affiliation-{affiliation}-{side}-policy"
//! role = "affiliation-{affiliation}-{side}-role"
//! ```

use encore_grant::GrantNaming;
use encore_types::ErrorCode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error raised while loading the runtime configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        /// The path that was attempted.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML.
    #[error("failed to parse config: {source}")]
    Parse {
        /// The underlying TOML error.
        source: toml::de::Error,
    },
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::ReadFile { .. } => "CONFIG_READ_FILE",
            Self::Parse { .. } => "CONFIG_PARSE",
        }
    }

    fn is_recoverable(&self) -> bool {
        // A bad config needs operator intervention.
        false
    }
}

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Grant lifecycle settings.
    pub grant: GrantConfig,
}

/// Grant lifecycle settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrantConfig {
    /// Name templates for grant-synthesized objects.
    pub naming: GrantNaming,
}

impl RuntimeConfig {
    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] when the string is not valid TOML or
    /// does not match the schema.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|source| ConfigError::Parse { source })
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ReadFile`] when the file cannot be read
    /// - [`ConfigError::Parse`] when its content is invalid
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encore_grant::GrantSide;
    use encore_types::AffiliationId;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg = RuntimeConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, RuntimeConfig::default());
    }

    #[test]
    fn naming_overrides_apply() {
        let cfg = RuntimeConfig::from_toml_str(
            r#"
[grant.naming]
role = "aff-{affiliation}-{side}"
"#,
        )
        .unwrap();

        let aff = AffiliationId::new();
        let name = cfg.grant.naming.role_name(aff, GrantSide::AgencySide);
        assert!(name.starts_with("aff-"));
        assert!(name.ends_with("agency_side"));
        // Untouched templates keep their defaults.
        assert_eq!(cfg.grant.naming.group, GrantNaming::default().group);
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = RuntimeConfig::from_toml_str("grant = 42").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.code(), "CONFIG_PARSE");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = RuntimeConfig::load("/nonexistent/encore.toml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn toml_roundtrip() {
        let cfg = RuntimeConfig::default();
        let serialized = toml::to_string_pretty(&cfg).unwrap();
        let restored = RuntimeConfig::from_toml_str(&serialized).unwrap();
        assert_eq!(cfg, restored);
    }
}
