//! Gate Configuration
//!
//! Configuration options for the karaoke gate.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{GateError, GateResult};
use crate::permissions::GuildPermissions;

/// Configuration for the karaoke gate
///
/// Use the builder pattern, or load it from JSON:
///
/// ```ignore
/// let config = GateConfig::new()
///     .with_bypass_permissions(GuildPermissions::MOVE_MEMBERS)
///     .with_decision_logging(false);
///
/// let config = GateConfig::from_json_str(r#"{"bypass_permissions": "MANAGE_GUILD"}"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateConfig {
    /// Guild permissions that let a member bypass a locked channel
    ///
    /// `ADMINISTRATOR` bypasses regardless of this setting.
    pub bypass_permissions: GuildPermissions,

    /// Whether to log every gate decision
    pub log_decisions: bool,
}

impl GateConfig {
    /// Create a configuration with the defaults
    pub fn new() -> Self {
        Self {
            bypass_permissions: GuildPermissions::DEFAULT_BYPASS,
            log_decisions: true,
        }
    }

    /// Set the permissions that bypass a channel lock
    pub fn with_bypass_permissions(mut self, permissions: GuildPermissions) -> Self {
        self.bypass_permissions = permissions;
        self
    }

    /// Enable or disable decision logging
    pub fn with_decision_logging(mut self, enabled: bool) -> Self {
        self.log_decisions = enabled;
        self
    }

    /// Parse a configuration from a JSON string
    pub fn from_json_str(json: &str) -> GateResult<Self> {
        let config: GateConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> GateResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let config: GateConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;

        tracing::info!("Loaded gate config from {:?}", path);
        Ok(config)
    }

    fn validate(&self) -> GateResult<()> {
        if self.bypass_permissions.is_empty() {
            tracing::warn!("No bypass permissions configured, only ADMINISTRATOR bypasses locks");
        }
        if self.bypass_permissions.bits() & !GuildPermissions::all().bits() != 0 {
            return Err(GateError::InvalidConfig(format!(
                "unknown bypass permission bits: {:#x}",
                self.bypass_permissions.bits()
            )));
        }
        Ok(())
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_gate_config_defaults() {
        let config = GateConfig::default();
        assert!(config.log_decisions);
        assert_eq!(config.bypass_permissions, GuildPermissions::DEFAULT_BYPASS);
    }

    #[test]
    fn test_gate_config_builder() {
        let config = GateConfig::new()
            .with_bypass_permissions(GuildPermissions::MANAGE_GUILD)
            .with_decision_logging(false);

        assert!(!config.log_decisions);
        assert_eq!(config.bypass_permissions, GuildPermissions::MANAGE_GUILD);
    }

    #[test]
    fn test_from_json_partial() {
        let config = GateConfig::from_json_str(r#"{"log_decisions": false}"#).unwrap();
        assert!(!config.log_decisions);
        assert_eq!(config.bypass_permissions, GuildPermissions::DEFAULT_BYPASS);
    }

    #[test]
    fn test_from_json_rejects_unknown() {
        let err = GateConfig::from_json_str(r#"{"bypass_permissions": "KICK_EVERYONE"}"#)
            .unwrap_err();
        assert!(matches!(err, GateError::Serialization(_)));

        let err = GateConfig::from_json_str(r#"{"lock_timeout": 5}"#).unwrap_err();
        assert!(matches!(err, GateError::Serialization(_)));
    }

    #[test]
    fn test_from_json_rejects_unknown_bits() {
        let err = GateConfig::from_json_str(r#"{"bypass_permissions": "0x10000000000"}"#)
            .unwrap_err();
        assert!(matches!(err, GateError::InvalidConfig(_)));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"bypass_permissions": "MOVE_MEMBERS | MUTE_MEMBERS"}}"#
        )
        .unwrap();

        let config = GateConfig::from_json_file(file.path()).unwrap();
        assert_eq!(
            config.bypass_permissions,
            GuildPermissions::MOVE_MEMBERS | GuildPermissions::MUTE_MEMBERS
        );
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = GateConfig::from_json_file("/nonexistent/gate.json").unwrap_err();
        assert!(matches!(err, GateError::Io(_)));
    }
}
