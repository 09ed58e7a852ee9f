//! secret-init settings
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults
//! 2. a YAML config file
//! 3. environment variables, read from an explicit snapshot
//! 4. CLI flags (applied by the binary)

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::error::{ConfigError, ConfigResult};

/// Provider selection
pub const ENV_PROVIDER: &str = "PROVIDER";
/// Path of the secrets file for the file provider
pub const ENV_SECRETS_FILE_PATH: &str = "SECRETS_FILE_PATH";
/// Run the target as a supervised child instead of exec-ing it
pub const ENV_DAEMON: &str = "SECRET_INIT_DAEMON";
/// Seconds to wait before starting the target
pub const ENV_DELAY: &str = "SECRET_INIT_DELAY";
/// Log level (trace, debug, info, warn, error)
pub const ENV_LOG_LEVEL: &str = "SECRET_INIT_LOG_LEVEL";
/// Emit JSON log lines
pub const ENV_JSON_LOG: &str = "SECRET_INIT_JSON_LOG";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Runtime settings for secret-init
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SecretInitConfig {
    /// Registry name of the provider to use
    pub provider: String,
    /// Secrets file consumed by the file provider
    pub secrets_file_path: Option<PathBuf>,
    /// Supervise the target instead of replacing the current process
    pub daemon: bool,
    /// Seconds to wait before starting the target
    pub delay_secs: u64,
    /// Log level
    pub log_level: String,
    /// Emit JSON log lines
    pub json_log: bool,
}

impl Default for SecretInitConfig {
    fn default() -> Self {
        Self {
            provider: "file".to_string(),
            secrets_file_path: None,
            daemon: false,
            delay_secs: 0,
            log_level: "info".to_string(),
            json_log: false,
        }
    }
}

impl SecretInitConfig {
    /// Load settings from a YAML file
    ///
    /// Missing fields fall back to the defaults.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay values set in the environment snapshot
    ///
    /// Empty values are ignored so that `FOO=` does not clear a setting.
    pub fn apply_env(&mut self, environ: &HashMap<String, String>) -> ConfigResult<()> {
        let get = |key: &str| environ.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        if let Some(provider) = get(ENV_PROVIDER) {
            self.provider = provider.to_lowercase();
        }
        if let Some(path) = get(ENV_SECRETS_FILE_PATH) {
            self.secrets_file_path = Some(PathBuf::from(path));
        }
        if let Some(daemon) = get(ENV_DAEMON) {
            self.daemon = parse_bool(ENV_DAEMON, daemon)?;
        }
        if let Some(delay) = get(ENV_DELAY) {
            self.delay_secs = parse_delay(ENV_DELAY, delay)?;
        }
        if let Some(level) = get(ENV_LOG_LEVEL) {
            self.log_level = level.to_lowercase();
        }
        if let Some(json) = get(ENV_JSON_LOG) {
            self.json_log = parse_bool(ENV_JSON_LOG, json)?;
        }

        self.validate()
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> ConfigResult<()> {
        if self.provider.trim().is_empty() {
            return Err(ConfigError::invalid("provider", "must not be empty"));
        }
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::invalid(
                "log_level",
                format!("expected one of {}, got '{}'", LOG_LEVELS.join(", "), self.log_level),
            ));
        }
        Ok(())
    }

    /// Startup delay as a duration
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

fn parse_bool(key: &str, value: &str) -> ConfigResult<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::invalid(key, format!("expected a boolean, got '{}'", other))),
    }
}

fn parse_delay(key: &str, value: &str) -> ConfigResult<u64> {
    let digits = value.strip_suffix('s').unwrap_or(value);
    digits
        .parse()
        .map_err(|_| ConfigError::invalid(key, format!("expected seconds, got '{}'", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn environ(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = SecretInitConfig::default();
        assert_eq!(config.provider, "file");
        assert!(config.secrets_file_path.is_none());
        assert!(!config.daemon);
        assert_eq!(config.delay(), Duration::ZERO);
        assert_eq!(config.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_partial() {
        let config = SecretInitConfig::from_yaml_str(
            "secrets_file_path: /run/secrets/app.env\ndaemon: true\n",
        )
        .unwrap();

        assert_eq!(config.provider, "file");
        assert_eq!(
            config.secrets_file_path,
            Some(PathBuf::from("/run/secrets/app.env"))
        );
        assert!(config.daemon);
    }

    #[test]
    fn test_yaml_empty() {
        assert_eq!(
            SecretInitConfig::from_yaml_str("").unwrap(),
            SecretInitConfig::default()
        );
    }

    #[test]
    fn test_yaml_invalid_log_level() {
        assert!(matches!(
            SecretInitConfig::from_yaml_str("log_level: loud\n"),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_yaml_syntax_error() {
        assert!(matches!(
            SecretInitConfig::from_yaml_str("daemon: [unclosed"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_load_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("secret-init.yaml");
        fs::write(&path, "provider: memory\ndelay_secs: 3\n").unwrap();

        let config = SecretInitConfig::load(&path).unwrap();
        assert_eq!(config.provider, "memory");
        assert_eq!(config.delay(), Duration::from_secs(3));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            SecretInitConfig::load(dir.path().join("nope.yaml")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_apply_env() {
        let mut config = SecretInitConfig::default();
        config
            .apply_env(&environ(&[
                ("PROVIDER", "FILE"),
                ("SECRETS_FILE_PATH", "/tmp/secrets"),
                ("SECRET_INIT_DAEMON", "yes"),
                ("SECRET_INIT_DELAY", "5s"),
                ("SECRET_INIT_LOG_LEVEL", "DEBUG"),
                ("SECRET_INIT_JSON_LOG", "1"),
            ]))
            .unwrap();

        assert_eq!(config.provider, "file");
        assert_eq!(config.secrets_file_path, Some(PathBuf::from("/tmp/secrets")));
        assert!(config.daemon);
        assert_eq!(config.delay_secs, 5);
        assert_eq!(config.log_level, "debug");
        assert!(config.json_log);
    }

    #[test]
    fn test_apply_env_ignores_empty_values() {
        let mut config = SecretInitConfig {
            secrets_file_path: Some(PathBuf::from("/from/yaml")),
            ..Default::default()
        };
        config
            .apply_env(&environ(&[("SECRETS_FILE_PATH", ""), ("PROVIDER", "  ")]))
            .unwrap();

        assert_eq!(config.secrets_file_path, Some(PathBuf::from("/from/yaml")));
        assert_eq!(config.provider, "file");
    }

    #[test]
    fn test_apply_env_invalid_values() {
        let mut config = SecretInitConfig::default();
        assert!(config
            .apply_env(&environ(&[("SECRET_INIT_DAEMON", "maybe")]))
            .is_err());

        let mut config = SecretInitConfig::default();
        assert!(config
            .apply_env(&environ(&[("SECRET_INIT_DELAY", "soon")]))
            .is_err());
    }
}
