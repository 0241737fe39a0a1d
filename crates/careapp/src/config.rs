//! Configuration management for careapp.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::analytics::DEFAULT_CAPACITY;
use crate::error::{Error, Result};
use crate::recovery::ProcedureId;
use crate::session::DEFAULT_DAYS_POST_OP;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "careapp";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "careapp.db";

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "CAREAPP_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `CAREAPP_`, sections split on `__`,
///    e.g. `CAREAPP_STORAGE__MAX_EVENTS=50`)
/// 2. TOML config file at `~/.config/careapp/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Recovery view configuration.
    pub recovery: RecoveryConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/careapp/careapp.db`
    pub database_path: Option<PathBuf>,
    /// Maximum number of events kept in the local log.
    pub max_events: usize,
}

/// Initial selection for the recovery views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryConfig {
    /// Procedure shown when none is given on the command line.
    pub procedure: ProcedureId,
    /// Days post-op used when none is given on the command line.
    pub days_post_op: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None, // Will be resolved to default at runtime
            max_events: DEFAULT_CAPACITY,
        }
    }
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            procedure: ProcedureId::default(),
            days_post_op: DEFAULT_DAYS_POST_OP,
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// A missing file is not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        Self::from_figment(Self::figment(config_file))
    }

    /// The provider stack used by [`Config::load_from`].
    #[must_use]
    pub fn figment(config_file: PathBuf) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Extract and validate a configuration from any figment.
    ///
    /// # Errors
    ///
    /// Returns an error if extraction or validation fails.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.storage.max_events == 0 {
            return Err(Error::ConfigValidation {
                message: "max_events must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.database_path.is_none());
        assert_eq!(config.storage.max_events, 200);
        assert_eq!(config.recovery.procedure, ProcedureId::Rhinoplasty);
        assert_eq!(config.recovery.days_post_op, 5);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_max_events() {
        let mut config = Config::default();
        config.storage.max_events = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("max_events"));
    }

    #[test]
    fn test_database_path_default() {
        let path = Config::default().database_path();
        assert!(path.to_string_lossy().contains("careapp.db"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/custom/path/db.sqlite"));

        assert_eq!(
            config.database_path(),
            PathBuf::from("/custom/path/db.sqlite")
        );
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("careapp"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_default_data_dir() {
        assert!(Config::default_data_dir()
            .to_string_lossy()
            .contains("careapp"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        figment::Jail::expect_with(|_jail| {
            let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")))
                .expect("defaults should load");
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_toml_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [storage]
                max_events = 50

                [recovery]
                procedure = "liposuction"
                days_post_op = 7
                "#,
            )?;

            let config = Config::load_from(Some(PathBuf::from("config.toml")))
                .expect("config should load");
            assert_eq!(config.storage.max_events, 50);
            assert_eq!(config.recovery.procedure, ProcedureId::Liposuction);
            assert_eq!(config.recovery.days_post_op, 7);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[storage]\nmax_events = 50\n")?;
            jail.set_env("CAREAPP_STORAGE__MAX_EVENTS", "10");
            jail.set_env("CAREAPP_RECOVERY__PROCEDURE", "breastAugmentation");

            let config = Config::load_from(Some(PathBuf::from("config.toml")))
                .expect("config should load");
            assert_eq!(config.storage.max_events, 10);
            assert_eq!(config.recovery.procedure, ProcedureId::BreastAugmentation);
            Ok(())
        });
    }

    #[test]
    fn test_unknown_procedure_fails_to_load() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[recovery]\nprocedure = \"facelift\"\n")?;

            let result = Config::load_from(Some(PathBuf::from("config.toml")));
            assert!(matches!(result, Err(Error::ConfigLoad(_))));
            Ok(())
        });
    }

    #[test]
    fn test_zero_max_events_fails_validation() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[storage]\nmax_events = 0\n")?;

            let result = Config::load_from(Some(PathBuf::from("config.toml")));
            assert!(matches!(result, Err(Error::ConfigValidation { .. })));
            Ok(())
        });
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_value(Config::default()).unwrap();
        assert_eq!(json["storage"]["max_events"], 200);
        assert_eq!(json["recovery"]["procedure"], "rhinoplasty");
    }

    #[test]
    fn test_storage_config_deserialize_partial() {
        let storage: StorageConfig = serde_json::from_str(r#"{"max_events": 25}"#).unwrap();
        assert_eq!(storage.max_events, 25);
        assert!(storage.database_path.is_none());
    }
}
