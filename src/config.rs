//! Timer configuration
//!
//! Picks the reporting unit from the environment or, with the `toml-config`
//! feature, from a TOML file such as:
//!
//! ```toml
//! unit = "ms"
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::env::{self, VarError};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::timer::Timer;
use perftimer_units::{ParseTimeUnitError, TimeUnit};

/// Environment variable holding the reporting unit
pub const UNIT_ENV_VAR: &str = "PERFTIMER_UNIT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PERFTIMER_UNIT: {0}")]
    InvalidUnit(#[from] ParseTimeUnitError),

    #[error("PERFTIMER_UNIT is not valid unicode")]
    NotUnicode,

    #[cfg(feature = "toml-config")]
    #[error("invalid timer configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Settings for building a [`Timer`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Reporting unit; accepts labels ("ms") as well as names ("milliseconds")
    #[serde(deserialize_with = "deserialize_unit")]
    pub unit: TimeUnit,
}

impl TimerConfig {
    /// Configuration reporting in `unit`
    pub fn new(unit: TimeUnit) -> Self {
        Self { unit }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(UNIT_ENV_VAR) {
            Ok(raw) => Self::from_unit_str(&raw),
            Err(VarError::NotPresent) => Ok(Self::default()),
            Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode),
        }
    }

    fn from_unit_str(raw: &str) -> Result<Self, ConfigError> {
        let unit = raw.parse::<TimeUnit>()?;
        debug!(%unit, "timer unit read from environment");
        Ok(Self { unit })
    }

    /// Parse configuration from a TOML document
    #[cfg(feature = "toml-config")]
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration from TOML file
    #[cfg(feature = "toml-config")]
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read timer config {}", path.display()))?;
        let config = Self::from_toml_str(&contents)
            .with_context(|| format!("failed to parse timer config {}", path.display()))?;
        debug!(path = %path.display(), unit = %config.unit, "timer config loaded");
        Ok(config)
    }

    /// Load configuration from TOML file (stub when toml feature is disabled)
    #[cfg(not(feature = "toml-config"))]
    pub fn from_file(_path: &Path) -> anyhow::Result<Self> {
        anyhow::bail!("TOML support not enabled. Enable the 'toml-config' feature.")
    }

    /// Merge with environment variables (env vars take precedence)
    pub fn merge_with_env(self) -> Result<Self, ConfigError> {
        match env::var(UNIT_ENV_VAR) {
            Ok(raw) => Self::from_unit_str(&raw),
            Err(VarError::NotPresent) => Ok(self),
            Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode),
        }
    }

    /// Build a timer reporting in the configured unit
    pub fn build(&self) -> Timer {
        Timer::new(self.unit)
    }
}

impl From<TimeUnit> for TimerConfig {
    fn from(unit: TimeUnit) -> Self {
        Self::new(unit)
    }
}

fn deserialize_unit<'de, D>(deserializer: D) -> Result<TimeUnit, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TimerConfig::default();
        assert_eq!(config.unit, TimeUnit::Nanoseconds);
        assert_eq!(config.build().unit(), TimeUnit::Nanoseconds);
    }

    #[test]
    fn test_from_unit_str() {
        let config = TimerConfig::from_unit_str("ms").unwrap();
        assert_eq!(config, TimerConfig::new(TimeUnit::Milliseconds));

        let err = TimerConfig::from_unit_str("hours").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUnit(_)));
        assert!(err.to_string().contains(UNIT_ENV_VAR));
    }

    /// Serializes tests that touch `PERFTIMER_UNIT`
    static ENV_LOCK: parking_lot::Mutex<()> = parking_lot::Mutex::new(());

    fn set_unit_var(value: Option<&str>) {
        // SAFETY: every test that reads or writes the variable holds ENV_LOCK
        unsafe {
            match value {
                Some(value) => env::set_var(UNIT_ENV_VAR, value),
                None => env::remove_var(UNIT_ENV_VAR),
            }
        }
    }

    #[test]
    fn test_from_env() {
        let _guard = ENV_LOCK.lock();

        set_unit_var(Some("ms"));
        assert_eq!(
            TimerConfig::from_env().unwrap(),
            TimerConfig::new(TimeUnit::Milliseconds)
        );

        set_unit_var(Some("eons"));
        let err = TimerConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUnit(_)));

        set_unit_var(None);
        assert_eq!(TimerConfig::from_env().unwrap(), TimerConfig::default());
    }

    #[test]
    fn test_merge_with_env() {
        let _guard = ENV_LOCK.lock();
        let file_config = TimerConfig::new(TimeUnit::Seconds);

        set_unit_var(Some("us"));
        assert_eq!(
            file_config.merge_with_env().unwrap().unit,
            TimeUnit::Microseconds
        );

        set_unit_var(Some("eons"));
        assert!(matches!(
            file_config.merge_with_env(),
            Err(ConfigError::InvalidUnit(_))
        ));

        set_unit_var(None);
        assert_eq!(file_config.merge_with_env().unwrap(), file_config);
    }

    #[cfg(unix)]
    #[test]
    fn test_from_env_rejects_non_unicode() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let _guard = ENV_LOCK.lock();
        // SAFETY: ENV_LOCK is held
        unsafe { env::set_var(UNIT_ENV_VAR, OsStr::from_bytes(b"m\xffs")) };
        assert!(matches!(
            TimerConfig::from_env(),
            Err(ConfigError::NotUnicode)
        ));
        set_unit_var(None);
    }

    #[test]
    fn test_build_uses_unit() {
        let timer = TimerConfig::from(TimeUnit::Seconds).build();
        assert_eq!(timer.label(), "s");
        assert!(!timer.is_running());
    }

    #[test]
    fn test_deserialize_accepts_labels_and_names() {
        let config: TimerConfig = serde_json::from_str(r#"{"unit": "μs"}"#).unwrap();
        assert_eq!(config.unit, TimeUnit::Microseconds);

        let config: TimerConfig = serde_json::from_str(r#"{"unit": "seconds"}"#).unwrap();
        assert_eq!(config.unit, TimeUnit::Seconds);

        let config: TimerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TimerConfig::default());

        assert!(serde_json::from_str::<TimerConfig>(r#"{"unit": "weeks"}"#).is_err());
    }

    #[test]
    fn test_serialize_round_trips() {
        let config = TimerConfig::new(TimeUnit::Milliseconds);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"unit":"milliseconds"}"#);
        assert_eq!(serde_json::from_str::<TimerConfig>(&json).unwrap(), config);
    }

    #[test]
    #[cfg(feature = "toml-config")]
    fn test_toml_config() {
        let config = TimerConfig::from_toml_str("unit = \"ms\"\n").unwrap();
        assert_eq!(config.unit, TimeUnit::Milliseconds);

        assert!(matches!(
            TimerConfig::from_toml_str("unit = \"eons\"\n"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    #[cfg(feature = "toml-config")]
    fn test_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timer.toml");
        std::fs::write(&path, "unit = \"seconds\"\n").unwrap();

        let loaded = TimerConfig::from_file(&path).unwrap();
        assert_eq!(loaded.unit, TimeUnit::Seconds);
    }

    #[test]
    #[cfg(feature = "toml-config")]
    fn test_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TimerConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read timer config"));
    }

    #[test]
    #[cfg(not(feature = "toml-config"))]
    fn test_file_loading_requires_feature() {
        let err = TimerConfig::from_file(Path::new("timer.toml")).unwrap_err();
        assert!(err.to_string().contains("toml-config"));
    }
}
