//! Configuration management for the series insights engine
//!
//! Settings are layered: built-in defaults, then an optional YAML file, then
//! environment variables prefixed with `SERIES_INSIGHTS_` (nested keys split
//! on `__`, e.g. `SERIES_INSIGHTS_ANALYZER__IQR_MULTIPLIER=2.0`).

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use series_insights_types::{AnalyzerThresholds, InsightThresholds};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "SERIES_INSIGHTS_";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Analyzer thresholds
    pub analyzer: AnalyzerThresholds,

    /// Insight rule thresholds
    pub insights: InsightThresholds,

    /// Observability settings
    pub observability: ObservabilityConfig,
}

impl EngineConfig {
    /// Load configuration from defaults, file and environment, then validate
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(EngineConfig::default()));

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::LoadError(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            figment = figment.merge(Yaml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        Self::from_figment(figment)
    }

    /// Extract and validate from an already assembled figment
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Self = figment
            .extract()
            .map_err(|e| ConfigError::LoadError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.analyzer
            .validate()
            .map_err(|e| ConfigError::ValidationError(format!("analyzer: {e}")))?;
        self.insights
            .validate()
            .map_err(|e| ConfigError::ValidationError(format!("insights: {e}")))?;

        let level = self.observability.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "unknown log level '{}'",
                self.observability.log_level
            )));
        }

        Ok(())
    }
}

/// Observability configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level
    pub log_level: String,

    /// Enable structured JSON logging
    pub json_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logging: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use series_insights_types::NormalityMethod;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.analyzer.iqr_multiplier, 1.5);
        assert_eq!(config.insights.min_reliable_points, 30);
        assert_eq!(config.observability.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = EngineConfig::default();
        config.analyzer.mad_cutoff = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));

        config.analyzer.mad_cutoff = 3.5;
        config.observability.log_level = "loud".to_string();
        assert!(config.validate().is_err());

        config.observability.log_level = "DEBUG".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_overrides_defaults() {
        let figment = Figment::from(Serialized::defaults(EngineConfig::default())).merge(
            Yaml::string(
                r#"
analyzer:
  iqr_multiplier: 3.0
  normality_method: jarque_bera
  candidate_periods: [7, 30]
insights:
  trend_confidence: 0.8
"#,
            ),
        );
        let config = EngineConfig::from_figment(figment).unwrap();

        assert_eq!(config.analyzer.iqr_multiplier, 3.0);
        assert_eq!(config.analyzer.normality_method, NormalityMethod::JarqueBera);
        assert_eq!(config.analyzer.candidate_periods, vec![7, 30]);
        assert_eq!(config.analyzer.mad_cutoff, 3.5);
        assert_eq!(config.insights.trend_confidence, 0.8);
        assert_eq!(config.insights.volatility_cv, 0.3);
    }

    #[test]
    fn test_invalid_yaml_value_fails_validation() {
        let figment = Figment::from(Serialized::defaults(EngineConfig::default()))
            .merge(Yaml::string("analyzer:\n  candidate_periods: [1]\n"));
        assert!(matches!(
            EngineConfig::from_figment(figment),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_file_and_env_layers() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "engine.yaml",
                "analyzer:\n  zscore_threshold: 2.5\nobservability:\n  json_logging: true\n",
            )?;
            jail.set_env("SERIES_INSIGHTS_ANALYZER__ZSCORE_THRESHOLD", "4.0");
            jail.set_env("SERIES_INSIGHTS_OBSERVABILITY__LOG_LEVEL", "debug");

            let config = EngineConfig::load(Some(PathBuf::from("engine.yaml")))
                .map_err(|e| e.to_string())?;

            assert_eq!(config.analyzer.zscore_threshold, 4.0);
            assert!(config.observability.json_logging);
            assert_eq!(config.observability.log_level, "debug");
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_is_a_load_error() {
        let result = EngineConfig::load(Some(PathBuf::from("/nonexistent/engine.yaml")));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
