//! CLI configuration management
//!
//! Loads settings from an optional TOML file, `LATTICE_*` environment
//! variables and command-line flags.
//!
//! ```toml
//! log_level = "info"
//!
//! [pricing]
//! steps = 1000
//! exercise = "american"
//! degeneracy = "warn"
//! day_count = "ACT/365"
//!
//! [output]
//! format = "table"
//! precision = 6
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use pricer_core::types::DayCountConvention;
use pricer_lattice::{DegeneracyPolicy, LatticeConfig, LatticeError, MAX_STEPS};
use pricer_models::instruments::ExerciseStyle;
use serde::Deserialize;
use thiserror::Error;

/// File loaded when `--config` is not given; silently skipped if absent.
pub const DEFAULT_CONFIG_FILE: &str = "lattice.toml";

/// Largest number of decimals printed.
pub const MAX_PRECISION: usize = 16;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json, csv")]
    InvalidOutputFormat(String),

    #[error("Invalid step count: {0}. Must be between 1 and {max}", max = MAX_STEPS)]
    InvalidSteps(usize),

    #[error("Invalid precision: {0}. Must be at most {max}", max = MAX_PRECISION)]
    InvalidPrecision(usize),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels accepted by `log_level` and `LATTICE_LOG_LEVEL`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// How results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ConfigError::InvalidOutputFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// `[pricing]` section
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    /// Lattice time steps
    pub steps: usize,
    /// Exercise style for the no-dividend pricer
    pub exercise: ExerciseStyle,
    /// What to do with a degenerate lattice
    pub degeneracy: DegeneracyPolicy,
    /// Day count used to turn dates into year fractions
    pub day_count: DayCountConvention,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            steps: 1000,
            exercise: ExerciseStyle::American,
            degeneracy: DegeneracyPolicy::Warn,
            day_count: DayCountConvention::Actual365Fixed,
        }
    }
}

/// `[output]` section
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Output format
    pub format: OutputFormat,
    /// Decimals printed in table and CSV output
    pub precision: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            precision: 6,
        }
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    pub log_level: LogLevel,
    /// Lattice settings
    pub pricing: PricingSettings,
    /// Output settings
    pub output: OutputSettings,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config: CliConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Apply `LATTICE_*` environment overrides
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("LATTICE_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }

        if let Some(steps) = lookup("LATTICE_STEPS") {
            self.pricing.steps = steps.trim().parse().map_err(|_| {
                ConfigError::EnvError(format!("LATTICE_STEPS is not an integer: {}", steps))
            })?;
        }

        if let Some(format) = lookup("LATTICE_OUTPUT_FORMAT") {
            self.output.format = OutputFormat::from_str(&format)?;
        }

        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &ConfigArgs) {
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        if let Some(steps) = cli.steps {
            self.pricing.steps = steps;
        }
        if let Some(format) = cli.format {
            self.output.format = format;
        }
        if let Some(precision) = cli.precision {
            self.output.precision = precision;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pricing.steps == 0 || self.pricing.steps > MAX_STEPS {
            return Err(ConfigError::InvalidSteps(self.pricing.steps));
        }
        if self.output.precision > MAX_PRECISION {
            return Err(ConfigError::InvalidPrecision(self.output.precision));
        }
        Ok(())
    }

    /// Lattice engine configuration, optionally with a per-command step count.
    pub fn lattice_config(&self, steps: Option<usize>) -> Result<LatticeConfig, LatticeError> {
        LatticeConfig::builder()
            .steps(steps.unwrap_or(self.pricing.steps))
            .exercise(self.pricing.exercise)
            .degeneracy_policy(self.pricing.degeneracy)
            .build()
    }
}

/// Configuration overrides taken from global CLI flags
#[derive(Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Explicit config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<LogLevel>,
    /// Step count override
    pub steps: Option<usize>,
    /// Output format override
    pub format: Option<OutputFormat>,
    /// Precision override
    pub precision: Option<usize>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &ConfigArgs) -> Result<CliConfig, ConfigError> {
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                CliConfig::from_file(default_path)?
            } else {
                CliConfig::default()
            }
        }
    };

    config.apply_env()?;
    config.merge_with_cli(cli);
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.pricing.steps, 1000);
        assert_eq!(config.pricing.exercise, ExerciseStyle::American);
        assert_eq!(config.pricing.degeneracy, DegeneracyPolicy::Warn);
        assert_eq!(config.pricing.day_count, DayCountConvention::Actual365Fixed);
        assert_eq!(config.output.format, OutputFormat::Table);
        assert_eq!(config.output.precision, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Warn").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("verbose").is_err());
        assert_eq!(LogLevel::Error.to_string(), "error");
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("csv").unwrap(), OutputFormat::Csv);
        assert!(matches!(
            OutputFormat::from_str("xml"),
            Err(ConfigError::InvalidOutputFormat(_))
        ));
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            log_level = "debug"

            [pricing]
            steps = 250
            exercise = "european"
            degeneracy = "reject"
            day_count = "ACT/360"

            [output]
            format = "json"
            precision = 4
        "#;

        let config: CliConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.pricing.steps, 250);
        assert_eq!(config.pricing.exercise, ExerciseStyle::European);
        assert_eq!(config.pricing.degeneracy, DegeneracyPolicy::Reject);
        assert_eq!(config.pricing.day_count, DayCountConvention::Actual360);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.precision, 4);
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let config: CliConfig = toml::from_str("[pricing]\nsteps = 50\n").unwrap();
        assert_eq!(config.pricing.steps, 50);
        assert_eq!(config.pricing.exercise, ExerciseStyle::American);
        assert_eq!(config.output.precision, 6);
    }

    #[test]
    fn test_validate() {
        let mut config = CliConfig::default();
        config.pricing.steps = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidSteps(0))));

        config.pricing.steps = 10;
        config.output.precision = 17;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPrecision(17))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("LATTICE_LOG_LEVEL", "warn"),
            ("LATTICE_STEPS", "400"),
            ("LATTICE_OUTPUT_FORMAT", "csv"),
        ]
        .into_iter()
        .collect();

        let mut config = CliConfig::default();
        config
            .apply_env_with(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.pricing.steps, 400);
        assert_eq!(config.output.format, OutputFormat::Csv);
    }

    #[test]
    fn test_env_bad_steps() {
        let mut config = CliConfig::default();
        let result = config.apply_env_with(|key| {
            (key == "LATTICE_STEPS").then(|| "many".to_string())
        });
        assert!(matches!(result, Err(ConfigError::EnvError(_))));
    }

    #[test]
    fn test_cli_overrides_env() {
        let mut config = CliConfig::default();
        config
            .apply_env_with(|key| (key == "LATTICE_STEPS").then(|| "400".to_string()))
            .unwrap();
        config.merge_with_cli(&ConfigArgs {
            steps: Some(75),
            format: Some(OutputFormat::Json),
            ..Default::default()
        });
        assert_eq!(config.pricing.steps, 75);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("lattice-config-{}.toml", std::process::id()));
        std::fs::write(&path, "log_level = \"error\"\n[output]\nprecision = 3\n").unwrap();

        let config = CliConfig::from_file(&path).unwrap();
        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.output.precision, 3);

        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            CliConfig::from_file(&path),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_lattice_config() {
        let mut config = CliConfig::default();
        config.pricing.exercise = ExerciseStyle::European;
        let lattice = config.lattice_config(Some(20)).unwrap();
        assert_eq!(lattice.steps(), 20);
        assert_eq!(lattice.exercise(), ExerciseStyle::European);
        assert_eq!(config.lattice_config(None).unwrap().steps(), 1000);
        assert!(config.lattice_config(Some(0)).is_err());
    }
}
