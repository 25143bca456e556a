use crate::error::ConfigError;
use core_types::Settings;
use export::CsvQuoting;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub defaults: DefaultsConfig,
    pub export: ExportConfig,
}

/// Where the collections are kept on disk.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one `<key>.json` file per collection.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive, e.g. `info` or `pricing=debug,info`. `RUST_LOG` wins when set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

/// Settings used until the operator saves their own.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub gold_price_24: Decimal,
    pub gold_price_21: Decimal,
    pub gold_price_18: Decimal,
    pub currency: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            gold_price_24: dec!(3100),
            gold_price_21: dec!(2700),
            gold_price_18: dec!(2300),
            currency: "EGP".to_string(),
        }
    }
}

impl DefaultsConfig {
    pub fn to_settings(&self) -> Settings {
        Settings {
            gold_price24: self.gold_price_24,
            gold_price21: self.gold_price_21,
            gold_price18: self.gold_price_18,
            tax_rate: Decimal::ZERO,
            currency: self.currency.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub quoting: CsvQuoting,
}

impl AppConfig {
    /// Rejects values that would load fine but make no sense to run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "storage.data_dir must not be empty".to_string(),
            ));
        }

        let prices = [
            ("gold_price_24", self.defaults.gold_price_24),
            ("gold_price_21", self.defaults.gold_price_21),
            ("gold_price_18", self.defaults.gold_price_18),
        ];
        for (name, price) in prices {
            if price < Decimal::ZERO {
                return Err(ConfigError::ValidationError(format!(
                    "defaults.{name} must not be negative, got {price}"
                )));
            }
        }

        if self.defaults.currency.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "defaults.currency must not be empty".to_string(),
            ));
        }

        EnvFilter::try_new(&self.logging.level).map_err(|e| {
            ConfigError::ValidationError(format!("logging.level '{}': {e}", self.logging.level))
        })?;

        Ok(())
    }
}

/// Command-line overrides applied on top of the loaded file and environment.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct ConfigOverrides {
    /// Directory holding the shop's data files.
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub data_dir: Option<PathBuf>,

    /// Log filter directive, e.g. `debug`.
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub log_level: Option<String>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.data_dir {
            config.storage.data_dir = dir.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}
