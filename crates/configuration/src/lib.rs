//! # Pyramids Gold Configuration
//!
//! Typed application configuration and logging setup.

use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use logging::{env_filter, init_tracing};
pub use settings::{
    AppConfig, ConfigOverrides, DefaultsConfig, ExportConfig, LoggingConfig, StorageConfig,
};

/// The file read by [`load_config`], relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
/// Environment variables override the file as `PG__<SECTION>__<KEY>`.
pub const ENV_PREFIX: &str = "PG";

/// Loads the application configuration.
///
/// Reads `.env` if present, then `config.toml` if present, then `PG__*`
/// environment variables. Every section has defaults, so a missing file is fine.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_config_from(Path::new(DEFAULT_CONFIG_FILE))
}

/// Same as [`load_config`] but with an explicit file path and without `.env`.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    let config = builder.try_deserialize::<AppConfig>()?;
    config.validate()?;

    tracing::debug!(path = %path.display(), data_dir = %config.storage.data_dir.display(), "Loaded configuration.");
    Ok(config)
}
