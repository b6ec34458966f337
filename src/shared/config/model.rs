use serde::Deserialize;

use crate::engine::adjust::{Float32Encoding, SynthesisOptions};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub synthesis: SynthesisConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Rolling log files are only written when set.
    pub log_dir: Option<String>,
    pub stdout_level: String,
    pub file_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            stdout_level: "warn".to_string(),
            file_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    pub float32_encoding: Float32Encoding,
    /// Lower bound on the number of documents between progress log lines
    pub progress_every_min: u32,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        let options = SynthesisOptions::default();
        Self {
            float32_encoding: options.float32_encoding,
            progress_every_min: options.progress_every_min,
        }
    }
}

impl SynthesisConfig {
    pub fn options(&self) -> SynthesisOptions {
        SynthesisOptions {
            float32_encoding: self.float32_encoding,
            progress_every_min: self.progress_every_min,
        }
    }
}

use std::env;

/// Loads settings from `$DV_ENABLER_CONFIG` (default `dv_enabler`, optional)
/// with `DV_ENABLER__SECTION__KEY` environment overrides.
pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var("DV_ENABLER_CONFIG").unwrap_or_else(|_| "dv_enabler".to_string());
    load_settings_from(&config_path)
}

pub fn load_settings_from(config_path: &str) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(config_path).required(false))
        .add_source(config::Environment::with_prefix("DV_ENABLER").separator("__"))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
