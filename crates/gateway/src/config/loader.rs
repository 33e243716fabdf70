use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use super::types::GatewayConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Gateway name is empty")]
    MissingName,
    #[error("Invalid instrument {name}: {reason}")]
    InvalidInstrument { name: String, reason: String },
    #[error("Duplicate instrument: {0}")]
    DuplicateInstrument(String),
}

/// Load gateway configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GatewayConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<GatewayConfig, ConfigError> {
    let config: GatewayConfig = serde_json::from_str(json)?;
    Ok(config)
}

/// Load the default embedded configuration
pub fn load_default_config() -> Result<GatewayConfig, ConfigError> {
    let default_config = include_str!("gateway_config.json");
    load_config_from_str(default_config)
}

impl GatewayConfig {
    /// Get an instrument definition by name
    pub fn get_instrument(&self, name: &str) -> Option<&super::types::InstrumentConfig> {
        self.instruments.iter().find(|i| i.name == name)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::MissingName);
        }

        let mut seen = HashSet::new();
        for instrument in &self.instruments {
            let invalid = |reason: &str| ConfigError::InvalidInstrument {
                name: instrument.name.clone(),
                reason: reason.to_string(),
            };

            if instrument.name.trim().is_empty() {
                return Err(invalid("empty name"));
            }
            if instrument.time_frame_secs == 0 {
                return Err(invalid("time frame must be positive"));
            }
            let zero_override = [
                instrument.contract_size,
                instrument.step_size,
                instrument.step_value,
            ]
            .iter()
            .any(|value| value.is_some_and(|v| v.is_zero()));
            if zero_override {
                return Err(invalid("contract size and steps must be non-zero"));
            }
            if !seen.insert(instrument.name.as_str()) {
                return Err(ConfigError::DuplicateInstrument(instrument.name.clone()));
            }
        }
        Ok(())
    }
}
