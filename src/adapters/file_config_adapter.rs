//! INI file configuration adapter.

use crate::domain::error::EdgemapError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub const DEFAULT_CAPITAL: f64 = 10_000.0;
pub const DEFAULT_LEVERAGE: f64 = 1.0;
pub const DEFAULT_OUTPUT: &str = "report.html";
pub const DEFAULT_DECIMALS: i64 = 2;
pub const DEFAULT_TITLE: &str = "Order Risk/Reward Report";

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

/// Validate the config values the analyze pipeline consumes. Missing keys
/// fall back to defaults and pass; present values must be in range.
pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), EdgemapError> {
    validate_capital(config)?;
    validate_leverage(config)?;
    validate_decimals(config)?;
    Ok(())
}

fn validate_capital(config: &dyn ConfigPort) -> Result<(), EdgemapError> {
    let value = config.get_double("account", "capital", DEFAULT_CAPITAL);
    if value <= 0.0 {
        return Err(EdgemapError::ConfigInvalid {
            section: "account".to_string(),
            key: "capital".to_string(),
            reason: "capital must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_leverage(config: &dyn ConfigPort) -> Result<(), EdgemapError> {
    let value = config.get_double("account", "leverage", DEFAULT_LEVERAGE);
    if value <= 0.0 {
        return Err(EdgemapError::ConfigInvalid {
            section: "account".to_string(),
            key: "leverage".to_string(),
            reason: "leverage must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_decimals(config: &dyn ConfigPort) -> Result<(), EdgemapError> {
    let value = config.get_int("report", "decimals", DEFAULT_DECIMALS);
    if value < 0 {
        return Err(EdgemapError::ConfigInvalid {
            section: "report".to_string(),
            key: "decimals".to_string(),
            reason: "decimals must be non-negative".to_string(),
        });
    }
    Ok(())
}
