use std::env;

use thiserror::Error;

use crate::encoding::Format;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NegotiatorConfig {
    pub pretty_print: bool,
    pub default_format: Format,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("NEGOTIATOR_PRETTY_PRINT must be one of true, false, 1, 0")]
    InvalidPrettyPrint,
    #[error("NEGOTIATOR_DEFAULT_FORMAT must be json or xml")]
    InvalidDefaultFormat,
}

impl NegotiatorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let pretty_print = env::var("NEGOTIATOR_PRETTY_PRINT")
            .ok()
            .map(|value| value.trim().to_ascii_lowercase())
            .filter(|value| !value.is_empty())
            .map(|value| match value.as_str() {
                "true" | "1" => Ok(true),
                "false" | "0" => Ok(false),
                _ => Err(ConfigError::InvalidPrettyPrint),
            })
            .transpose()?
            .unwrap_or(false);
        let default_format = env::var("NEGOTIATOR_DEFAULT_FORMAT")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(|value| {
                value
                    .parse::<Format>()
                    .map_err(|_| ConfigError::InvalidDefaultFormat)
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            pretty_print,
            default_format,
        })
    }
}
