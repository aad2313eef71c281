//! Text-generation backend configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Configuration for the text-generation backend
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// API key for the generation backend
    pub api_key: Option<String>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum tokens per generated reply
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// History lines handed to the backend per request
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

impl GenerationConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a backend API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Validate generation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        if self.history_window == 0 {
            return Err(ValidationError::InvalidHistoryWindow);
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            timeout_secs: default_timeout(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            history_window: default_history_window(),
        }
    }
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_tokens() -> u32 {
    300
}

fn default_temperature() -> f64 {
    0.6
}

fn default_history_window() -> usize {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GenerationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(!config.has_api_key());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = GenerationConfig {
            timeout_secs: 0,
            ..GenerationConfig::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidTimeout)));
    }

    #[test]
    fn out_of_range_temperature_is_rejected() {
        let config = GenerationConfig {
            temperature: 2.5,
            ..GenerationConfig::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidTemperature)));
    }

    #[test]
    fn empty_api_key_counts_as_unconfigured() {
        let config = GenerationConfig {
            api_key: Some(String::new()),
            ..GenerationConfig::default()
        };
        assert!(!config.has_api_key());
    }
}
