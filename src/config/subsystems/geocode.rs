// src/config/subsystems/geocode.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;
use crate::geocode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeConfig {
    /// Name of the environment variable holding the API key. The key itself
    /// never lives in configuration files.
    pub api_key_env: String,
    /// Geocoding service endpoint
    pub endpoint: String,
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GEOCODE_API_KEY".to_string(),
            endpoint: geocode::DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl FromIni for GeocodeConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "geocode" {
            return None;
        }

        match key {
            "api_key_env" => {
                self.api_key_env = value.trim_matches('"').to_string();
                Some(Ok(()))
            },
            "endpoint" => {
                self.endpoint = value.trim_matches('"').to_string();
                Some(Ok(()))
            },
            _ => None,
        }
    }
}

impl GeocodeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.api_key_env.is_empty() {
            return Err(Error::Config(
                "api_key_env must not be empty".to_string()
            ));
        }
        if self.endpoint.is_empty() {
            return Err(Error::Config(
                "endpoint must not be empty".to_string()
            ));
        }
        Ok(())
    }
}
