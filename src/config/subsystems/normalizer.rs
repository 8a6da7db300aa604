// src/config/subsystems/normalizer.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;
use crate::normalize::NormalizeMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Script handling: `cyrillic` transliterates Bulgarian Cyrillic to
    /// Latin before substitution, `latin` skips that step.
    pub mode: NormalizeMode,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            mode: NormalizeMode::Cyrillic,
        }
    }
}

impl FromIni for NormalizerConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "normalizer" {
            return None;
        }

        match key {
            "mode" => {
                self.mode = match NormalizeMode::from_str(value) {
                    Some(mode) => mode,
                    None => return Some(Err(Error::Config(
                        format!("Invalid normalizer mode: {}", value)
                    ))),
                };
                Some(Ok(()))
            },
            _ => None,
        }
    }
}

impl NormalizerConfig {
    pub fn validate(&self) -> Result<()> {
        Ok(())
    }
}
