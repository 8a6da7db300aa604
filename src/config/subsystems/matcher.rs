// src/config/subsystems/matcher.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;
use crate::cluster::ClusterMode;
use crate::scorer::ScorerKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Minimum similarity score (0-100) for an address to join an existing
    /// cluster
    pub threshold: u8,
    /// Scoring strategy for similarity clustering
    pub metric: ScorerKind,
    /// Whether cluster keys come from similarity matching or from an
    /// external geocoding lookup
    pub mode: ClusterMode,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: 90,
            metric: ScorerKind::Weighted,
            mode: ClusterMode::Similarity,
        }
    }
}

impl FromIni for MatcherConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "matcher" {
            return None;
        }

        match key {
            "threshold" => {
                match value.parse::<u8>() {
                    Ok(threshold) if threshold <= 100 => {
                        self.threshold = threshold;
                        Some(Ok(()))
                    },
                    _ => Some(Err(Error::Config(
                        format!("Invalid threshold (must be between 0 and 100): {}", value)
                    ))),
                }
            },
            "metric" => {
                self.metric = match ScorerKind::from_str(value) {
                    Some(metric) => metric,
                    None => return Some(Err(Error::Config(
                        format!("Invalid similarity metric: {}", value)
                    ))),
                };
                Some(Ok(()))
            },
            "mode" => {
                self.mode = match ClusterMode::from_str(value) {
                    Some(mode) => mode,
                    None => return Some(Err(Error::Config(
                        format!("Invalid cluster mode: {}", value)
                    ))),
                };
                Some(Ok(()))
            },
            _ => None,
        }
    }
}

impl MatcherConfig {
    pub fn validate(&self) -> Result<()> {
        if self.threshold > 100 {
            return Err(Error::Config(
                "threshold must be between 0 and 100".to_string()
            ));
        }
        Ok(())
    }
}
