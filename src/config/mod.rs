pub mod file;
pub mod subsystems;

use serde::{Serialize, Deserialize};
use std::path::Path;
use std::fs;
use crate::error::Result;
use log::{trace, warn};

pub trait FromIni {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdresarConfig {
    // File paths
    pub files: file::FileConfig,

    // Subsystem configs
    pub normalizer: subsystems::NormalizerConfig,
    pub matcher: subsystems::MatcherConfig,
    pub geocode: subsystems::GeocodeConfig,

    // Log level for the whole run
    pub log_level: String,
}

impl AdresarConfig {
    pub fn validate(&self) -> Result<()> {
        self.files.validate()?;
        self.normalizer.validate()?;
        self.matcher.validate()?;
        self.geocode.validate()?;
        Ok(())
    }

    pub fn get_log_level(&self) -> log::LevelFilter {
        match self.log_level.to_lowercase().as_str() {
            "off" => log::LevelFilter::Off,
            "error" => log::LevelFilter::Error,
            "warn" => log::LevelFilter::Warn,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            _ => log::LevelFilter::Info,
        }
    }

    pub fn from_ini<P: AsRef<Path>>(path: P) -> Result<Self> {
        trace!("Loading configuration from: {:?}", path.as_ref());

        let content = fs::read_to_string(&path)?;

        let mut config = Self::default();
        let mut current_section = String::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                current_section = line[1..line.len() - 1].to_string();
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim();

                // Delegate to appropriate subsystem config
                if let Some(result) = match current_section.as_str() {
                    "file" => config.files.from_ini_section(&current_section, key, value),
                    "normalizer" => config.normalizer.from_ini_section(&current_section, key, value),
                    "matcher" => config.matcher.from_ini_section(&current_section, key, value),
                    "geocode" => config.geocode.from_ini_section(&current_section, key, value),
                    "run" if key == "log_level" => {
                        config.log_level = value.trim_matches('"').to_string();
                        Some(Ok(()))
                    }
                    _ => None,
                } {
                    if let Err(e) = result {
                        warn!("Error processing config key {}={}: {}", key, value, e);
                    }
                } else {
                    warn!(
                        "Unrecognized config key: {}={} in section [{}]",
                        key, value, current_section
                    );
                }
            }
        }

        config.validate()?;
        Ok(config)
    }
}

impl Default for AdresarConfig {
    fn default() -> Self {
        Self {
            files: file::FileConfig::default(),
            normalizer: subsystems::NormalizerConfig::default(),
            matcher: subsystems::MatcherConfig::default(),
            geocode: subsystems::GeocodeConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::ClusterMode;
    use crate::normalize::NormalizeMode;
    use crate::scorer::ScorerKind;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AdresarConfig::default();
        assert_eq!(config.matcher.threshold, 90);
        assert_eq!(config.matcher.metric, ScorerKind::Weighted);
        assert_eq!(config.matcher.mode, ClusterMode::Similarity);
        assert_eq!(config.normalizer.mode, NormalizeMode::Cyrillic);
        assert_eq!(config.get_log_level(), log::LevelFilter::Info);
        config.validate().unwrap();
    }

    #[test]
    fn test_from_ini() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "# run settings\n\
             [run]\n\
             log_level = debug\n\
             [file]\n\
             input_path = \"data/in.csv\"\n\
             output_path = \"data/out.csv\"\n\
             mappers_dir = \"data/mappers\"\n\
             [normalizer]\n\
             mode = latin\n\
             [matcher]\n\
             threshold = 85\n\
             metric = token_set\n\
             mode = geocode\n\
             [geocode]\n\
             api_key_env = MY_GEO_KEY"
        )
        .unwrap();

        let config = AdresarConfig::from_ini(&path).unwrap();
        assert_eq!(config.get_log_level(), log::LevelFilter::Debug);
        assert_eq!(config.files.input_path.to_str(), Some("data/in.csv"));
        assert_eq!(config.files.mappers_dir.to_str(), Some("data/mappers"));
        assert_eq!(config.normalizer.mode, NormalizeMode::Latin);
        assert_eq!(config.matcher.threshold, 85);
        assert_eq!(config.matcher.metric, ScorerKind::TokenSet);
        assert_eq!(config.matcher.mode, ClusterMode::Geocode);
        assert_eq!(config.geocode.api_key_env, "MY_GEO_KEY");
    }

    #[test]
    fn test_invalid_key_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[matcher]\nthreshold = banana\nno_such_key = 1").unwrap();

        let config = AdresarConfig::from_ini(&path).unwrap();
        assert_eq!(config.matcher.threshold, 90);
    }
}
