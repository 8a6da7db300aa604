// src/config/file.rs

use serde::{Serialize, Deserialize};
use std::path::PathBuf;
use crate::error::{Error, Result};
use super::FromIni;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub mappers_dir: PathBuf,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("addresses.csv"),
            output_path: PathBuf::from("grouped_addresses.csv"),
            mappers_dir: PathBuf::from("mappers"),
        }
    }
}

impl FromIni for FileConfig {
    fn from_ini_section(&mut self, _section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        match key {
            "input_path" => {
                self.input_path = PathBuf::from(value.trim_matches('"'));
                Some(Ok(()))
            },
            "output_path" => {
                self.output_path = PathBuf::from(value.trim_matches('"'));
                Some(Ok(()))
            },
            "mappers_dir" => {
                self.mappers_dir = PathBuf::from(value.trim_matches('"'));
                Some(Ok(()))
            },
            _ => None,
        }
    }
}

impl FileConfig {
    pub fn validate(&self) -> Result<()> {
        // Input existence is checked when the file is read; only reject
        // outright empty paths here
        if self.input_path.as_os_str().is_empty() {
            return Err(Error::Config("input_path must not be empty".to_string()));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(Error::Config("output_path must not be empty".to_string()));
        }
        Ok(())
    }
}
