use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use ahash::AHashMap;
use log::{debug, info, warn};
use serde::Deserialize;

/// A single parsed substitution source. JSON mapper files come in two shapes:
/// a direct `{token: replacement}` mapping, or a `{canonical: [synonym, ...]}`
/// mapping that is inverted into synonym -> canonical before merging.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MapperSource {
    Direct(HashMap<String, String>),
    Synonyms(HashMap<String, Vec<String>>),
}

impl MapperSource {
    /// Number of lookup entries this source will contribute.
    pub fn entry_count(&self) -> usize {
        match self {
            MapperSource::Direct(map) => map.len(),
            MapperSource::Synonyms(map) => map.values().map(|v| v.len()).sum(),
        }
    }
}

/// The aggregated token replacement table consulted during normalization.
/// Built once per run from an ordered sequence of sources and read-only
/// afterwards. Keys and values are always lowercase.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionTable {
    entries: AHashMap<String, String>,
}

impl SubstitutionTable {
    /// Build a table by merging sources in the order given. On key collision
    /// the later source wins, so callers must supply sources in a
    /// deterministic order.
    pub fn build<I: IntoIterator<Item = MapperSource>>(sources: I) -> Self {
        let mut table = Self::default();
        for source in sources {
            table.merge(source);
        }
        if table.is_empty() {
            warn!("Empty substitution table will be used");
        }
        table
    }

    fn merge(&mut self, source: MapperSource) {
        match source {
            MapperSource::Direct(map) => {
                for (token, replacement) in map {
                    self.entries
                        .insert(token.to_lowercase(), replacement.to_lowercase());
                }
            }
            MapperSource::Synonyms(map) => {
                // Inverted: every synonym becomes a key pointing at its canonical form
                for (canonical, synonyms) in map {
                    let canonical = canonical.to_lowercase();
                    for synonym in synonyms {
                        self.entries
                            .insert(synonym.to_lowercase(), canonical.clone());
                    }
                }
            }
        }
    }

    /// Look up a token, falling back to the token itself when no replacement
    /// is registered. Missing keys are not an error.
    pub fn lookup<'a>(&'a self, token: &'a str) -> &'a str {
        match self.entries.get(token) {
            Some(replacement) => replacement.as_str(),
            None => token,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for SubstitutionTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut entries = AHashMap::new();
        for (k, v) in iter {
            entries.insert(k.to_lowercase(), v.to_lowercase());
        }
        Self { entries }
    }
}

/// Load every `*.json` mapper file in a directory, sorted by file name so the
/// merge order (and therefore collision resolution) is reproducible across
/// platforms. A file that is missing or malformed is skipped with a warning;
/// it is never fatal.
pub fn load_sources(dir: &Path) -> Vec<MapperSource> {
    let mut paths: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().map_or(false, |ext| ext == "json"))
            .collect(),
        Err(e) => {
            warn!("Cannot read mapper directory {:?}: {}", dir, e);
            return Vec::new();
        }
    };
    paths.sort();

    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        match load_source(&path) {
            Ok(source) => {
                debug!("Loaded {} entries from {:?}", source.entry_count(), path);
                sources.push(source);
            }
            Err(e) => {
                warn!("Corrupted or empty JSON mapper {:?}: {}", path, e);
            }
        }
    }

    info!("Loaded {} substitution sources from {:?}", sources.len(), dir);
    sources
}

fn load_source(path: &Path) -> crate::error::Result<MapperSource> {
    let content = fs::read_to_string(path)?;
    let source = serde_json::from_str(&content)?;
    Ok(source)
}
