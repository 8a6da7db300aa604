pub mod translit;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize, Deserialize};

use crate::mapper::SubstitutionTable;

lazy_static! {
    static ref MULTI_SPACE: Regex = Regex::new(r"\s{2,}").unwrap();
}

/// Which script handling the normalizer applies. `Latin` skips the
/// transliteration step and is otherwise identical; use it when inputs are
/// known not to contain Cyrillic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NormalizeMode {
    Latin,
    Cyrillic,
}

impl NormalizeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizeMode::Latin => "latin",
            NormalizeMode::Cyrillic => "cyrillic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim_matches('"').to_lowercase().as_str() {
            "latin" => Some(Self::Latin),
            "cyrillic" => Some(Self::Cyrillic),
            _ => None,
        }
    }
}

impl Default for NormalizeMode {
    fn default() -> Self {
        Self::Cyrillic
    }
}

/// Turns one raw address string into its canonical comparable form. The
/// canonical form is the uniqueness key downstream, so the same input and
/// table must always produce the same output; normalization is a pure
/// function with no side effects.
pub struct Normalizer<'a> {
    table: &'a SubstitutionTable,
    mode: NormalizeMode,
}

impl<'a> Normalizer<'a> {
    pub fn new(table: &'a SubstitutionTable, mode: NormalizeMode) -> Self {
        Self { table, mode }
    }

    /// Canonicalize one address. Applied per comma-separated segment:
    /// trim, collapse internal whitespace runs, lowercase, transliterate
    /// Cyrillic (in `Cyrillic` mode), then substitute each space-separated
    /// token through the table. Segments are rejoined with `,` and no added
    /// space. Idempotent on already-canonical input.
    pub fn normalize(&self, raw: &str) -> String {
        let segments: Vec<String> = raw
            .split(',')
            .map(|segment| self.normalize_segment(segment))
            .collect();
        segments.join(",")
    }

    fn normalize_segment(&self, segment: &str) -> String {
        let lowered = segment.trim().to_lowercase();
        let collapsed = MULTI_SPACE.replace_all(&lowered, " ");
        let latin = match self.mode {
            NormalizeMode::Cyrillic => translit::to_latin(&collapsed),
            NormalizeMode::Latin => collapsed.into_owned(),
        };

        let substituted: Vec<&str> = latin
            .split(' ')
            .map(|token| self.table.lookup(token))
            .collect();
        substituted.join(" ")
    }
}
