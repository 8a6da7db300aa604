//! adresar is a library for deduplicating (name, address) records by
//! clustering addresses that refer to the same real-world location, even when
//! the strings differ in script, formatting, abbreviation, or minor spelling.
//! It provides a token-substitution normalizer, fuzzy similarity scoring, and
//! greedy threshold clustering, plus an alternative clustering mode driven by
//! an external geocoding place id.

// Module declarations
pub mod error;
pub mod config;
pub mod mapper;
pub mod normalize;
pub mod scorer;
pub mod cluster;
pub mod group;
pub mod geocode;
pub mod io;
pub mod types;

// Re-exports
pub use error::{Error, Result};
pub use types::{Record, GroupRow};
pub use mapper::SubstitutionTable;
pub use normalize::{Normalizer, NormalizeMode};
pub use scorer::{SimilarityScorer, ScorerKind, WeightedRatioScorer, TokenSetScorer};
pub use cluster::{ClusterEngine, ClusterAssignment, ClusterMode};
pub use group::group_rows;
pub use geocode::{Geocoder, GeocodeResult, GeocodeStatus};

// Re-export the config from config module
pub use config::AdresarConfig;
