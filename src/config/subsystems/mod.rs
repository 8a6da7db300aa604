pub mod normalizer;
pub mod matcher;
pub mod geocode;

pub use normalizer::NormalizerConfig;
pub use matcher::MatcherConfig;
pub use geocode::GeocodeConfig;
