use std::collections::BTreeSet;

use serde::{Serialize, Deserialize};
use strsim::normalized_levenshtein;

/// The SimilarityScorer trait defines the interface for comparing two
/// canonical addresses. Scores are integers between 0 (completely different)
/// and 100 (identical). Both provided implementations are symmetric:
/// `score(a, b) == score(b, a)`.
pub trait SimilarityScorer {
    /// Returns which scoring strategy this scorer implements
    fn kind(&self) -> ScorerKind;

    /// Compares two canonical address strings
    fn score(&self, a: &str, b: &str) -> u8;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScorerKind {
    Weighted,
    TokenSet,
}

impl ScorerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScorerKind::Weighted => "weighted",
            ScorerKind::TokenSet => "token_set",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim_matches('"').to_lowercase().as_str() {
            "weighted" => Some(Self::Weighted),
            "token_set" => Some(Self::TokenSet),
            _ => None,
        }
    }

    /// Factory for scorer instances
    pub fn create(&self) -> Box<dyn SimilarityScorer> {
        match self {
            ScorerKind::Weighted => Box::new(WeightedRatioScorer::new()),
            ScorerKind::TokenSet => Box::new(TokenSetScorer::new()),
        }
    }
}

impl Default for ScorerKind {
    fn default() -> Self {
        Self::Weighted
    }
}

/// Composite length-aware scorer. Computes a base character ratio, then:
/// when the longer string is more than 1.5x the shorter, substring-aware
/// partial ratios are preferred, scaled by 0.9 (0.6 beyond 8x) so that only
/// full matches can reach 100; otherwise token-order-insensitive ratios
/// (token-sort, token-set) scaled by 0.95 are considered. The final score is
/// the rounded maximum of the ratios for that branch.
pub struct WeightedRatioScorer;

impl WeightedRatioScorer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WeightedRatioScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityScorer for WeightedRatioScorer {
    fn kind(&self) -> ScorerKind {
        ScorerKind::Weighted
    }

    fn score(&self, a: &str, b: &str) -> u8 {
        let p1 = full_process(a);
        let p2 = full_process(b);
        if p1.is_empty() || p2.is_empty() {
            return 0;
        }

        let len1 = p1.chars().count() as f64;
        let len2 = p2.chars().count() as f64;
        let len_ratio = len1.max(len2) / len1.min(len2);

        let base = ratio(&p1, &p2);

        let best = if len_ratio > 1.5 {
            // Substring-aware comparisons, scaled down so pure containment
            // cannot reach a perfect score
            let partial_scale = if len_ratio > 8.0 { 0.6 } else { 0.9 };
            let partial = partial_ratio(&p1, &p2) * partial_scale;
            let ptsort = partial_token_sort_ratio(&p1, &p2) * 0.95 * partial_scale;
            let ptset = partial_token_set_ratio(&p1, &p2) * 0.95 * partial_scale;
            base.max(partial).max(ptsort).max(ptset)
        } else {
            let tsort = token_sort_ratio(&p1, &p2) * 0.95;
            let tset = token_set_ratio(&p1, &p2) * 0.95;
            base.max(tsort).max(tset)
        };

        best.round() as u8
    }
}

/// Single-strategy scorer: token-set ratio only, no length-based branching
/// or scaling.
pub struct TokenSetScorer;

impl TokenSetScorer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TokenSetScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityScorer for TokenSetScorer {
    fn kind(&self) -> ScorerKind {
        ScorerKind::TokenSet
    }

    fn score(&self, a: &str, b: &str) -> u8 {
        let p1 = full_process(a);
        let p2 = full_process(b);
        if p1.is_empty() || p2.is_empty() {
            return 0;
        }
        token_set_ratio(&p1, &p2).round() as u8
    }
}

/// Lowercase, replace every non-alphanumeric character with a space, and
/// collapse the result to single-spaced trimmed tokens. Both scorers see
/// addresses through this lens, so commas and hyphens act as token breaks.
fn full_process(s: &str) -> String {
    let replaced: String = s
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Character similarity in 0..=100 based on normalized Levenshtein distance.
fn ratio(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b) * 100.0
}

/// Best ratio of the shorter string against every equally long character
/// window of the longer one.
fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };

    let short_len = short.chars().count();
    if short_len == 0 {
        return 0.0;
    }
    let long_chars: Vec<char> = long.chars().collect();
    if short_len >= long_chars.len() {
        return ratio(short, long);
    }

    let mut best = 0.0f64;
    for start in 0..=(long_chars.len() - short_len) {
        let window: String = long_chars[start..start + short_len].iter().collect();
        best = best.max(ratio(short, &window));
        if best >= 100.0 {
            break;
        }
    }
    best
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

fn partial_token_sort_ratio(a: &str, b: &str) -> f64 {
    partial_ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Token-set comparison: factor out the tokens common to both strings and
/// compare the sorted combinations of the remainder, taking the best of the
/// three pairings.
fn token_set(a: &str, b: &str, cmp: fn(&str, &str) -> f64) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    // BTreeSet iteration is already lexicographically sorted
    let sect: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let diff_ab: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let diff_ba: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    let sect_str = sect.join(" ");
    let combined_a = join_nonempty(&sect_str, &diff_ab.join(" "));
    let combined_b = join_nonempty(&sect_str, &diff_ba.join(" "));

    cmp(&sect_str, &combined_a)
        .max(cmp(&sect_str, &combined_b))
        .max(cmp(&combined_a, &combined_b))
}

fn join_nonempty(left: &str, right: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, _) => right.to_string(),
        (_, true) => left.to_string(),
        _ => format!("{} {}", left, right),
    }
}

fn token_set_ratio(a: &str, b: &str) -> f64 {
    token_set(a, b, ratio)
}

fn partial_token_set_ratio(a: &str, b: &str) -> f64 {
    token_set(a, b, partial_ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings_score_100() {
        let scorer = WeightedRatioScorer::new();
        assert_eq!(
            scorer.score("st shipka 34,sofia,bulgaria", "st shipka 34,sofia,bulgaria"),
            100
        );
    }

    #[test]
    fn test_empty_strings_score_0() {
        let scorer = WeightedRatioScorer::new();
        assert_eq!(scorer.score("", ""), 0);
        assert_eq!(scorer.score("sofia", ""), 0);
    }

    #[test]
    fn test_symmetry() {
        let a = "st shipka 34,1000 sofia,bulgaria";
        let b = "shipka st 34,sofia,bulgaria";
        let weighted = WeightedRatioScorer::new();
        assert_eq!(weighted.score(a, b), weighted.score(b, a));
        let token_set = TokenSetScorer::new();
        assert_eq!(token_set.score(a, b), token_set.score(b, a));
    }

    #[test]
    fn test_postal_code_variant_scores_high() {
        let scorer = WeightedRatioScorer::new();
        let score = scorer.score(
            "st shipka 34,1000 sofia,bulgaria",
            "st shipka 34,sofia,bulgaria",
        );
        assert!(score >= 90, "score was {}", score);
    }

    #[test]
    fn test_reordered_tokens_score_high() {
        let scorer = WeightedRatioScorer::new();
        let score = scorer.score(
            "st shipka 34,1000 sofia,bulgaria",
            "shipka st 34,sofia,bulgaria",
        );
        assert!(score >= 90, "score was {}", score);
    }

    #[test]
    fn test_unrelated_addresses_score_low() {
        let scorer = WeightedRatioScorer::new();
        let score = scorer.score(
            "st shipka 34,1000 sofia,bulgaria",
            "konrad-adenauer-straße 7,60313 frankfurt am main,germany",
        );
        assert!(score < 90, "score was {}", score);
    }

    #[test]
    fn test_district_expansion_scores_high() {
        let scorer = WeightedRatioScorer::new();
        let score = scorer.score(
            "1 guanghua road,beijing,china 100020",
            "1 guanghua road,chaoyang district,beijing,china 100020",
        );
        assert!(score >= 90, "score was {}", score);
    }

    #[test]
    fn test_extreme_length_gap_is_suppressed() {
        let scorer = WeightedRatioScorer::new();
        // The short string is contained verbatim, but a 9x length gap caps
        // the partial ratios at 60 percent
        let long = "sofia sofia sofia sofia sofia sofia sofia sofia sofia";
        let score = scorer.score("sofia", long);
        assert!(score <= 60, "score was {}", score);
    }

    #[test]
    fn test_token_set_scorer_ignores_repeats_and_order() {
        let scorer = TokenSetScorer::new();
        assert_eq!(
            scorer.score("sofia bulgaria 34", "34 bulgaria sofia"),
            100
        );
    }

    #[test]
    fn test_full_process_strips_punctuation() {
        assert_eq!(
            full_process("st shipka 34,1000 sofia,bulgaria"),
            "st shipka 34 1000 sofia bulgaria"
        );
        assert_eq!(full_process("Konrad-Adenauer-Straße 7"), "konrad adenauer straße 7");
    }

    #[test]
    fn test_partial_ratio_finds_substring() {
        assert_eq!(partial_ratio("sofia", "xx sofia yy"), 100.0);
    }
}
