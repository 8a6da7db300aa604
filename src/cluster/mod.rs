use ahash::AHashMap;
use log::{debug, info};
use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::geocode::{Geocoder, GeocodeStatus};
use crate::scorer::SimilarityScorer;
use crate::types::Record;

/// How cluster keys are obtained: computed by fuzzy similarity against
/// cluster representatives, or supplied by an external geocoding lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClusterMode {
    Similarity,
    Geocode,
}

impl ClusterMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterMode::Similarity => "similarity",
            ClusterMode::Geocode => "geocode",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim_matches('"').to_lowercase().as_str() {
            "similarity" => Some(Self::Similarity),
            "geocode" => Some(Self::Geocode),
            _ => None,
        }
    }
}

impl Default for ClusterMode {
    fn default() -> Self {
        Self::Similarity
    }
}

/// One cluster: the representative is always the first-seen member and is
/// itself contained in `members`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub representative: String,
    pub members: Vec<String>,
}

/// The total mapping from every encountered address to its cluster key.
/// Built once per run, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ClusterAssignment {
    clusters: Vec<Cluster>,
    by_address: AHashMap<String, usize>,
}

impl ClusterAssignment {
    /// The cluster key for an address: its representative (similarity mode)
    /// or external key (geocode mode). `None` only for addresses that were
    /// never clustered.
    pub fn key_for(&self, address: &str) -> Option<&str> {
        self.by_address
            .get(address)
            .map(|&idx| self.clusters[idx].representative.as_str())
    }

    /// Clusters in creation order.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    fn contains(&self, address: &str) -> bool {
        self.by_address.contains_key(address)
    }

    fn assign(&mut self, address: &str, cluster_idx: usize) {
        self.clusters[cluster_idx].members.push(address.to_string());
        self.by_address.insert(address.to_string(), cluster_idx);
    }

    fn new_cluster(&mut self, key: &str, member: &str) -> usize {
        let idx = self.clusters.len();
        self.clusters.push(Cluster {
            representative: key.to_string(),
            members: vec![member.to_string()],
        });
        self.by_address.insert(member.to_string(), idx);
        idx
    }
}

/// Assigns every unique canonical address to exactly one cluster by greedy
/// first-match comparison against existing cluster representatives.
///
/// The clustering is single-link and non-transitive: if A matches B and B
/// matches C but A does not match C directly, A and C share a cluster only
/// because B was compared first. The result depends on input order, which is
/// a documented property of the algorithm, not a defect.
pub struct ClusterEngine {
    scorer: Box<dyn SimilarityScorer>,
    threshold: u8,
}

impl ClusterEngine {
    pub fn new(scorer: Box<dyn SimilarityScorer>, threshold: u8) -> Self {
        Self { scorer, threshold }
    }

    /// Cluster addresses in input order. Later repeats of an already assigned
    /// address are skipped; an address equal to an existing representative
    /// joins that cluster without scoring; otherwise representatives are
    /// scanned in creation order and the first one at or above the threshold
    /// wins. No match starts a new cluster.
    pub fn cluster<'a, I>(&self, addresses: I) -> ClusterAssignment
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut assignment = ClusterAssignment::default();

        for address in addresses {
            if assignment.contains(address) {
                continue;
            }

            let matched = (0..assignment.clusters.len()).find(|&idx| {
                let representative = assignment.clusters[idx].representative.as_str();
                representative == address
                    || self.scorer.score(representative, address) >= self.threshold
            });

            match matched {
                Some(idx) => {
                    debug!(
                        "Assigned '{}' to cluster of '{}'",
                        address, assignment.clusters[idx].representative
                    );
                    assignment.assign(address, idx);
                }
                None => {
                    assignment.new_cluster(address, address);
                }
            }
        }

        info!(
            "Formed {} clusters from {} unique addresses",
            assignment.len(),
            assignment.by_address.len()
        );
        assignment
    }
}

/// Alternative clustering mode: the cluster key for each unique address is
/// resolved by an external geocoding lookup instead of computed similarity.
/// A non-OK lookup status is not an error; the failing address keeps a key
/// of the form `STATUS:address`, so it forms its own singleton cluster
/// rather than being dropped. Transport-level failures propagate to the
/// caller.
pub fn cluster_by_key(records: &[Record], geocoder: &dyn Geocoder) -> Result<ClusterAssignment> {
    let mut assignment = ClusterAssignment::default();
    let mut key_index: AHashMap<String, usize> = AHashMap::new();

    for record in records {
        let address = record.address.as_str();
        if assignment.contains(address) {
            continue;
        }

        let resolved = geocoder.resolve(address)?;
        let key = match (resolved.status, resolved.place_id) {
            (GeocodeStatus::Ok, Some(place_id)) => place_id,
            (status, _) => format!("{}:{}", status.as_str(), address),
        };

        match key_index.get(&key) {
            Some(&idx) => assignment.assign(address, idx),
            None => {
                let idx = assignment.new_cluster(&key, address);
                key_index.insert(key, idx);
            }
        }
    }

    info!(
        "Resolved {} unique addresses into {} geocoded clusters",
        assignment.by_address.len(),
        assignment.len()
    );
    Ok(assignment)
}
