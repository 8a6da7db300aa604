use serde::{Serialize, Deserialize};

/// One input record: a display name and the free-text address it was entered
/// with. Field names match the expected CSV header columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Address")]
    pub address: String,
}

impl Record {
    pub fn new<N: Into<String>, A: Into<String>>(name: N, address: A) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// One output row: the cluster key and the sorted, comma-joined display names
/// of every record assigned to that cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRow {
    pub key: String,
    pub names: String,
}
