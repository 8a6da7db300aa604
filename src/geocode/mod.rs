use log::debug;
use serde::Deserialize;

use crate::error::Result;

/// Lookup status reported by the geocoding collaborator. Any status other
/// than `Ok` means no formatted address or place id is available, and the
/// status string itself becomes part of the fallback cluster key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeocodeStatus {
    Ok,
    ZeroResults,
    OverDailyLimit,
    OverQueryLimit,
    RequestDenied,
    InvalidRequest,
    UnknownError,
}

impl GeocodeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeocodeStatus::Ok => "OK",
            GeocodeStatus::ZeroResults => "ZERO_RESULTS",
            GeocodeStatus::OverDailyLimit => "OVER_DAILY_LIMIT",
            GeocodeStatus::OverQueryLimit => "OVER_QUERY_LIMIT",
            GeocodeStatus::RequestDenied => "REQUEST_DENIED",
            GeocodeStatus::InvalidRequest => "INVALID_REQUEST",
            GeocodeStatus::UnknownError => "UNKNOWN_ERROR",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "OK" => Self::Ok,
            "ZERO_RESULTS" => Self::ZeroResults,
            "OVER_DAILY_LIMIT" => Self::OverDailyLimit,
            "OVER_QUERY_LIMIT" => Self::OverQueryLimit,
            "REQUEST_DENIED" => Self::RequestDenied,
            "INVALID_REQUEST" => Self::InvalidRequest,
            _ => Self::UnknownError,
        }
    }
}

/// Outcome of resolving one address. `status == Ok` implies both fields are
/// present; any other status implies both are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeResult {
    pub formatted_address: Option<String>,
    pub place_id: Option<String>,
    pub status: GeocodeStatus,
}

/// Injected capability for resolving raw addresses to place identifiers.
/// Substitutable with a deterministic stub in tests; retry and timeout
/// policy belong to the implementation, not the core.
pub trait Geocoder {
    fn resolve(&self, address: &str) -> Result<GeocodeResult>;
}

pub const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResponseResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponseResult {
    formatted_address: String,
    place_id: String,
}

/// Google Geocoding API client. The API key is a construction parameter;
/// reading it from the process environment is the caller's job.
pub struct GoogleGeocoder {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
}

impl GoogleGeocoder {
    pub fn new<E: Into<String>, K: Into<String>>(endpoint: E, api_key: K) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

impl Geocoder for GoogleGeocoder {
    fn resolve(&self, address: &str) -> Result<GeocodeResult> {
        let response: GeocodeResponse = self
            .client
            .get(&self.endpoint)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()?
            .json()?;

        let status = GeocodeStatus::from_str(&response.status);
        debug!("Geocoded '{}' with status {}", address, status.as_str());

        match (status, response.results.into_iter().next()) {
            (GeocodeStatus::Ok, Some(first)) => Ok(GeocodeResult {
                formatted_address: Some(first.formatted_address),
                place_id: Some(first.place_id),
                status,
            }),
            // OK with an empty result list should not happen, but fold it
            // into the unknown-error shape rather than panic
            (GeocodeStatus::Ok, None) => Ok(GeocodeResult {
                formatted_address: None,
                place_id: None,
                status: GeocodeStatus::UnknownError,
            }),
            (status, _) => Ok(GeocodeResult {
                formatted_address: None,
                place_id: None,
                status,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            GeocodeStatus::Ok,
            GeocodeStatus::ZeroResults,
            GeocodeStatus::OverDailyLimit,
            GeocodeStatus::OverQueryLimit,
            GeocodeStatus::RequestDenied,
            GeocodeStatus::InvalidRequest,
            GeocodeStatus::UnknownError,
        ] {
            assert_eq!(GeocodeStatus::from_str(status.as_str()), status);
        }
    }

    #[test]
    fn test_unrecognized_status_is_unknown() {
        assert_eq!(
            GeocodeStatus::from_str("SOMETHING_NEW"),
            GeocodeStatus::UnknownError
        );
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{
            "status": "OK",
            "results": [
                {"formatted_address": "ul. Shipka 34, Sofia, Bulgaria", "place_id": "ChIJx"}
            ]
        }"#;
        let parsed: GeocodeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.status, "OK");
        assert_eq!(parsed.results[0].place_id, "ChIJx");
    }

    #[test]
    fn test_zero_results_response_parsing() {
        let body = r#"{"status": "ZERO_RESULTS", "results": []}"#;
        let parsed: GeocodeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            GeocodeStatus::from_str(&parsed.status),
            GeocodeStatus::ZeroResults
        );
        assert!(parsed.results.is_empty());
    }
}
