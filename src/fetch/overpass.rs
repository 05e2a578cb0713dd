//! Reqwest-backed Overpass client with ordered multi-server fallback

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use url::Url;

use super::dto::OverpassResponse;
use super::{GeodataSource, RawAmenity, RawWay};
use crate::error::FetchError;
use crate::model::BoundingBox;

/// Public Overpass endpoints, tried in order
pub const DEFAULT_ENDPOINTS: [&str; 3] = [
    "https://overpass-api.de/api/interpreter",
    "https://overpass.kumi.systems/api/interpreter",
    "https://maps.mail.ru/osm/tools/overpass/api/interpreter",
];

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("mapdigest/", env!("CARGO_PKG_VERSION"));

/// Overpass query client. Every request is tried against the configured
/// endpoints in order with a bounded per-server timeout; the fetch fails
/// only once all endpoints are exhausted.
pub struct OverpassClient {
    client: Client,
    endpoints: Vec<Url>,
}

impl OverpassClient {
    /// Client over the default public endpoints
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new() -> Result<Self, FetchError> {
        let endpoints = DEFAULT_ENDPOINTS
            .iter()
            .map(|endpoint| Url::parse(endpoint))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Self::with_endpoints(endpoints, DEFAULT_TIMEOUT)
    }

    /// Client over an explicit endpoint list and per-server timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn with_endpoints(endpoints: Vec<Url>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self { client, endpoints })
    }

    async fn query(&self, query: &str) -> Result<OverpassResponse, FetchError> {
        for endpoint in &self.endpoints {
            match self.query_endpoint(endpoint, query).await {
                Ok(response) => return Ok(response),
                Err(e) => warn!("Geodata server {endpoint} failed: {e}"),
            }
        }
        Err(FetchError::ServersExhausted(self.endpoints.len()))
    }

    async fn query_endpoint(
        &self,
        endpoint: &Url,
        query: &str,
    ) -> Result<OverpassResponse, FetchError> {
        let response = self
            .client
            .post(endpoint.clone())
            .form(&[("data", query)])
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl GeodataSource for OverpassClient {
    async fn fetch_streets(&self, bbox: &BoundingBox) -> Result<Vec<RawWay>, FetchError> {
        let response = self.query(&street_query(bbox)).await?;
        let ways = response.into_ways();
        debug!("Fetched {} street ways", ways.len());
        Ok(ways)
    }

    async fn fetch_amenities(&self, bbox: &BoundingBox) -> Result<Vec<RawAmenity>, FetchError> {
        let response = self.query(&amenity_query(bbox)).await?;
        let amenities = response.into_amenities();
        debug!("Fetched {} amenity features", amenities.len());
        Ok(amenities)
    }
}

/// `(south,west,north,east)` clause of an Overpass QL statement
fn bbox_clause(bbox: &BoundingBox) -> String {
    format!(
        "({},{},{},{})",
        bbox.lat_min, bbox.lon_min, bbox.lat_max, bbox.lon_max
    )
}

fn street_query(bbox: &BoundingBox) -> String {
    let bounds = bbox_clause(bbox);
    // `>` recurses down to the member nodes so ways arrive with a
    // resolvable node table.
    format!("[out:json][timeout:25];way[\"highway\"]{bounds};(._;>;);out body;")
}

fn amenity_query(bbox: &BoundingBox) -> String {
    let bounds = bbox_clause(bbox);
    let mut lines = Vec::new();
    for tag in ["amenity", "building"] {
        for element in ["node", "way", "relation"] {
            lines.push(format!("  {element}[\"{tag}\"]{bounds};"));
        }
    }
    format!(
        "[out:json][timeout:25];(\n{}\n);out center;",
        lines.join("\n")
    )
}
