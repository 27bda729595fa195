//! Reqwest-backed Nominatim search adapter.
//!
//! This adapter owns transport details only: query construction, identity
//! headers, timeout and HTTP error mapping, and JSON decoding into domain
//! candidates.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::{PlaceDto, into_domain_candidates};
use crate::domain::ports::{GeocodingSource, GeocodingSourceError};
use crate::domain::{GeocodeCandidate, GeocodeQuery};

const DEFAULT_USER_AGENT: &str = "parcel-backend/0.1";
const DEFAULT_LIMIT: u8 = 8;
const DEFAULT_COUNTRY_CODES: &str = "tr";
const DEFAULT_LANGUAGE: &str = "tr";

/// Outbound identity sent with every Nominatim request.
///
/// Nominatim's usage policy asks for an identifying user agent and a
/// contact address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NominatimIdentity {
    /// HTTP user-agent.
    pub user_agent: String,
    /// `From` header value; omitted when `None`.
    pub from_email: Option<String>,
}

impl Default for NominatimIdentity {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            from_email: None,
        }
    }
}

/// Search parameters appended to every query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NominatimQueryOptions {
    /// Maximum number of results.
    pub limit: u8,
    /// Comma-separated ISO 3166-1 alpha-2 codes restricting the search.
    pub country_codes: String,
    /// Preferred language for display names.
    pub language: String,
}

impl Default for NominatimQueryOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            country_codes: DEFAULT_COUNTRY_CODES.to_owned(),
            language: DEFAULT_LANGUAGE.to_owned(),
        }
    }
}

/// Geocoding source that performs HTTP GET requests against one endpoint.
pub struct NominatimHttpSource {
    client: Client,
    endpoint: Url,
    identity: NominatimIdentity,
    options: NominatimQueryOptions,
}

impl NominatimHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        timeout: Duration,
        identity: NominatimIdentity,
        options: NominatimQueryOptions,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            identity,
            options,
        })
    }

    fn query_params(&self, query: &GeocodeQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("format", "json".to_owned()),
            ("addressdetails", "1".to_owned()),
            ("limit", self.options.limit.max(1).to_string()),
        ];
        if !self.options.country_codes.trim().is_empty() {
            params.push(("countrycodes", self.options.country_codes.clone()));
        }
        if !self.options.language.trim().is_empty() {
            params.push(("accept-language", self.options.language.clone()));
        }
        params.push(("q", query.as_str().to_owned()));
        params
    }
}

#[async_trait]
impl GeocodingSource for NominatimHttpSource {
    async fn search(
        &self,
        query: &GeocodeQuery,
    ) -> Result<Vec<GeocodeCandidate>, GeocodingSourceError> {
        let mut request = self
            .client
            .get(self.endpoint.clone())
            .query(&self.query_params(query))
            .header(reqwest::header::USER_AGENT, self.identity.user_agent.as_str())
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(from) = self.identity.from_email.as_deref() {
            request = request.header(reqwest::header::FROM, from);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        let candidates = parse_candidates(body.as_ref())?;
        debug!(results = candidates.len(), "nominatim search completed");
        Ok(candidates)
    }
}

fn parse_candidates(body: &[u8]) -> Result<Vec<GeocodeCandidate>, GeocodingSourceError> {
    let decoded: Vec<PlaceDto> = serde_json::from_slice(body).map_err(|error| {
        GeocodingSourceError::decode(format!("invalid Nominatim JSON payload: {error}"))
    })?;
    into_domain_candidates(decoded).map_err(GeocodingSourceError::decode)
}

fn map_transport_error(error: reqwest::Error) -> GeocodingSourceError {
    if error.is_timeout() {
        GeocodingSourceError::timeout(error.to_string())
    } else {
        GeocodingSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> GeocodingSourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };
    GeocodingSourceError::upstream_status(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
#[path = "http_source_tests.rs"]
mod tests;
