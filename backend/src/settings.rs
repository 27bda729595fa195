//! Process configuration loaded via OrthoConfig.
//!
//! Every value can be set through a `PARCELS_`-prefixed environment variable
//! (for example `PARCELS_DATABASE_URL`), a configuration file, or the command
//! line. Session cookie toggles are read separately; see
//! [`crate::inbound::http::session_config`].

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::nominatim::{NominatimIdentity, NominatimQueryOptions};

const DEFAULT_BIND_PORT: u16 = 8080;
const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
const DEFAULT_NOMINATIM_TIMEOUT_SECS: u64 = 20;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Errors raised when a configured value cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind host '{value}': {source}")]
    BindHost {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid nominatim url '{value}': {source}")]
    NominatimUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

/// Application settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PARCELS")]
pub struct AppSettings {
    /// PostgreSQL connection string. Without it the server keeps accounts and
    /// parcels in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Apply pending schema migrations at start-up. Defaults to `true`.
    pub run_migrations: Option<bool>,
    /// Interface to listen on.
    pub bind_host: Option<String>,
    pub bind_port: Option<u16>,
    /// Geocoder search endpoint.
    pub nominatim_url: Option<String>,
    /// Contact address sent in the `From` header.
    pub nominatim_email: Option<String>,
    pub nominatim_user_agent: Option<String>,
    /// Upper bound on one geocoder round trip.
    pub nominatim_timeout_secs: Option<u64>,
    pub nominatim_limit: Option<u8>,
    /// ISO 3166-1 codes restricting the search. Accepts a list or a
    /// comma-separated string; an empty value disables the filter.
    #[serde(default, deserialize_with = "deserialize_codes")]
    pub nominatim_country_codes: Option<Vec<String>>,
    pub nominatim_language: Option<String>,
}

impl AppSettings {
    /// Address the HTTP server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let ip = match self.bind_host.as_deref() {
            Some(host) => host
                .parse::<IpAddr>()
                .map_err(|source| SettingsError::BindHost {
                    value: host.to_owned(),
                    source,
                })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        Ok(SocketAddr::new(
            ip,
            self.bind_port.unwrap_or(DEFAULT_BIND_PORT),
        ))
    }

    /// Whether start-up applies pending migrations.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    pub fn nominatim_url(&self) -> Result<Url, SettingsError> {
        let raw = self
            .nominatim_url
            .as_deref()
            .unwrap_or(DEFAULT_NOMINATIM_URL);
        Url::parse(raw).map_err(|source| SettingsError::NominatimUrl {
            value: raw.to_owned(),
            source,
        })
    }

    pub fn nominatim_timeout(&self) -> Duration {
        Duration::from_secs(
            self.nominatim_timeout_secs
                .unwrap_or(DEFAULT_NOMINATIM_TIMEOUT_SECS),
        )
    }

    /// Headers identifying this deployment to the geocoder.
    pub fn nominatim_identity(&self) -> NominatimIdentity {
        let defaults = NominatimIdentity::default();
        NominatimIdentity {
            user_agent: self
                .nominatim_user_agent
                .clone()
                .unwrap_or(defaults.user_agent),
            from_email: self.nominatim_email.clone().or(defaults.from_email),
        }
    }

    pub fn nominatim_options(&self) -> NominatimQueryOptions {
        let defaults = NominatimQueryOptions::default();
        NominatimQueryOptions {
            limit: self.nominatim_limit.unwrap_or(defaults.limit),
            country_codes: self
                .nominatim_country_codes
                .as_ref()
                .map_or(defaults.country_codes, |codes| join_codes(codes)),
            language: self
                .nominatim_language
                .clone()
                .unwrap_or(defaults.language),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CodeList {
    One(String),
    Many(Vec<String>),
}

fn deserialize_codes<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<CodeList>::deserialize(deserializer)?;
    Ok(raw.map(|list| match list {
        CodeList::One(joined) => joined.split(',').map(str::to_owned).collect(),
        CodeList::Many(codes) => codes,
    }))
}

fn join_codes(codes: &[String]) -> String {
    codes
        .iter()
        .map(|code| code.trim())
        .filter(|code| !code.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}
