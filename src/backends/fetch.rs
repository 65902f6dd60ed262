//! Organizations API backend
//!
//! Fetches organization documents over HTTP (blocking reqwest) or loads the
//! same JSON shapes from a local file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::error::ExportError;
use crate::core::model::{Document, Organization};

/// Public GSoC organizations API
pub const DEFAULT_API_BASE: &str = "https://api.gsocorganizations.dev";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client settings
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Honor proxy settings from the environment
    pub use_proxy: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            use_proxy: true,
        }
    }
}

/// Which document to load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `{base}/{year}.json`, organizations of one year
    Year(i32),
    /// `{base}/organizations.json`, every organization with all years
    All,
}

/// Thin client over the organizations API
pub struct ApiClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &FetchConfig) -> Result<Self, ExportError> {
        let mut builder = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        if !config.use_proxy {
            builder = builder.no_proxy();
        }

        let client = builder.build().map_err(|source| ExportError::Request {
            url: config.base_url.clone(),
            source,
        })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL serving `endpoint`
    pub fn url(&self, endpoint: Endpoint) -> String {
        match endpoint {
            Endpoint::Year(year) => format!("{}/{}.json", self.base_url, year),
            Endpoint::All => format!("{}/organizations.json", self.base_url),
        }
    }

    /// GET the endpoint and decode its organizations
    pub fn fetch(&self, endpoint: Endpoint) -> Result<Vec<Organization>, ExportError> {
        let url = self.url(endpoint);
        tracing::debug!(url = %url, "Fetching organizations");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| ExportError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url = %url, status = status.as_u16(), "API returned error status");
            return Err(ExportError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(|source| ExportError::Request {
            url: url.clone(),
            source,
        })?;

        let organizations = parse_document(&body, &url)?;
        tracing::info!(url = %url, organizations = organizations.len(), "Fetched organizations");
        Ok(organizations)
    }
}

/// Decode either document shape into organizations
pub fn parse_document(bytes: &[u8], origin: &str) -> Result<Vec<Organization>, ExportError> {
    serde_json::from_slice::<Document>(bytes)
        .map(Document::into_organizations)
        .map_err(|source| ExportError::Decode {
            origin: origin.to_string(),
            source,
        })
}

/// Load organizations from a JSON file on disk
pub fn load_file(path: &Path) -> Result<Vec<Organization>, ExportError> {
    let bytes = std::fs::read(path).map_err(|source| ExportError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;

    let organizations = parse_document(&bytes, &path.display().to_string())?;
    tracing::info!(path = %path.display(), organizations = organizations.len(), "Loaded organizations");
    Ok(organizations)
}

/// Where organization documents come from
pub enum Source {
    Remote(ApiClient),
    /// A saved document; the endpoint is ignored
    Local(PathBuf),
}

impl Source {
    pub fn load(&self, endpoint: Endpoint) -> Result<Vec<Organization>, ExportError> {
        match self {
            Source::Remote(client) => client.fetch(endpoint),
            Source::Local(path) => load_file(path),
        }
    }
}
