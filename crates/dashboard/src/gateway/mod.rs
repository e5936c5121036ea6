//! Clients for the resident data and branding services.
//!
//! # Architecture
//!
//! - Both services are the source of truth - NO local copies, direct API calls
//! - Each lookup is a single JSON `GET`; no retries, no caching across requests
//! - Handlers depend on the [`ResidentDirectory`] and [`BrandingDirectory`]
//!   traits so tests can swap in in-memory implementations
//!
//! # Endpoints
//!
//! ```text
//! GET {RESIDENT_SERVICE_URL}/residents/{id}
//! GET {RESIDENT_SERVICE_URL}/info-cards
//! GET {BRANDING_SERVICE_URL}/companies/{company_id}/branding
//! ```

mod branding;
mod resident;

pub use branding::BrandingClient;
pub use resident::ResidentServiceClient;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use raving_residents_core::{Branding, CompanyId, InfoCard, Resident, ResidentId};

/// Errors that can occur when calling an upstream data service.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The service has no record for the requested key.
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The service could not be reached or refused to serve the request.
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl GatewayError {
    /// Whether the failure means the record does not exist, as opposed to the
    /// service being unavailable.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Resident profile and dashboard content lookups.
#[async_trait]
pub trait ResidentDirectory: Send + Sync {
    /// Fetch a resident by identifier.
    async fn lookup_resident(&self, id: &ResidentId) -> Result<Resident, GatewayError>;

    /// Fetch the informational cards shown on every dashboard.
    async fn info_cards(&self) -> Result<Vec<InfoCard>, GatewayError>;
}

/// Company branding lookups.
#[async_trait]
pub trait BrandingDirectory: Send + Sync {
    /// Fetch display branding for a company.
    async fn lookup_branding(&self, company_id: &CompanyId) -> Result<Branding, GatewayError>;
}

/// Shared JSON-over-HTTP plumbing for both service clients.
#[derive(Clone)]
struct ServiceHttp {
    client: reqwest::Client,
    base_url: Url,
    access_token: Option<SecretString>,
}

impl ServiceHttp {
    fn new(base_url: Url, access_token: Option<SecretString>) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("raving-residents/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            access_token,
        })
    }

    /// Build `{base_url}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| GatewayError::Parse(format!("cannot-be-a-base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET` a JSON document.
    ///
    /// `resource` and `id` only label the `NotFound` error.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        resource: &'static str,
        id: &str,
    ) -> Result<T, GatewayError> {
        let mut request = self.client.get(url).header("Accept", "application/json");
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound {
                resource,
                id: id.to_owned(),
            });
        }

        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                resource,
                body = %body.chars().take(500).collect::<String>(),
                "Upstream service returned non-success status"
            );
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                resource,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse upstream response"
            );
            GatewayError::Parse(e.to_string())
        })
    }
}
