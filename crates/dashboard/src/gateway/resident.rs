//! Resident data service client.

use async_trait::async_trait;
use tracing::instrument;

use raving_residents_core::{InfoCard, Resident, ResidentId};

use super::{GatewayError, ResidentDirectory, ServiceHttp};
use crate::config::UpstreamConfig;

/// Client for the resident data service.
#[derive(Clone)]
pub struct ResidentServiceClient {
    http: ServiceHttp,
}

impl ResidentServiceClient {
    /// Create a new resident data service client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &UpstreamConfig) -> Result<Self, GatewayError> {
        Ok(Self {
            http: ServiceHttp::new(
                config.resident_service_url.clone(),
                config.access_token.clone(),
            )?,
        })
    }
}

#[async_trait]
impl ResidentDirectory for ResidentServiceClient {
    #[instrument(skip(self), fields(resident_id = %id))]
    async fn lookup_resident(&self, id: &ResidentId) -> Result<Resident, GatewayError> {
        let id = id.to_string();
        let url = self.http.endpoint(&["residents", &id])?;
        self.http.get_json(url, "resident", &id).await
    }

    #[instrument(skip(self))]
    async fn info_cards(&self) -> Result<Vec<InfoCard>, GatewayError> {
        let url = self.http.endpoint(&["info-cards"])?;
        self.http.get_json(url, "info cards", "").await
    }
}
