//! Branding service client.

use async_trait::async_trait;
use tracing::instrument;

use raving_residents_core::{Branding, CompanyId};

use super::{BrandingDirectory, GatewayError, ServiceHttp};
use crate::config::UpstreamConfig;

/// Client for the company branding service.
#[derive(Clone)]
pub struct BrandingClient {
    http: ServiceHttp,
}

impl BrandingClient {
    /// Create a new branding service client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &UpstreamConfig) -> Result<Self, GatewayError> {
        Ok(Self {
            http: ServiceHttp::new(
                config.branding_service_url.clone(),
                config.access_token.clone(),
            )?,
        })
    }
}

#[async_trait]
impl BrandingDirectory for BrandingClient {
    #[instrument(skip(self), fields(company_id = %company_id))]
    async fn lookup_branding(&self, company_id: &CompanyId) -> Result<Branding, GatewayError> {
        let url = self
            .http
            .endpoint(&["companies", company_id.as_str(), "branding"])?;
        self.http
            .get_json(url, "branding", company_id.as_str())
            .await
    }
}
