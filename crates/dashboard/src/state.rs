//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::gateway::{
    BrandingClient, BrandingDirectory, GatewayError, ResidentDirectory, ResidentServiceClient,
};
use crate::services::{MailError, MailTransport, SmtpMailer};

/// Error building the application state from configuration.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("upstream client error: {0}")]
    Gateway(#[from] GatewayError),
    #[error("mail transport error: {0}")]
    Mail(#[from] MailError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// configuration and the upstream service clients.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DashboardConfig,
    residents: Arc<dyn ResidentDirectory>,
    brands: Arc<dyn BrandingDirectory>,
    mailer: Arc<dyn MailTransport>,
}

impl AppState {
    /// Create the application state with HTTP and SMTP clients built from
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client or the SMTP transport cannot be built.
    pub fn new(config: DashboardConfig) -> Result<Self, StateError> {
        let residents = Arc::new(ResidentServiceClient::new(&config.upstream)?);
        let brands = Arc::new(BrandingClient::new(&config.upstream)?);
        let mailer = Arc::new(SmtpMailer::new(&config.email)?);

        Ok(Self::with_services(config, residents, brands, mailer))
    }

    /// Create the application state around existing service implementations.
    #[must_use]
    pub fn with_services(
        config: DashboardConfig,
        residents: Arc<dyn ResidentDirectory>,
        brands: Arc<dyn BrandingDirectory>,
        mailer: Arc<dyn MailTransport>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                residents,
                brands,
                mailer,
            }),
        }
    }

    /// Get a reference to the dashboard configuration.
    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    /// Get the resident data service.
    #[must_use]
    pub fn residents(&self) -> &dyn ResidentDirectory {
        self.inner.residents.as_ref()
    }

    /// Get the branding service.
    #[must_use]
    pub fn brands(&self) -> &dyn BrandingDirectory {
        self.inner.brands.as_ref()
    }

    /// Get the outbound mail transport.
    #[must_use]
    pub fn mailer(&self) -> &dyn MailTransport {
        self.inner.mailer.as_ref()
    }
}
