//! Integration tests for Raving Residents.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process router tests (no network, no SMTP)
//! cargo test -p raving-residents-integration-tests
//!
//! # Live tests against a running dashboard
//! DASHBOARD_BASE_URL=http://localhost:3000 \
//!     cargo test -p raving-residents-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `dashboard_routes` - Router tests with in-memory services
//! - `gateway_clients` - HTTP clients against a local stub upstream
//! - `live_dashboard` - Smoke tests against a deployed dashboard (ignored)
//!
//! This library holds the in-memory doubles the tests share.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use secrecy::SecretString;
use url::Url;

use raving_residents_core::{
    BrandColor, Branding, CompanyId, InfoCard, Resident, ResidentId, ServiceId,
};
use raving_residents_dashboard::config::{DashboardConfig, EmailConfig, UpstreamConfig};
use raving_residents_dashboard::gateway::{BrandingDirectory, GatewayError, ResidentDirectory};
use raving_residents_dashboard::services::{MailError, MailTransport, OutboundEmail};
use raving_residents_dashboard::state::AppState;

/// Resident used throughout the tests.
pub const RESIDENT_ID: &str = "123e4567-e89b-42d3-a456-426614174000";

/// Company the sample resident belongs to.
pub const COMPANY_ID: &str = "acme-homes";

/// Build a `ResidentId` from a known-good string.
///
/// # Panics
///
/// Panics if `raw` is not a UUID v4.
#[must_use]
pub fn resident_id(raw: &str) -> ResidentId {
    ResidentId::parse(raw).unwrap_or_else(|e| panic!("bad test resident id {raw}: {e}"))
}

/// The resident behind [`RESIDENT_ID`], with two unlockable services.
#[must_use]
pub fn sample_resident() -> Resident {
    Resident {
        id: resident_id(RESIDENT_ID),
        first_name: "Dana".to_string(),
        last_name: "Reyes".to_string(),
        email: "dana@example.com".to_string(),
        company_id: CompanyId::new(COMPANY_ID),
        available_services: vec![
            ServiceId::new("air-filter"),
            ServiceId::new("credit-building"),
        ],
    }
}

/// Branding for [`COMPANY_ID`].
///
/// # Panics
///
/// Never; the colors are valid literals.
#[must_use]
pub fn sample_branding() -> Branding {
    Branding {
        company_id: CompanyId::new(COMPANY_ID),
        name: "Acme Homes".to_string(),
        logo_src: "https://cdn.example.com/acme/logo.png".to_string(),
        primary_brand_color: BrandColor::parse("#1A73E8")
            .unwrap_or_else(|e| panic!("bad test color: {e}")),
        secondary_brand_color: BrandColor::parse("#fbbc04")
            .unwrap_or_else(|e| panic!("bad test color: {e}")),
    }
}

/// A single info card with a link.
#[must_use]
pub fn sample_info_card() -> InfoCard {
    InfoCard {
        title: "Filter delivery".to_string(),
        body: "Fresh air filters ship every 60 days.".to_string(),
        link_url: Some("https://example.com/filters".to_string()),
        link_text: None,
    }
}

/// In-memory resident directory that counts every call.
#[derive(Debug, Default)]
pub struct FakeResidentDirectory {
    residents: HashMap<String, Resident>,
    info_cards: Vec<InfoCard>,
    unavailable: bool,
    calls: AtomicUsize,
}

impl FakeResidentDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resident, keyed by its id.
    #[must_use]
    pub fn with_resident(mut self, resident: Resident) -> Self {
        self.residents.insert(resident.id.to_string(), resident);
        self
    }

    #[must_use]
    pub fn with_info_cards(mut self, cards: Vec<InfoCard>) -> Self {
        self.info_cards = cards;
        self
    }

    /// Make every call fail as if the service were down.
    #[must_use]
    pub const fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Total calls across both lookups.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(GatewayError::Unavailable(
                "resident service is down".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ResidentDirectory for FakeResidentDirectory {
    async fn lookup_resident(&self, id: &ResidentId) -> Result<Resident, GatewayError> {
        self.check_available()?;
        self.residents
            .get(&id.to_string())
            .cloned()
            .ok_or_else(|| GatewayError::NotFound {
                resource: "Resident",
                id: id.to_string(),
            })
    }

    async fn info_cards(&self) -> Result<Vec<InfoCard>, GatewayError> {
        self.check_available()?;
        Ok(self.info_cards.clone())
    }
}

/// In-memory branding directory that records requested company ids.
#[derive(Debug, Default)]
pub struct FakeBrandingDirectory {
    brands: HashMap<String, Branding>,
    requested: Mutex<Vec<String>>,
}

impl FakeBrandingDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_branding(mut self, branding: Branding) -> Self {
        self.brands
            .insert(branding.company_id.as_str().to_string(), branding);
        self
    }

    /// Company ids looked up so far, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the lock was poisoned by a panicking test.
    pub fn requested(&self) -> Vec<String> {
        self.requested
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl BrandingDirectory for FakeBrandingDirectory {
    async fn lookup_branding(&self, company_id: &CompanyId) -> Result<Branding, GatewayError> {
        self.requested
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(company_id.as_str().to_string());

        self.brands
            .get(company_id.as_str())
            .cloned()
            .ok_or_else(|| GatewayError::NotFound {
                resource: "Branding",
                id: company_id.as_str().to_string(),
            })
    }
}

/// Mail transport that keeps every email instead of sending it.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutboundEmail>>,
    failure: Option<String>,
}

impl RecordingMailer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every message with `message`.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            sent: Mutex::default(),
            failure: Some(message.into()),
        }
    }

    /// Emails accepted so far, in send order.
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl MailTransport for RecordingMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<String, MailError> {
        if let Some(message) = &self.failure {
            return Err(MailError::Rejected(message.clone()));
        }

        self.sent
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(email.clone());
        Ok(format!("<{}@test.local>", uuid::Uuid::new_v4()))
    }
}

/// Configuration pointing at unroutable upstreams; tests never use them.
///
/// # Panics
///
/// Never; the URLs are valid literals.
#[must_use]
pub fn test_config() -> DashboardConfig {
    let upstream_url =
        Url::parse("http://127.0.0.1:9/").unwrap_or_else(|e| panic!("bad test url: {e}"));

    DashboardConfig {
        host: [127, 0, 0, 1].into(),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        upstream: UpstreamConfig {
            resident_service_url: upstream_url.clone(),
            branding_service_url: upstream_url,
            access_token: None,
        },
        email: EmailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 587,
            smtp_username: "test".to_string(),
            smtp_password: SecretString::from("test-password".to_string()),
            from_address: "no-reply@secondnature.com".to_string(),
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// Handles to the doubles behind a [`TestApp`].
pub struct TestApp {
    pub state: AppState,
    pub residents: Arc<FakeResidentDirectory>,
    pub brands: Arc<FakeBrandingDirectory>,
    pub mailer: Arc<RecordingMailer>,
}

impl TestApp {
    /// Wire the given doubles into application state.
    #[must_use]
    pub fn new(
        residents: FakeResidentDirectory,
        brands: FakeBrandingDirectory,
        mailer: RecordingMailer,
    ) -> Self {
        let residents = Arc::new(residents);
        let brands = Arc::new(brands);
        let mailer = Arc::new(mailer);

        let state = AppState::with_services(
            test_config(),
            residents.clone(),
            brands.clone(),
            mailer.clone(),
        );

        Self {
            state,
            residents,
            brands,
            mailer,
        }
    }

    /// The sample resident, their branding, one info card and a working mailer.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(
            FakeResidentDirectory::new()
                .with_resident(sample_resident())
                .with_info_cards(vec![sample_info_card()]),
            FakeBrandingDirectory::new().with_branding(sample_branding()),
            RecordingMailer::new(),
        )
    }

    /// The full router with its middleware stack.
    #[must_use]
    pub fn router(&self) -> axum::Router {
        raving_residents_dashboard::routes::app(self.state.clone())
    }
}
