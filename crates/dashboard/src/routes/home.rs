//! Dashboard page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;

use raving_residents_core::{Branding, InfoCard, ServiceId};

use crate::error::{Result, set_sentry_resident};
use crate::middleware::{ResidentIdSource, ResolvedResident, remember_resident};
use crate::services::compose_dashboard;
use crate::state::AppState;

/// Service display data for templates.
#[derive(Debug, Clone)]
pub struct ServiceView {
    pub id: String,
    pub label: String,
}

impl From<&ServiceId> for ServiceView {
    fn from(service: &ServiceId) -> Self {
        Self {
            id: service.as_str().to_string(),
            label: humanize(service.as_str()),
        }
    }
}

/// Turn a service id like `air-filter` into `Air Filter`.
fn humanize(id: &str) -> String {
    id.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub first_name: String,
    /// Number of services the resident can still unlock.
    pub service_count: usize,
    pub services: Vec<ServiceView>,
    pub info_cards: Vec<InfoCard>,
    pub branding: Branding,
}

/// Display the resident dashboard.
///
/// GET /?userId={uuid}
///
/// Falls back to the resident remembered in the session when `userId` is
/// absent. A query-supplied id is remembered once the page renders.
#[instrument(skip(state, session))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    resolved: ResolvedResident,
) -> Result<HomeTemplate> {
    let view = compose_dashboard(state.residents(), state.brands(), &resolved.raw_id).await?;

    set_sentry_resident(&view.resident_id);

    if resolved.source == ResidentIdSource::Query
        && let Err(e) = remember_resident(&session, &view.resident_id).await
    {
        tracing::warn!(error = %e, "Failed to remember resident in session");
    }

    let resident = view.resident;
    Ok(HomeTemplate {
        service_count: resident.service_count(),
        services: resident
            .available_services
            .iter()
            .map(ServiceView::from)
            .collect(),
        first_name: resident.first_name,
        info_cards: view.info_cards,
        branding: view.branding,
    })
}
