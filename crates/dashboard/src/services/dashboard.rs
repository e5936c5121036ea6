//! Dashboard page composition.
//!
//! Validation happens before any upstream call. Resident data and info cards
//! are fetched together; branding follows because it is keyed by the
//! resident's company.

use tracing::instrument;

use raving_residents_core::{Branding, InfoCard, Resident, ResidentId};

use crate::error::Result;
use crate::gateway::{BrandingDirectory, ResidentDirectory};

/// Everything the dashboard page needs, fetched for one request.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub resident_id: ResidentId,
    pub resident: Resident,
    pub branding: Branding,
    pub info_cards: Vec<InfoCard>,
}

/// Validate `raw_id` and fetch the data for its dashboard.
///
/// Any failure fails the whole page; there is no partial render and no retry.
///
/// # Errors
///
/// Returns `AppError::InvalidResidentId` without calling either directory if
/// `raw_id` is not a UUID v4, or `AppError::Gateway` if any lookup fails.
#[instrument(skip(residents, brands))]
pub async fn compose_dashboard(
    residents: &dyn ResidentDirectory,
    brands: &dyn BrandingDirectory,
    raw_id: &str,
) -> Result<DashboardView> {
    let resident_id = ResidentId::parse(raw_id)?;

    let (resident, info_cards) = tokio::try_join!(
        residents.lookup_resident(&resident_id),
        residents.info_cards()
    )?;

    let branding = brands.lookup_branding(&resident.company_id).await?;

    tracing::debug!(
        company_id = %resident.company_id,
        services = resident.service_count(),
        info_cards = info_cards.len(),
        "Dashboard data loaded"
    );

    Ok(DashboardView {
        resident_id,
        resident,
        branding,
        info_cards,
    })
}
