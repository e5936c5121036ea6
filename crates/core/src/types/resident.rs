//! Resident records served by the resident data service.

use serde::{Deserialize, Serialize};

use super::id::{CompanyId, ResidentId, ServiceId};

/// A resident of a managed property.
///
/// Read-only here; the resident data service owns these records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resident {
    pub id: ResidentId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company_id: CompanyId,
    #[serde(default)]
    pub available_services: Vec<ServiceId>,
}

impl Resident {
    /// First and last name joined by a single space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Number of services the resident can still unlock.
    #[must_use]
    pub fn service_count(&self) -> usize {
        self.available_services.len()
    }
}
