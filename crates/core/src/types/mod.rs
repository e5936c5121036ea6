//! Core types for the resident dashboard.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod branding;
pub mod id;
pub mod info_card;
pub mod install_date;
pub mod resident;

pub use branding::{BrandColor, BrandColorError, Branding};
pub use id::{CompanyId, ResidentId, ResidentIdError, ServiceId};
pub use info_card::InfoCard;
pub use install_date::{InstallDateError, InstallDateSelection};
pub use resident::Resident;
