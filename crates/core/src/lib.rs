//! Raving Residents Core - Shared types library.
//!
//! This crate provides the domain types used by the resident dashboard:
//! - `dashboard` - Resident-facing landing page and install-date notifications
//! - `integration-tests` - Router-level and live-server tests
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no HTTP
//! clients, no templates. Records owned by the external resident and branding
//! services are modelled here exactly as they arrive on the wire.
//!
//! # Modules
//!
//! - [`types`] - Resident identifiers, resident and branding records, install
//!   date selections

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
