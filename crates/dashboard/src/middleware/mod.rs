//! HTTP middleware stack for the dashboard.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with an empty `request_id` field)
//! 3. Request ID (fills the span field, echoes `x-request-id`)
//! 4. Session layer (tower-sessions with in-memory store)
//!
//! The resident resolver is an extractor rather than a layer, so each
//! handler receives the resolved id explicitly.

pub mod request_id;
pub mod resident;
pub mod session;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware, request_span};
pub use resident::{ResidentIdSource, ResolvedResident, SessionResident, remember_resident};
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
