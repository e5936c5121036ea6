//! Session-related types.
//!
//! The dashboard keeps a single value in the session: the resident id from
//! the last `?userId=` visit, so later requests can be resolved without it.

/// Session keys.
pub mod keys {
    /// Key for the resident id established by a `?userId=` visit.
    pub const RESIDENT_ID: &str = "resident_id";
}
