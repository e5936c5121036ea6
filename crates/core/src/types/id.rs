//! Identifier types for residents, companies and services.
//!
//! Resident identifiers are validated UUID v4 strings. Company and service
//! identifiers are opaque strings owned by the resident data service; the
//! `define_string_id!` macro gives each its own type so they cannot be mixed up.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Canonical hyphenated UUID v4: `8-4-4-4-12` hex groups, third group starting
/// with `4`, fourth group starting with one of `8`, `9`, `a`, `b`.
static RESIDENT_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("Invalid regex")
});

/// Macro to define a type-safe string identifier.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `new()`, `as_str()` and `Display`
///
/// # Example
///
/// ```rust
/// # use raving_residents_core::define_string_id;
/// define_string_id!(PropertyId);
///
/// let id = PropertyId::new("prop-42");
/// assert_eq!(id.as_str(), "prop-42");
/// ```
#[macro_export]
macro_rules! define_string_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(CompanyId);
define_string_id!(ServiceId);

/// Errors that can occur when parsing a [`ResidentId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ResidentIdError {
    /// No identifier was supplied by the query string or the session.
    #[error("resident id is missing")]
    Missing,
    /// The identifier is not a hyphenated UUID v4.
    #[error("Invalid UUID format in URL parameter")]
    InvalidFormat(String),
}

/// A resident identifier.
///
/// ## Constraints
///
/// - Canonical hyphenated form, 36 characters
/// - Version nibble `4`, variant nibble `8`-`b`
/// - Hex digits may be upper or lower case; the parsed value displays lower case
///
/// ## Examples
///
/// ```
/// use raving_residents_core::ResidentId;
///
/// assert!(ResidentId::parse("123e4567-e89b-42d3-a456-426614174000").is_ok());
///
/// assert!(ResidentId::parse("").is_err());
/// assert!(ResidentId::parse("123e4567-e89b-12d3-a456-426614174000").is_err()); // v1
/// assert!(ResidentId::parse("123e4567e89b42d3a456426614174000").is_err()); // no hyphens
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResidentId(Uuid);

impl ResidentId {
    /// Parse a `ResidentId` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`ResidentIdError::Missing`] for an empty input and
    /// [`ResidentIdError::InvalidFormat`] for anything that is not a
    /// hyphenated UUID v4.
    pub fn parse(s: &str) -> Result<Self, ResidentIdError> {
        if s.is_empty() {
            return Err(ResidentIdError::Missing);
        }

        if !RESIDENT_ID_RE.is_match(s) {
            return Err(ResidentIdError::InvalidFormat(s.to_owned()));
        }

        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| ResidentIdError::InvalidFormat(s.to_owned()))
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ResidentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl std::str::FromStr for ResidentId {
    type Err = ResidentIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ResidentId {
    type Error = ResidentIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ResidentId> for String {
    fn from(id: ResidentId) -> Self {
        id.to_string()
    }
}
