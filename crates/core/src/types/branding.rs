//! Company branding served by the branding service.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::id::CompanyId;

/// Errors that can occur when parsing a [`BrandColor`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BrandColorError {
    /// The value does not start with `#`.
    #[error("brand color must start with '#': {0}")]
    MissingHash(String),
    /// The value is not 3, 4, 6 or 8 hex digits after the `#`.
    #[error("brand color must be #rgb, #rgba, #rrggbb or #rrggbbaa: {0}")]
    InvalidHex(String),
}

/// A CSS hex color.
///
/// Brand colors end up inside a `style` attribute, so only plain hex
/// notation is accepted.
///
/// ## Examples
///
/// ```
/// use raving_residents_core::BrandColor;
///
/// assert!(BrandColor::parse("#0f766e").is_ok());
/// assert!(BrandColor::parse("#FFF").is_ok());
///
/// assert!(BrandColor::parse("red").is_err());
/// assert!(BrandColor::parse("#12345").is_err());
/// assert!(BrandColor::parse("#fff;background:url(x)").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BrandColor(String);

impl BrandColor {
    /// Parse a `BrandColor` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not `#` followed by 3, 4, 6 or 8 hex
    /// digits.
    pub fn parse(s: &str) -> Result<Self, BrandColorError> {
        let Some(digits) = s.strip_prefix('#') else {
            return Err(BrandColorError::MissingHash(s.to_owned()));
        };

        let valid_len = matches!(digits.len(), 3 | 4 | 6 | 8);
        if !valid_len || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(BrandColorError::InvalidHex(s.to_owned()));
        }

        Ok(Self(s.to_ascii_lowercase()))
    }

    /// Returns the color as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BrandColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for BrandColor {
    type Error = BrandColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<BrandColor> for String {
    fn from(color: BrandColor) -> Self {
        color.0
    }
}

/// Display branding for a property management company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branding {
    pub company_id: CompanyId,
    /// Company display name, also used as the logo alt text.
    pub name: String,
    /// Logo URL or path.
    pub logo_src: String,
    pub primary_brand_color: BrandColor,
    pub secondary_brand_color: BrandColor,
}
