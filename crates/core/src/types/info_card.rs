//! Informational cards shown on the dashboard.

use serde::{Deserialize, Serialize};

/// Link schemes a card may point at.
const LINK_SCHEMES: &[&str] = &["http://", "https://"];

/// A short piece of content promoting a benefit or giving resident guidance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoCard {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default)]
    pub link_text: Option<String>,
}

impl InfoCard {
    /// The link target, if it is an absolute `http` or `https` URL.
    ///
    /// Anything else (`javascript:`, `data:`, relative paths) is dropped.
    #[must_use]
    pub fn link_href(&self) -> Option<&str> {
        let url = self.link_url.as_deref()?.trim();
        LINK_SCHEMES
            .iter()
            .any(|scheme| {
                url.get(..scheme.len())
                    .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
            })
            .then_some(url)
    }
}
