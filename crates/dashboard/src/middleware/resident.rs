//! Resident resolution.
//!
//! Provides the extractors that tell a handler which resident the request is
//! for. [`ResolvedResident`] takes the `userId` query parameter when present,
//! otherwise the id kept in the session. [`SessionResident`] only reads the
//! session, for routes that act on a resident's behalf. Resolution never fails
//! and never validates; callers parse the raw value with `ResidentId::parse`
//! before any lookup.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;
use tower_sessions::Session;

use raving_residents_core::ResidentId;

use crate::models::session_keys;

/// Where the resolved resident id came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResidentIdSource {
    Query,
    Session,
    Missing,
}

/// Query parameters that can carry a resident id.
#[derive(Debug, Deserialize)]
struct ResidentQuery {
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

/// Extractor yielding the unvalidated resident id for this request.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(resolved: ResolvedResident) -> impl IntoResponse {
///     let id = ResidentId::parse(&resolved.raw_id)?;
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ResolvedResident {
    /// Raw identifier; empty when [`ResidentIdSource::Missing`].
    pub raw_id: String,
    pub source: ResidentIdSource,
}

impl<S> FromRequestParts<S> for ResolvedResident
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // A malformed query string is treated like an absent one
        if let Ok(Query(query)) = Query::<ResidentQuery>::try_from_uri(&parts.uri)
            && let Some(raw_id) = query.user_id
        {
            return Ok(Self {
                raw_id,
                source: ResidentIdSource::Query,
            });
        }

        Ok(remembered_resident(parts).await.map_or_else(
            || Self {
                raw_id: String::new(),
                source: ResidentIdSource::Missing,
            },
            |raw_id| Self {
                raw_id,
                source: ResidentIdSource::Session,
            },
        ))
    }
}

/// Extractor yielding the resident id remembered in the session, ignoring
/// any `userId` query parameter.
///
/// The raw id is empty when the session has none, which fails validation.
#[derive(Debug, Clone)]
pub struct SessionResident {
    pub raw_id: String,
}

impl<S> FromRequestParts<S> for SessionResident
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self {
            raw_id: remembered_resident(parts).await.unwrap_or_default(),
        })
    }
}

/// Read the resident id stored by [`remember_resident`], if any.
async fn remembered_resident(parts: &Parts) -> Option<String> {
    let session = parts.extensions.get::<Session>()?;
    session
        .get::<String>(session_keys::RESIDENT_ID)
        .await
        .ok()
        .flatten()
}

/// Persist a validated resident id in the session for later requests.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn remember_resident(
    session: &Session,
    resident_id: &ResidentId,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(session_keys::RESIDENT_ID, resident_id.to_string())
        .await
}
