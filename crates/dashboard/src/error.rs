//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. Page handlers return `Result<T, AppError>`; JSON
//! handlers wrap it in [`JsonError`] to get an `{ "error": ... }` body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use raving_residents_core::ResidentIdError;

use crate::gateway::GatewayError;
use crate::services::NotificationError;

/// Application-level error type for the dashboard.
#[derive(Debug, Error)]
pub enum AppError {
    /// The resolved resident id is missing or not a UUID v4.
    #[error(transparent)]
    InvalidResidentId(#[from] ResidentIdError),

    /// Resident or branding lookup failed.
    #[error("Upstream error: {0}")]
    Gateway(#[from] GatewayError),

    /// Install date notification failed.
    #[error(transparent)]
    Notification(#[from] NotificationError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    ///
    /// A malformed resident id is a server-side failure of the page, matching
    /// how the dashboard has always surfaced it.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidResidentId(_) | Self::Notification(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Gateway(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            Self::Gateway(_) => StatusCode::BAD_GATEWAY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message safe to show to the client.
    ///
    /// Mail transport failures pass the transport's message through; other
    /// server-side failures are reduced to a generic message.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Gateway(err) if err.is_not_found() => self.to_string(),
            Self::Gateway(_) => "External service error".to_string(),
            Self::Notification(NotificationError::Template(_)) | Self::Internal(_) => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Log server-side failures and capture them to Sentry.
    fn report(&self) {
        if self.status().is_server_error() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.report();
        (self.status(), self.public_message()).into_response()
    }
}

/// JSON error body: `{ "error": "..." }`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// `AppError` rendered as a JSON body for API routes.
#[derive(Debug)]
pub struct JsonError(pub AppError);

impl<E> From<E> for JsonError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        self.0.report();
        let body = ErrorBody {
            error: self.0.public_message(),
        };
        (self.0.status(), Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context to the resolved resident.
pub fn set_sentry_resident(resident_id: &impl ToString) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(resident_id.to_string()),
            ..Default::default()
        }));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MailError;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");

        let err = AppError::from(ResidentIdError::InvalidFormat("123".to_string()));
        assert_eq!(err.to_string(), "Invalid UUID format in URL parameter");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(ResidentIdError::Missing.into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(
                GatewayError::NotFound {
                    resource: "resident",
                    id: "x".to_string()
                }
                .into()
            ),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(GatewayError::Unavailable("down".to_string()).into()),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            get_status(
                NotificationError::from(MailError::Rejected("mailbox full".to_string())).into()
            ),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_public_message_hides_upstream_details() {
        let err = AppError::from(GatewayError::Api {
            status: 503,
            message: "db timeout at 10.0.0.4".to_string(),
        });
        assert_eq!(err.public_message(), "External service error");
    }

    #[test]
    fn test_public_message_passes_transport_message() {
        let err = AppError::from(NotificationError::from(MailError::Rejected(
            "550 relay denied".to_string(),
        )));
        assert_eq!(err.public_message(), "550 relay denied");
    }
}
