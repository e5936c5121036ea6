//! Install date notifications.
//!
//! Residents pick candidate install dates and time slots on the dashboard.
//! Nothing is stored: the selections are formatted into a plain-text email and
//! sent to the install scheduling team.

use askama::Template;
use chrono::{Datelike, NaiveDate};
use thiserror::Error;
use tracing::instrument;

use raving_residents_core::{CompanyId, InstallDateSelection, Resident, ResidentId};

use super::mailer::{MailError, MailTransport, OutboundEmail};

/// Who receives install date notifications.
///
/// Fixed regardless of the resident's company; a per-company routing table
/// would replace this once one exists.
pub const INSTALL_DATE_RECIPIENTS: &[&str] = &[
    "install-scheduling@secondnature.com",
    "resident-success@secondnature.com",
    "operations@secondnature.com",
];

/// Shown in place of a date the resident left unset.
const DATE_NOT_SET: &str = "Not set";

/// Shown in place of a date that could not be read.
const DATE_INVALID: &str = "Invalid Date";

/// Plain text template for the install dates email.
#[derive(Template)]
#[template(path = "email/install_dates.txt")]
struct InstallDatesEmailText<'a> {
    resident_id: &'a ResidentId,
    company_id: &'a CompanyId,
    full_name: &'a str,
    email: &'a str,
    date_list: &'a str,
}

/// Errors that can occur while dispatching an install date notification.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// The mail transport failed.
    #[error(transparent)]
    Mail(#[from] MailError),
}

/// Format a date the way a US-English browser locale does: `M/D/YYYY`.
fn format_us_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Format one selection. `position` is 1-based.
///
/// ```text
/// Date 1: 1/15/2024
/// Times: 9am, 2pm
/// ```
///
/// A date that is set but unreadable is written as `Invalid Date` so the
/// rest of the selection still reaches the scheduling team.
#[must_use]
pub fn format_selection(position: usize, selection: &InstallDateSelection) -> String {
    let date = match selection.calendar_date() {
        Ok(Some(date)) => format_us_date(date),
        Ok(None) => DATE_NOT_SET.to_string(),
        Err(e) => {
            tracing::warn!(error = %e, position, "Unreadable install date in submission");
            DATE_INVALID.to_string()
        }
    };

    format!(
        "Date {position}: {date}\nTimes: {}",
        selection.times.join(", ")
    )
}

/// Format every selection, one block per selection, joined by newlines.
#[must_use]
pub fn format_date_list(selections: &[InstallDateSelection]) -> String {
    selections
        .iter()
        .enumerate()
        .map(|(i, selection)| format_selection(i + 1, selection))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the install dates email for a resident.
///
/// `resident_id` is the identifier resolved for this request, never one taken
/// from the submitted payload.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn compose_install_dates_email(
    resident_id: &ResidentId,
    resident: &Resident,
    selections: &[InstallDateSelection],
) -> Result<OutboundEmail, NotificationError> {
    let date_list = format_date_list(selections);
    let full_name = resident.full_name();

    let text = InstallDatesEmailText {
        resident_id,
        company_id: &resident.company_id,
        full_name: &full_name,
        email: &resident.email,
        date_list: &date_list,
    }
    .render()?;

    Ok(OutboundEmail {
        to: INSTALL_DATE_RECIPIENTS
            .iter()
            .map(ToString::to_string)
            .collect(),
        subject: format!("Install Dates for User {resident_id}"),
        text,
    })
}

/// Compose and send the install dates email, returning the message id.
///
/// No retry and no deduplication: every call sends a new email. The subject
/// and `User ID:` line carry the canonical lowercase form of `resident_id`,
/// so a resident who arrived with an uppercase `userId` is still reported
/// under the same id as everyone else.
///
/// # Errors
///
/// Returns an error if composing fails or the transport rejects the message.
#[instrument(skip(mailer, resident, selections), fields(count = selections.len()))]
pub async fn send_install_dates(
    mailer: &dyn MailTransport,
    resident_id: &ResidentId,
    resident: &Resident,
    selections: &[InstallDateSelection],
) -> Result<String, NotificationError> {
    let email = compose_install_dates_email(resident_id, resident, selections)?;
    let message_id = mailer.send(&email).await?;

    tracing::info!(
        resident_id = %resident_id,
        company_id = %resident.company_id,
        message_id = %message_id,
        "Install dates notification sent"
    );
    Ok(message_id)
}
