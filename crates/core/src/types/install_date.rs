//! Install date selections submitted by residents.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Errors that can occur when interpreting an [`InstallDateSelection`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InstallDateError {
    /// The date is not a calendar date or a timestamp in a recognized form.
    #[error("unrecognized install date: {0}")]
    InvalidDate(String),
}

/// Offset-less timestamp forms, tried after the plain date.
const LOCAL_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S%.f"];

/// One proposed install date and its preferred time slots.
///
/// Exists only for the duration of a single notification request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallDateSelection {
    /// Date as sent by the browser; `None` when the resident left it unset.
    #[serde(default)]
    pub date: Option<String>,
    /// Time slot labels in the order the resident picked them.
    #[serde(default)]
    pub times: Vec<String>,
}

impl InstallDateSelection {
    /// The selected calendar day, if any.
    ///
    /// Accepts a plain `YYYY-MM-DD` date, a local `YYYY-MM-DDTHH:MM[:SS]`
    /// timestamp as produced by `datetime-local` inputs, or an RFC 3339
    /// timestamp, in which case the UTC calendar day is used. An empty string
    /// counts as unset.
    ///
    /// # Errors
    ///
    /// Returns [`InstallDateError::InvalidDate`] if the date is set but cannot
    /// be parsed.
    pub fn calendar_date(&self) -> Result<Option<NaiveDate>, InstallDateError> {
        let Some(raw) = self.date.as_deref().map(str::trim) else {
            return Ok(None);
        };

        if raw.is_empty() {
            return Ok(None);
        }

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(Some(date));
        }

        if let Some(local) = LOCAL_DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        {
            return Ok(Some(local.date()));
        }

        DateTime::parse_from_rfc3339(raw)
            .map(|dt| Some(dt.naive_utc().date()))
            .map_err(|_| InstallDateError::InvalidDate(raw.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn selection(date: Option<&str>) -> InstallDateSelection {
        InstallDateSelection {
            date: date.map(String::from),
            times: vec![],
        }
    }

    #[test]
    fn test_plain_date() {
        let date = selection(Some("2024-01-15")).calendar_date().unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15));
    }

    #[test]
    fn test_timestamp_uses_utc_day() {
        let date = selection(Some("2024-01-15T23:30:00-05:00"))
            .calendar_date()
            .unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 16));

        let date = selection(Some("2024-01-15T00:00:00.000Z"))
            .calendar_date()
            .unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15));
    }

    #[test]
    fn test_local_timestamps_keep_their_day() {
        for raw in ["2024-01-15T10:00", "2024-01-15T10:00:00", "2024-01-15T23:59:59.250"] {
            let date = selection(Some(raw)).calendar_date().unwrap();
            assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15), "{raw}");
        }
    }

    #[test]
    fn test_unset_dates() {
        assert_eq!(selection(None).calendar_date().unwrap(), None);
        assert_eq!(selection(Some("")).calendar_date().unwrap(), None);
    }

    #[test]
    fn test_invalid_date() {
        assert!(matches!(
            selection(Some("next tuesday")).calendar_date(),
            Err(InstallDateError::InvalidDate(_))
        ));
        assert!(selection(Some("2024-02-30")).calendar_date().is_err());
    }

    #[test]
    fn test_deserialize_null_date() {
        let parsed: InstallDateSelection =
            serde_json::from_str(r#"{"date": null, "times": ["9am"]}"#).unwrap();
        assert_eq!(parsed.date, None);
        assert_eq!(parsed.times, vec!["9am".to_string()]);
    }
}
