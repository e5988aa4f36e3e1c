//! # Request Validation
//!
//! Turns raw request payloads into validated commands. Each function either
//! returns the normalized command or the first constraint that failed; no
//! storage is touched.
//!
//! Rules:
//! - `id` and `name` are 4 to 36 characters
//! - a string field that is present must not be empty
//! - dates accept RFC 3339, `YYYY-MM-DDTHH:MM:SS` (UTC), `YYYY-MM-DD`
//!   (midnight UTC) or epoch milliseconds; `null` means "no date"
//! - `status` must be one of the `TodoStatus` literals

use chrono::{Datelike, DateTime, NaiveDate, NaiveDateTime, Utc};
use shared::{CreateTodoRequest, TodoStatus, UpdateTodoRequest};
use std::ops::RangeInclusive;
use thiserror::Error;

use crate::domain::commands::{CreateTodoCommand, UpdateTodoCommand};

const ID_LENGTH: RangeInclusive<usize> = 4..=36;
const NAME_LENGTH: RangeInclusive<usize> = 4..=36;

/// Literal accepted in place of a date to mean "no date" (form bodies cannot carry JSON null)
const NULL_LITERAL: &str = "null";

const STORABLE_YEARS: RangeInclusive<i32> = 0..=9999;

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("{field} must be at least {min} characters, got {actual}")]
    TooShort {
        field: &'static str,
        min: usize,
        actual: usize,
    },

    #[error("{field} must be at most {max} characters, got {actual}")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("{field} is not a valid date: {value:?}")]
    InvalidDate { field: &'static str, value: String },

    #[error("status must be one of IN PROCESS, DONE, IDLE; got {0:?}")]
    InvalidStatus(String),
}

pub fn validate_create(request: &CreateTodoRequest) -> Result<CreateTodoCommand, ValidationError> {
    let id = required("id", request.id.as_deref())?;
    check_length("id", id, &ID_LENGTH)?;

    let name = required("name", request.name.as_deref())?;
    check_length("name", name, &NAME_LENGTH)?;

    let description = match request.description.as_deref() {
        Some(description) => non_empty("description", description)?,
        None => "",
    };

    Ok(CreateTodoCommand {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        start_date_at: optional_date("startDateAt", request.start_date_at.as_ref())?.flatten(),
        due_date_at: optional_date("dueDateAt", request.due_date_at.as_ref())?.flatten(),
    })
}

pub fn validate_update(request: &UpdateTodoRequest) -> Result<UpdateTodoCommand, ValidationError> {
    let name = request
        .name
        .as_deref()
        .map(|name| -> Result<String, ValidationError> {
            let name = non_empty("name", name)?;
            check_length("name", name, &NAME_LENGTH)?;
            Ok(name.to_string())
        })
        .transpose()?;

    let description = request
        .description
        .as_deref()
        .map(|description| non_empty("description", description).map(str::to_string))
        .transpose()?;

    let status = request
        .status
        .as_deref()
        .map(|status| {
            status
                .parse::<TodoStatus>()
                .map_err(|_| ValidationError::InvalidStatus(status.to_string()))
        })
        .transpose()?;

    Ok(UpdateTodoCommand {
        name,
        description,
        start_date_at: optional_date("startDateAt", request.start_date_at.as_ref())?,
        due_date_at: optional_date("dueDateAt", request.due_date_at.as_ref())?,
        status,
    })
}

/// Parse a date in any of the accepted forms.
///
/// Dates outside years 0000-9999 are rejected; they have no fixed-width
/// RFC 3339 form and could not be read back from storage.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    parse_date_forms(value).filter(|date| STORABLE_YEARS.contains(&date.year()))
}

fn parse_date_forms(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc());
    }

    let digits = value.strip_prefix('-').unwrap_or(value);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return value
            .parse::<i64>()
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis);
    }

    None
}

fn required<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, ValidationError> {
    let value = value.ok_or(ValidationError::MissingField { field })?;
    non_empty(field, value)
}

fn non_empty<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(value)
}

fn check_length(
    field: &'static str,
    value: &str,
    range: &RangeInclusive<usize>,
) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual < *range.start() {
        return Err(ValidationError::TooShort {
            field,
            min: *range.start(),
            actual,
        });
    }
    if actual > *range.end() {
        return Err(ValidationError::TooLong {
            field,
            max: *range.end(),
            actual,
        });
    }
    Ok(())
}

/// `None` = omitted, `Some(None)` = explicit null, `Some(Some(_))` = a date
fn optional_date(
    field: &'static str,
    value: Option<&Option<String>>,
) -> Result<Option<Option<DateTime<Utc>>>, ValidationError> {
    match value {
        None => Ok(None),
        Some(None) => Ok(Some(None)),
        Some(Some(text)) if text == NULL_LITERAL => Ok(Some(None)),
        Some(Some(text)) => parse_date(text)
            .map(|date| Some(Some(date)))
            .ok_or_else(|| ValidationError::InvalidDate {
                field,
                value: text.clone(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create_request(id: &str, name: &str) -> CreateTodoRequest {
        CreateTodoRequest {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_minimal_payload() {
        let command = validate_create(&create_request("abcd", "test")).unwrap();

        assert_eq!(command.id, "abcd");
        assert_eq!(command.name, "test");
        assert_eq!(command.description, "");
        assert_eq!(command.start_date_at, None);
        assert_eq!(command.due_date_at, None);
    }

    #[test]
    fn test_create_requires_id_and_name() {
        let missing_id = CreateTodoRequest {
            name: Some("test".to_string()),
            ..Default::default()
        };
        assert_eq!(
            validate_create(&missing_id),
            Err(ValidationError::MissingField { field: "id" })
        );

        let missing_name = CreateTodoRequest {
            id: Some("abcd".to_string()),
            ..Default::default()
        };
        assert_eq!(
            validate_create(&missing_name),
            Err(ValidationError::MissingField { field: "name" })
        );
    }

    #[test]
    fn test_create_length_bounds() {
        assert_eq!(
            validate_create(&create_request("abcd", "abc")),
            Err(ValidationError::TooShort { field: "name", min: 4, actual: 3 })
        );
        assert_eq!(
            validate_create(&create_request("abc", "test")),
            Err(ValidationError::TooShort { field: "id", min: 4, actual: 3 })
        );

        let long = "x".repeat(37);
        assert_eq!(
            validate_create(&create_request(&long, "test")),
            Err(ValidationError::TooLong { field: "id", max: 36, actual: 37 })
        );

        let boundary = "y".repeat(36);
        assert!(validate_create(&create_request(&boundary, &boundary)).is_ok());
    }

    #[test]
    fn test_length_counts_characters() {
        // four characters, more than four bytes
        assert!(validate_create(&create_request("abcd", "할일목록")).is_ok());
    }

    #[test]
    fn test_create_rejects_empty_strings() {
        assert_eq!(
            validate_create(&create_request("abcd", "")),
            Err(ValidationError::EmptyField { field: "name" })
        );

        let request = CreateTodoRequest {
            description: Some(String::new()),
            ..create_request("abcd", "test")
        };
        assert_eq!(
            validate_create(&request),
            Err(ValidationError::EmptyField { field: "description" })
        );
    }

    #[test]
    fn test_create_dates() {
        let request = CreateTodoRequest {
            start_date_at: Some(Some("2024-05-01".to_string())),
            due_date_at: Some(None),
            ..create_request("abcd", "test")
        };
        let command = validate_create(&request).unwrap();
        assert_eq!(
            command.start_date_at,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(command.due_date_at, None);

        let invalid = CreateTodoRequest {
            due_date_at: Some(Some("next tuesday".to_string())),
            ..create_request("abcd", "test")
        };
        assert_eq!(
            validate_create(&invalid),
            Err(ValidationError::InvalidDate {
                field: "dueDateAt",
                value: "next tuesday".to_string()
            })
        );
    }

    #[test]
    fn test_update_empty_payload_is_valid() {
        let command = validate_update(&UpdateTodoRequest::default()).unwrap();
        assert_eq!(command, UpdateTodoCommand::default());
    }

    #[test]
    fn test_update_fields() {
        let request = UpdateTodoRequest {
            name: Some("renamed".to_string()),
            start_date_at: Some(Some("null".to_string())),
            due_date_at: Some(Some("2024-05-01T10:00:00+02:00".to_string())),
            status: Some("IN PROCESS".to_string()),
            ..Default::default()
        };
        let command = validate_update(&request).unwrap();

        assert_eq!(command.name.as_deref(), Some("renamed"));
        assert_eq!(command.description, None);
        assert_eq!(command.start_date_at, Some(None));
        assert_eq!(
            command.due_date_at,
            Some(Some(Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()))
        );
        assert_eq!(command.status, Some(TodoStatus::InProcess));
    }

    #[test]
    fn test_update_rejects_bad_values() {
        let bad_status = UpdateTodoRequest {
            status: Some("FINISHED".to_string()),
            ..Default::default()
        };
        assert_eq!(
            validate_update(&bad_status),
            Err(ValidationError::InvalidStatus("FINISHED".to_string()))
        );

        let short_name = UpdateTodoRequest {
            name: Some("ab".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            validate_update(&short_name),
            Err(ValidationError::TooShort { field: "name", .. })
        ));

        let empty_description = UpdateTodoRequest {
            description: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            validate_update(&empty_description),
            Err(ValidationError::EmptyField { field: "description" })
        );
    }

    #[test]
    fn test_parse_date_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap();

        assert_eq!(parse_date("2024-05-01T10:30:00Z"), Some(expected));
        assert_eq!(parse_date("2024-05-01T12:30:00+02:00"), Some(expected));
        assert_eq!(parse_date("2024-05-01T10:30:00"), Some(expected));
        assert_eq!(parse_date("2024-05-01 10:30:00"), Some(expected));
        assert_eq!(parse_date(&expected.timestamp_millis().to_string()), Some(expected));

        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("-"), None);
        assert_eq!(parse_date("2024-13-01"), None);
        assert_eq!(parse_date("tomorrow"), None);
    }

    #[test]
    fn test_parse_date_year_bounds() {
        assert_eq!(
            parse_date("253402300799999"),
            Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59)
                .single()
                .map(|d| d + chrono::Duration::milliseconds(999))
        );
        assert_eq!(
            parse_date("-62167219200000"),
            Utc.with_ymd_and_hms(0, 1, 1, 0, 0, 0).single()
        );

        // year 10000 and year -1
        assert_eq!(parse_date("253402300800000"), None);
        assert_eq!(parse_date("-62198755200000"), None);
        assert_eq!(parse_date("+10000-01-01T00:00:00Z"), None);
    }

    #[test]
    fn test_create_rejects_unstorable_dates() {
        let request = CreateTodoRequest {
            due_date_at: Some(Some("253402300800000".to_string())),
            ..create_request("abcd", "test")
        };
        assert_eq!(
            validate_create(&request),
            Err(ValidationError::InvalidDate {
                field: "dueDateAt",
                value: "253402300800000".to_string()
            })
        );
    }
}
