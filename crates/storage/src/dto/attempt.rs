use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{Attempt, Category, Discipline, Gender, NewAttempt, time_from_parts};

const REQUIRED_MESSAGE: &str = "Name, age, gender, discipline, date, and time are required.";
const AGE_MESSAGE: &str = "Age must be a positive whole number.";
const TIME_MESSAGE: &str = "Enter minutes (0–59) and seconds (0–59.99).";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Numeric form field, sent either as a JSON number or as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum FormNumber {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl FormNumber {
    fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }

    fn as_whole(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Decimal(_) => None,
            Self::Text(text) => text.trim().parse().ok(),
        }
    }

    fn as_decimal(&self) -> Option<f64> {
        let value = match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Decimal(n) => Some(*n),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
        };
        value.filter(|n| n.is_finite())
    }
}

/// Submitted race attempt, as entered on the race form
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitAttemptRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_required"))]
    pub name: String,

    /// Positive whole number
    #[serde(default)]
    pub age: Option<FormNumber>,

    /// Free text, normalized to Male/Female
    #[serde(default)]
    #[validate(custom(function = "validate_required"))]
    pub gender: String,

    /// Free text, normalized to Ski/Snowboard
    #[serde(default)]
    #[validate(custom(function = "validate_required"))]
    pub discipline: String,

    #[validate(length(max = 255))]
    pub run_name: Option<String>,

    /// ISO date (YYYY-MM-DD)
    #[serde(default)]
    pub date: String,

    /// Whole minutes, 0 to 59
    #[serde(default)]
    pub time_minutes: Option<FormNumber>,

    /// Seconds, at least 0 and below 60
    #[serde(default)]
    pub time_seconds: Option<FormNumber>,

    pub notes: Option<String>,
}

impl TryFrom<SubmitAttemptRequest> for NewAttempt {
    type Error = ValidationErrors;

    /// Runs the derived checks, then parses the numeric and date fields,
    /// reporting every failing field at once.
    fn try_from(req: SubmitAttemptRequest) -> Result<Self, Self::Error> {
        let mut errors = req.validate().err().unwrap_or_default();

        let age = field_value(&mut errors, "age", parse_age(req.age.as_ref()));
        let minutes = field_value(&mut errors, "time_minutes", parse_minutes(req.time_minutes.as_ref()));
        let seconds = field_value(&mut errors, "time_seconds", parse_seconds(req.time_seconds.as_ref()));
        let date = field_value(&mut errors, "date", parse_race_date(&req.date));

        let (age, minutes, seconds, date) = match (age, minutes, seconds, date) {
            (Some(age), Some(minutes), Some(seconds), Some(date)) if errors.is_empty() => {
                (age, minutes, seconds, date)
            }
            _ => return Err(errors),
        };

        let attempt = NewAttempt::new(
            req.name,
            age,
            Gender::from_free_text(&req.gender),
            Discipline::from_free_text(&req.discipline),
            date,
            time_from_parts(minutes, seconds),
        )
        .with_run_name(req.run_name.as_deref())
        .with_notes(req.notes.as_deref());

        Ok(attempt)
    }
}

/// Stored race attempt
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttemptResponse {
    pub id: i64,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub discipline: Discipline,
    pub category: Category,
    pub run_name: String,
    pub date: NaiveDate,
    pub time_seconds: f64,
    /// `m:ss.cc`
    pub formatted_time: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Attempt> for AttemptResponse {
    fn from(attempt: Attempt) -> Self {
        Self {
            id: attempt.id,
            name: attempt.name,
            age: attempt.age,
            gender: attempt.gender,
            discipline: attempt.discipline,
            category: attempt.category,
            run_name: attempt.run_name,
            date: attempt.date,
            formatted_time: format_race_time(attempt.time_seconds),
            time_seconds: attempt.time_seconds,
            notes: attempt.notes,
            created_at: attempt.created_at,
        }
    }
}

/// Formats a run time as `m:ss.cc`, rounded to hundredths.
pub fn format_race_time(time_seconds: f64) -> String {
    let centis = (time_seconds.max(0.0) * 100.0).round() as u64;
    let minutes = centis / 6000;
    let rest = centis % 6000;
    format!("{}:{:02}.{:02}", minutes, rest / 100, rest % 100)
}

// Validation helpers
fn message(code: &'static str, text: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(text))
}

fn field_value<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    parsed: Result<T, ValidationError>,
) -> Option<T> {
    parsed.map_err(|error| errors.add(field, error)).ok()
}

fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(message("required", REQUIRED_MESSAGE));
    }
    Ok(())
}

fn parse_age(value: Option<&FormNumber>) -> Result<u32, ValidationError> {
    match value {
        None => Err(message("required", REQUIRED_MESSAGE)),
        Some(age) if age.is_blank() => Err(message("required", REQUIRED_MESSAGE)),
        Some(age) => age
            .as_whole()
            .and_then(|n| u32::try_from(n).ok())
            .filter(|&n| n > 0)
            .ok_or_else(|| message("invalid_age", AGE_MESSAGE)),
    }
}

fn parse_minutes(value: Option<&FormNumber>) -> Result<u32, ValidationError> {
    let minutes = value.ok_or_else(|| message("required", REQUIRED_MESSAGE))?;
    minutes
        .as_whole()
        .and_then(|n| u32::try_from(n).ok())
        .filter(|&n| n <= 59)
        .ok_or_else(|| message("invalid_time", TIME_MESSAGE))
}

fn parse_seconds(value: Option<&FormNumber>) -> Result<f64, ValidationError> {
    let seconds = value.ok_or_else(|| message("required", REQUIRED_MESSAGE))?;
    seconds
        .as_decimal()
        .filter(|s| (0.0..60.0).contains(s))
        .ok_or_else(|| message("invalid_time", TIME_MESSAGE))
}

fn parse_race_date(value: &str) -> Result<NaiveDate, ValidationError> {
    validate_required(value)?;
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| message("invalid_date", "Date must be in YYYY-MM-DD format."))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SubmitAttemptRequest {
        SubmitAttemptRequest {
            name: "Mark Man".to_string(),
            age: Some(FormNumber::Integer(28)),
            gender: "male".to_string(),
            discipline: "ski".to_string(),
            run_name: None,
            date: "2026-01-12".to_string(),
            time_minutes: Some(FormNumber::Integer(1)),
            time_seconds: Some(FormNumber::Decimal(15.5)),
            notes: None,
        }
    }

    fn error_message(errors: &ValidationErrors, field: &str) -> String {
        errors.field_errors()[field][0]
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_default()
    }

    #[test]
    fn test_valid_request_is_normalized() {
        let attempt = NewAttempt::try_from(request()).unwrap();
        assert_eq!(attempt.time_seconds(), 75.5);
        assert_eq!(attempt.gender(), Gender::Male);
        assert_eq!(attempt.discipline(), Discipline::Ski);
        assert_eq!(attempt.category(), Category::Men17To49);
        assert_eq!(attempt.run_name(), "Main course");
        assert_eq!(attempt.date(), NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
    }

    #[test]
    fn test_free_text_snowboard() {
        let req = SubmitAttemptRequest {
            gender: "F".to_string(),
            discipline: "Snowboard".to_string(),
            age: Some(FormNumber::Integer(70)),
            ..request()
        };
        let attempt = NewAttempt::try_from(req).unwrap();
        assert_eq!(attempt.category(), Category::SnowboardWomen);
    }

    #[test]
    fn test_numbers_sent_as_text() {
        let req = SubmitAttemptRequest {
            age: Some(FormNumber::Text(" 12 ".to_string())),
            time_minutes: Some(FormNumber::Text("0".to_string())),
            time_seconds: Some(FormNumber::Text("48.25".to_string())),
            gender: "female".to_string(),
            ..request()
        };
        let attempt = NewAttempt::try_from(req).unwrap();
        assert_eq!(attempt.age(), 12);
        assert_eq!(attempt.time_seconds(), 48.25);
        assert_eq!(attempt.category(), Category::Girls);
    }

    #[test]
    fn test_form_number_accepts_json_numbers_and_text() {
        let parsed: Vec<FormNumber> = serde_json::from_str(r#"[28, 15.5, "abc"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                FormNumber::Integer(28),
                FormNumber::Decimal(15.5),
                FormNumber::Text("abc".to_string())
            ]
        );
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let req = SubmitAttemptRequest {
            name: "   ".to_string(),
            ..request()
        };
        let errors = NewAttempt::try_from(req).unwrap_err();
        assert_eq!(error_message(&errors, "name"), REQUIRED_MESSAGE);
    }

    #[test]
    fn test_missing_numbers_are_required() {
        let req = SubmitAttemptRequest {
            age: None,
            time_minutes: None,
            time_seconds: None,
            ..request()
        };
        let errors = NewAttempt::try_from(req).unwrap_err();
        for field in ["age", "time_minutes", "time_seconds"] {
            assert_eq!(error_message(&errors, field), REQUIRED_MESSAGE);
        }

        let req = SubmitAttemptRequest {
            age: Some(FormNumber::Text("  ".to_string())),
            ..request()
        };
        let errors = NewAttempt::try_from(req).unwrap_err();
        assert_eq!(error_message(&errors, "age"), REQUIRED_MESSAGE);
    }

    #[test]
    fn test_invalid_age_is_rejected() {
        for age in [
            FormNumber::Integer(0),
            FormNumber::Integer(-4),
            FormNumber::Decimal(28.5),
            FormNumber::Text("abc".to_string()),
        ] {
            let req = SubmitAttemptRequest {
                age: Some(age),
                ..request()
            };
            let errors = NewAttempt::try_from(req).unwrap_err();
            assert_eq!(error_message(&errors, "age"), AGE_MESSAGE);
        }
    }

    #[test]
    fn test_time_bounds() {
        let cases = [
            ("time_seconds", FormNumber::Integer(1), FormNumber::Decimal(60.0)),
            ("time_seconds", FormNumber::Integer(1), FormNumber::Decimal(-0.01)),
            ("time_seconds", FormNumber::Integer(1), FormNumber::Text("fast".to_string())),
            ("time_minutes", FormNumber::Integer(60), FormNumber::Integer(0)),
            ("time_minutes", FormNumber::Integer(-1), FormNumber::Integer(0)),
        ];

        for (field, minutes, seconds) in cases {
            let req = SubmitAttemptRequest {
                time_minutes: Some(minutes),
                time_seconds: Some(seconds),
                ..request()
            };
            let errors = NewAttempt::try_from(req).unwrap_err();
            assert_eq!(error_message(&errors, field), TIME_MESSAGE);
        }

        let req = SubmitAttemptRequest {
            time_minutes: Some(FormNumber::Integer(59)),
            time_seconds: Some(FormNumber::Decimal(59.99)),
            ..request()
        };
        assert!(NewAttempt::try_from(req).is_ok());
    }

    #[test]
    fn test_run_name_length_is_capped() {
        let req = SubmitAttemptRequest {
            run_name: Some("x".repeat(256)),
            ..request()
        };
        let errors = NewAttempt::try_from(req).unwrap_err();
        assert!(errors.field_errors().contains_key("run_name"));

        let req = SubmitAttemptRequest {
            run_name: Some("x".repeat(255)),
            ..request()
        };
        assert!(NewAttempt::try_from(req).is_ok());
    }

    #[test]
    fn test_malformed_date_is_rejected() {
        for date in ["12/01/2026", "2026-13-01", "tomorrow"] {
            let req = SubmitAttemptRequest {
                date: date.to_string(),
                ..request()
            };
            let errors = NewAttempt::try_from(req).unwrap_err();
            assert_eq!(error_message(&errors, "date"), "Date must be in YYYY-MM-DD format.");
        }

        let req = SubmitAttemptRequest {
            date: String::new(),
            ..request()
        };
        let errors = NewAttempt::try_from(req).unwrap_err();
        assert_eq!(error_message(&errors, "date"), REQUIRED_MESSAGE);
    }

    #[test]
    fn test_format_race_time() {
        assert_eq!(format_race_time(75.5), "1:15.50");
        assert_eq!(format_race_time(0.0), "0:00.00");
        assert_eq!(format_race_time(59.999), "1:00.00");
        assert_eq!(format_race_time(3599.99), "59:59.99");
    }
}
