use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::category::{Category, Discipline, Gender};

/// Run name recorded when the racer leaves it blank.
pub const DEFAULT_RUN_NAME: &str = "Main course";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Attempt {
    pub id: i64,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub discipline: Discipline,
    pub category: Category,
    pub run_name: String,
    pub date: NaiveDate,
    pub time_seconds: f64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Combines the separately entered minutes and seconds of a run.
pub fn time_from_parts(minutes: u32, seconds: f64) -> f64 {
    f64::from(minutes) * 60.0 + seconds
}

/// An attempt that has been validated but not stored yet.
///
/// The category is derived from age, gender and discipline when the value is
/// built and cannot be set independently.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAttempt {
    name: String,
    age: u32,
    gender: Gender,
    discipline: Discipline,
    category: Category,
    run_name: String,
    date: NaiveDate,
    time_seconds: f64,
    notes: Option<String>,
}

impl NewAttempt {
    pub fn new(
        name: impl Into<String>,
        age: u32,
        gender: Gender,
        discipline: Discipline,
        date: NaiveDate,
        time_seconds: f64,
    ) -> Self {
        Self {
            name: name.into().trim().to_string(),
            age,
            gender,
            discipline,
            category: Category::classify(age, gender, discipline),
            run_name: DEFAULT_RUN_NAME.to_string(),
            date,
            time_seconds,
            notes: None,
        }
    }

    /// Blank names fall back to [`DEFAULT_RUN_NAME`].
    pub fn with_run_name(mut self, run_name: Option<&str>) -> Self {
        self.run_name = match run_name.map(str::trim) {
            Some(run) if !run.is_empty() => run.to_string(),
            _ => DEFAULT_RUN_NAME.to_string(),
        };
        self
    }

    pub fn with_notes(mut self, notes: Option<&str>) -> Self {
        self.notes = notes
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(String::from);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn run_name(&self) -> &str {
        &self.run_name
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time_seconds(&self) -> f64 {
        self.time_seconds
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}
