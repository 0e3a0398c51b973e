use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Last age (inclusive) of the junior ski band.
pub const JUNIOR_MAX_AGE: u32 = 16;
/// Last age (inclusive) of the open ski band.
pub const OPEN_MAX_AGE: u32 = 49;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Normalizes free text: anything starting with "m" is male, everything else female.
    pub fn from_free_text(input: &str) -> Self {
        if input.trim().to_lowercase().starts_with('m') {
            Self::Male
        } else {
            Self::Female
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum Discipline {
    Ski,
    Snowboard,
}

impl Discipline {
    /// Normalizes free text: "snow..." is snowboard, everything else ski.
    pub fn from_free_text(input: &str) -> Self {
        if input.trim().to_lowercase().starts_with("snow") {
            Self::Snowboard
        } else {
            Self::Ski
        }
    }
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct UnknownCategory(String);

/// One of the eight fixed ranking classes.
///
/// Variants are declared in leaderboard display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum Category {
    Girls,
    Boys,
    #[serde(rename = "Women 17–49")]
    #[sqlx(rename = "Women 17–49")]
    Women17To49,
    #[serde(rename = "Men 17–49")]
    #[sqlx(rename = "Men 17–49")]
    Men17To49,
    #[serde(rename = "Women 50+")]
    #[sqlx(rename = "Women 50+")]
    Women50Plus,
    #[serde(rename = "Men 50+")]
    #[sqlx(rename = "Men 50+")]
    Men50Plus,
    #[serde(rename = "Snowboard Women")]
    #[sqlx(rename = "Snowboard Women")]
    SnowboardWomen,
    #[serde(rename = "Snowboard Men")]
    #[sqlx(rename = "Snowboard Men")]
    SnowboardMen,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Self::Girls,
        Self::Boys,
        Self::Women17To49,
        Self::Men17To49,
        Self::Women50Plus,
        Self::Men50Plus,
        Self::SnowboardWomen,
        Self::SnowboardMen,
    ];

    /// Snowboard splits on gender only. Ski splits on gender and the age bands
    /// `..=16`, `17..=49` and `50..`.
    pub fn classify(age: u32, gender: Gender, discipline: Discipline) -> Self {
        let male = gender == Gender::Male;

        if discipline == Discipline::Snowboard {
            return if male {
                Self::SnowboardMen
            } else {
                Self::SnowboardWomen
            };
        }

        match (age, male) {
            (0..=JUNIOR_MAX_AGE, true) => Self::Boys,
            (0..=JUNIOR_MAX_AGE, false) => Self::Girls,
            (0..=OPEN_MAX_AGE, true) => Self::Men17To49,
            (0..=OPEN_MAX_AGE, false) => Self::Women17To49,
            (_, true) => Self::Men50Plus,
            (_, false) => Self::Women50Plus,
        }
    }

    /// Label as stored in the `attempts.category` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Girls => "Girls",
            Self::Boys => "Boys",
            Self::Women17To49 => "Women 17–49",
            Self::Men17To49 => "Men 17–49",
            Self::Women50Plus => "Women 50+",
            Self::Men50Plus => "Men 50+",
            Self::SnowboardWomen => "Snowboard Women",
            Self::SnowboardMen => "Snowboard Men",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Girls => "girls",
            Self::Boys => "boys",
            Self::Women17To49 => "women-17-49",
            Self::Men17To49 => "men-17-49",
            Self::Women50Plus => "women-50-plus",
            Self::Men50Plus => "men-50-plus",
            Self::SnowboardWomen => "snowboard-women",
            Self::SnowboardMen => "snowboard-men",
        }
    }

    fn parse_str(s: &str) -> Result<Self, UnknownCategory> {
        let needle = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.slug().eq_ignore_ascii_case(needle) || c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| {
                UnknownCategory(format!(
                    "Unknown category: '{}'. Available: {}",
                    s,
                    Self::ALL
                        .iter()
                        .map(|c| c.slug())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}

impl TryFrom<&str> for Category {
    type Error = UnknownCategory;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse_str(value)
    }
}

impl std::str::FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
