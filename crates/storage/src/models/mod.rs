pub mod attempt;
pub mod category;

pub use attempt::{Attempt, DEFAULT_RUN_NAME, NewAttempt, time_from_parts};
pub use category::{Category, Discipline, Gender, UnknownCategory};
