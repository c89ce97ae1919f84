use thiserror::Error;

/// Rejections raised by the strict, writer-side hours validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HoursError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("days must be a list")]
    DaysNotSequence,

    #[error("invalid day {0}, expected a number from 0 (Sunday) to 6 (Saturday)")]
    InvalidDay(String),

    #[error("{field} must be HH:MM in 24-hour format, got {value:?}")]
    InvalidTime { field: &'static str, value: String },
}
