//! Vendor operating hours: parsing stored time strings, normalizing day
//! lists and deciding whether a vendor is open at a given local instant.

mod days;
mod dto;
mod error;
mod instant;
pub mod services;
mod time_parse;

pub use days::{DaySet, DayValue};
pub use dto::{DaysField, OperatingHours, TimeField};
pub use error::HoursError;
pub use instant::LocalInstant;
pub use services::{is_open_at, normalize_strict, OpenWindow};
pub use time_parse::{
    format_minutes, parse_time, parse_time_value, validate_time_strict, MinuteOfDay,
    MINUTES_PER_DAY,
};
