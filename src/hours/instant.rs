use time::{OffsetDateTime, UtcOffset};

use super::{MinuteOfDay, MINUTES_PER_DAY};

/// A reference instant on the vendor's local wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalInstant {
    weekday: u8,
    minutes: MinuteOfDay,
}

impl LocalInstant {
    /// `weekday` is 0 (Sunday) to 6; out-of-range inputs wrap.
    pub fn new(weekday: u8, minutes: MinuteOfDay) -> Self {
        Self {
            weekday: weekday % 7,
            minutes: minutes % MINUTES_PER_DAY,
        }
    }

    pub fn at(weekday: u8, hour: u8, minute: u8) -> Self {
        Self::new(weekday, u16::from(hour) * 60 + u16::from(minute))
    }

    /// Wall-clock view of `instant` at `offset`.
    pub fn from_datetime(instant: OffsetDateTime, offset: UtcOffset) -> Self {
        let local = instant.to_offset(offset);
        Self::at(
            local.weekday().number_days_from_sunday(),
            local.hour(),
            local.minute(),
        )
    }

    /// The current instant at `offset`. Only callers reach for the clock;
    /// evaluation always receives an explicit instant.
    pub fn now(offset: UtcOffset) -> Self {
        Self::from_datetime(OffsetDateTime::now_utc(), offset)
    }

    pub fn weekday(&self) -> u8 {
        self.weekday
    }

    pub fn minutes(&self) -> MinuteOfDay {
        self.minutes
    }

    pub fn yesterday(&self) -> u8 {
        (self.weekday + 6) % 7
    }
}
