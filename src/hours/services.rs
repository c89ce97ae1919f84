use tracing::trace;

use super::{
    parse_time, validate_time_strict, DaySet, DaysField, HoursError, LocalInstant, MinuteOfDay,
    OperatingHours, TimeField,
};

/// A fully parsed opening window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenWindow {
    pub open: MinuteOfDay,
    pub close: MinuteOfDay,
    pub days: DaySet,
}

impl OpenWindow {
    /// Parses a stored record with the lenient grammar.
    ///
    /// `None` when any field is missing, `days` is not a list, or either
    /// time is unreadable.
    pub fn from_hours(hours: &OperatingHours) -> Option<Self> {
        let open = hours.open_time.as_ref()?.as_str().and_then(parse_time)?;
        let close = hours.close_time.as_ref()?.as_str().and_then(parse_time)?;
        let days = match hours.days.as_ref()? {
            DaysField::List(values) => DaySet::from_values(values),
            DaysField::Malformed(_) => return None,
        };
        Some(Self { open, close, days })
    }

    /// Windows with `open >= close` run past midnight into the next calendar
    /// day. That includes `open == close`, which reads as open around the
    /// clock from the listed day's opening time.
    pub fn is_overnight(&self) -> bool {
        self.open >= self.close
    }

    pub fn contains(&self, at: LocalInstant) -> bool {
        let now = at.minutes();
        if !self.is_overnight() {
            return self.days.contains(at.weekday()) && (self.open..self.close).contains(&now);
        }
        (self.days.contains(at.weekday()) && now >= self.open)
            || (self.days.contains(at.yesterday()) && now < self.close)
    }
}

/// Whether a vendor with these hours is open at `at`.
///
/// Never fails: incomplete or malformed hours mean closed.
pub fn is_open_at(hours: &OperatingHours, at: LocalInstant) -> bool {
    match OpenWindow::from_hours(hours) {
        Some(window) => window.contains(at),
        None => {
            trace!(?hours, "operating hours unusable, treating as closed");
            false
        }
    }
}

/// Writer-side validation: `days` must be a list of weekday numbers and both
/// times must be zero-padded 24-hour `HH:MM`. Returns the canonical record.
pub fn normalize_strict(hours: &OperatingHours) -> Result<OperatingHours, HoursError> {
    let days = match hours.days.as_ref() {
        None => return Err(HoursError::MissingField("days")),
        Some(DaysField::Malformed(_)) => return Err(HoursError::DaysNotSequence),
        Some(DaysField::List(values)) => DaySet::try_from_values(values)?,
    };
    let open = strict_time("openTime", hours.open_time.as_ref())?;
    let close = strict_time("closeTime", hours.close_time.as_ref())?;
    Ok(OperatingHours::canonical(open, close, days))
}

fn strict_time(field: &'static str, value: Option<&TimeField>) -> Result<MinuteOfDay, HoursError> {
    match value {
        None => Err(HoursError::MissingField(field)),
        Some(TimeField::Text(text)) => validate_time_strict(field, text),
        Some(TimeField::Malformed(other)) => Err(HoursError::InvalidTime {
            field,
            value: other.to_string(),
        }),
    }
}
