use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::HoursError;

/// One entry of a stored `days` list as it arrives from storage or a client.
///
/// Older records mix numbers and numeric strings, so nothing is assumed about
/// the shape until [`DayValue::weekday`] coerces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DayValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(Value),
}

impl DayValue {
    /// Weekday number `0..=6` (0 = Sunday), or `None` when the entry can never
    /// match a weekday.
    pub fn weekday(&self) -> Option<u8> {
        let n = match self {
            DayValue::Integer(n) => return u8::try_from(*n).ok().filter(|d| *d < 7),
            DayValue::Float(f) => *f,
            DayValue::Text(s) => s.trim().parse::<f64>().ok()?,
            DayValue::Other(_) => return None,
        };
        if n.fract() != 0.0 || !(0.0..7.0).contains(&n) {
            return None;
        }
        Some(n as u8)
    }
}

impl fmt::Display for DayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayValue::Integer(n) => write!(f, "{n}"),
            DayValue::Float(n) => write!(f, "{n}"),
            DayValue::Text(s) => write!(f, "{s:?}"),
            DayValue::Other(v) => write!(f, "{v}"),
        }
    }
}

impl From<u8> for DayValue {
    fn from(day: u8) -> Self {
        DayValue::Integer(i64::from(day))
    }
}

/// Deduplicated set of weekdays, bit `d` set for weekday `d` (0 = Sunday).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DaySet(u8);

impl DaySet {
    pub const fn empty() -> Self {
        DaySet(0)
    }

    /// Lenient normalization: entries that do not coerce to `0..=6` are
    /// dropped and duplicates collapse.
    pub fn from_values(values: &[DayValue]) -> Self {
        values.iter().filter_map(DayValue::weekday).collect()
    }

    /// Strict normalization for writes: every entry must coerce to `0..=6`.
    pub fn try_from_values(values: &[DayValue]) -> Result<Self, HoursError> {
        values
            .iter()
            .map(|v| v.weekday().ok_or_else(|| HoursError::InvalidDay(v.to_string())))
            .collect()
    }

    /// Adds `day`; values outside `0..=6` are ignored.
    pub fn insert(&mut self, day: u8) {
        if day < 7 {
            self.0 |= 1 << day;
        }
    }

    pub fn contains(&self, day: u8) -> bool {
        day < 7 && self.0 & (1 << day) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Weekdays in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..7u8).filter(move |d| self.contains(*d))
    }
}

impl FromIterator<u8> for DaySet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = DaySet::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl fmt::Debug for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Serialize for DaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
