use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{format_minutes, DaySet, DayValue, MinuteOfDay};

/// A stored open/close time: a string when well formed, anything else otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeField {
    Text(String),
    Malformed(Value),
}

impl TimeField {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TimeField::Text(s) => Some(s),
            TimeField::Malformed(_) => None,
        }
    }
}

/// A stored `days` field: a list of loosely typed entries, or something that
/// is not a list at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DaysField {
    List(Vec<DayValue>),
    Malformed(Value),
}

/// Operating hours as held on a vendor record.
///
/// Every field is optional and loosely typed because records are read back
/// exactly as stored, including legacy 12-hour strings and hand-edited day
/// lists. Evaluation copes with all of that; see [`super::is_open_at`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingHours {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_time: Option<TimeField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_time: Option<TimeField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<DaysField>,
}

impl OperatingHours {
    /// Canonical record: `HH:MM` times and an ascending, duplicate-free day list.
    pub fn canonical(open: MinuteOfDay, close: MinuteOfDay, days: DaySet) -> Self {
        Self {
            open_time: Some(TimeField::Text(format_minutes(open))),
            close_time: Some(TimeField::Text(format_minutes(close))),
            days: Some(DaysField::List(days.iter().map(DayValue::from).collect())),
        }
    }
}
