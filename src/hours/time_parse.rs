use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use super::HoursError;

/// Minutes since local midnight, `0..=1439`.
pub type MinuteOfDay = u16;

pub const MINUTES_PER_DAY: u16 = 24 * 60;

lazy_static! {
    // `H:MM` / `HH:MM`, optionally followed by an AM/PM marker.
    static ref LENIENT_RE: Regex =
        Regex::new(r"^([0-9]{1,2}):([0-9]{2})(?:\s*([AaPp][Mm]))?$").unwrap();
    static ref STRICT_RE: Regex = Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9])$").unwrap();
}

/// Reads a stored open/close time.
///
/// Accepts 24-hour `H:MM`/`HH:MM` and 12-hour `H:MM AM`/`HH:MM pm` (space
/// optional, marker case-insensitive). Records written before strict
/// validation existed may still hold the 12-hour form. Returns `None` for
/// anything else; callers must treat that as "unknown", never as midnight.
pub fn parse_time(text: &str) -> Option<MinuteOfDay> {
    let caps = LENIENT_RE.captures(text.trim())?;
    let hour: u16 = caps[1].parse().ok()?;
    let minute: u16 = caps[2].parse().ok()?;
    if minute > 59 {
        return None;
    }

    let hour = match caps.get(3).map(|m| m.as_str().to_ascii_uppercase()) {
        None if hour <= 23 => hour,
        None => return None,
        Some(_) if !(1..=12).contains(&hour) => return None,
        Some(meridiem) if meridiem == "AM" => hour % 12,
        Some(_) if hour == 12 => 12,
        Some(_) => hour + 12,
    };

    Some(hour * 60 + minute)
}

/// [`parse_time`] over a loosely typed JSON value. Non-strings never parse.
pub fn parse_time_value(value: &Value) -> Option<MinuteOfDay> {
    value.as_str().and_then(parse_time)
}

/// Writer-side check: only zero-padded 24-hour `HH:MM` passes.
pub fn validate_time_strict(field: &'static str, text: &str) -> Result<MinuteOfDay, HoursError> {
    let invalid = || HoursError::InvalidTime {
        field,
        value: text.to_string(),
    };
    let caps = STRICT_RE.captures(text).ok_or_else(invalid)?;
    let hour: u16 = caps[1].parse().map_err(|_| invalid())?;
    let minute: u16 = caps[2].parse().map_err(|_| invalid())?;
    Ok(hour * 60 + minute)
}

/// Canonical `HH:MM` rendering used when persisting validated hours.
pub fn format_minutes(minutes: MinuteOfDay) -> String {
    let minutes = minutes % MINUTES_PER_DAY;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_every_24_hour_value() {
        for h in 0..24u16 {
            for m in 0..60u16 {
                let padded = format!("{:02}:{:02}", h, m);
                assert_eq!(parse_time(&padded), Some(h * 60 + m), "{padded}");
                let short = format!("{}:{:02}", h, m);
                assert_eq!(parse_time(&short), Some(h * 60 + m), "{short}");
            }
        }
    }

    #[test]
    fn parses_12_hour_values() {
        assert_eq!(parse_time("12:00 AM"), Some(0));
        assert_eq!(parse_time("12:30 am"), Some(30));
        assert_eq!(parse_time("12:00 PM"), Some(720));
        assert_eq!(parse_time("1:30 PM"), Some(810));
        assert_eq!(parse_time("01:30pm"), Some(810));
        assert_eq!(parse_time("11:59 PM"), Some(1439));
        assert_eq!(parse_time("9:15 Am"), Some(555));
    }

    #[test]
    fn every_12_hour_value_matches_its_24_hour_equivalent() {
        for h in 1..=12u16 {
            for m in [0u16, 1, 30, 59] {
                let am = format!("{}:{:02} AM", h, m);
                let pm = format!("{}:{:02} PM", h, m);
                assert_eq!(parse_time(&am), Some((h % 12) * 60 + m), "{am}");
                assert_eq!(parse_time(&pm), Some((h % 12 + 12) * 60 + m), "{pm}");
            }
        }
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(parse_time("  09:00\n"), Some(540));
        assert_eq!(parse_time("\t7:05 PM "), Some(1145));
    }

    #[test]
    fn rejects_malformed_values() {
        for bad in [
            "", "   ", "25:00", "24:00", "13:00 AM", "0:30 PM", "9:5", "09:60", "9", "9:00:00",
            "123:00", "nine", "09:00 XM", "-1:00",
        ] {
            assert_eq!(parse_time(bad), None, "{bad:?} should not parse");
        }
    }

    #[test]
    fn non_string_values_do_not_parse() {
        assert_eq!(parse_time_value(&json!(540)), None);
        assert_eq!(parse_time_value(&json!(null)), None);
        assert_eq!(parse_time_value(&json!(["09:00"])), None);
        assert_eq!(parse_time_value(&json!("09:00")), Some(540));
    }

    #[test]
    fn strict_validation_only_accepts_padded_24_hour() {
        assert_eq!(validate_time_strict("openTime", "00:00"), Ok(0));
        assert_eq!(validate_time_strict("openTime", "23:59"), Ok(1439));
        for bad in ["9:00", "09:00 AM", " 09:00", "24:00", "12:60", ""] {
            assert_eq!(
                validate_time_strict("closeTime", bad),
                Err(HoursError::InvalidTime {
                    field: "closeTime",
                    value: bad.to_string()
                }),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn formats_canonical_time() {
        assert_eq!(format_minutes(0), "00:00");
        assert_eq!(format_minutes(810), "13:30");
        assert_eq!(format_minutes(1439), "23:59");
    }
}
