//! Serde helpers for TIME and DATE wire formats.
//!
//! Clients send clock times as "HH:MM" or "HH:MM:SS" and dates as
//! "YYYY-MM-DD"; the stock `time` serde impls want subsecond precision, so
//! TIME fields use `#[serde(with = "crate::timefmt")]` instead.

use serde::{de, Deserialize, Deserializer, Serializer};
use time::macros::format_description;
use time::{Date, Time};

pub fn parse_time(raw: &str) -> Option<Time> {
    let full = format_description!("[hour]:[minute]:[second]");
    let short = format_description!("[hour]:[minute]");
    Time::parse(raw, full)
        .or_else(|_| Time::parse(raw, short))
        .ok()
}

pub fn parse_date(raw: &str) -> Option<Date> {
    let fmt = format_description!("[year]-[month]-[day]");
    Date::parse(raw, fmt).ok()
}

/// "09:30"
pub fn hhmm(t: Time) -> String {
    let fmt = format_description!("[hour]:[minute]");
    t.format(fmt).unwrap_or_else(|_| t.to_string())
}

pub fn serialize<S: Serializer>(t: &Time, s: S) -> Result<S::Ok, S::Error> {
    let fmt = format_description!("[hour]:[minute]:[second]");
    let out = t.format(fmt).map_err(serde::ser::Error::custom)?;
    s.serialize_str(&out)
}

pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Time, D::Error> {
    let raw = String::deserialize(d)?;
    parse_time(&raw).ok_or_else(|| de::Error::custom("expected HH:MM or HH:MM:SS"))
}

/// `#[serde(with = "crate::timefmt::option")]` for `Option<Time>` fields.
pub mod option {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use time::Time;

    pub fn serialize<S: Serializer>(t: &Option<Time>, s: S) -> Result<S::Ok, S::Error> {
        match t {
            Some(t) => super::serialize(t, s),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Time>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        match raw {
            None => Ok(None),
            Some(raw) => super::parse_time(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom("expected HH:MM or HH:MM:SS")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, time};

    #[test]
    fn parses_short_and_full_times() {
        assert_eq!(parse_time("09:30"), Some(time!(9:30)));
        assert_eq!(parse_time("09:30:15"), Some(time!(9:30:15)));
        assert_eq!(parse_time("24:00"), None);
        assert_eq!(parse_time("half past nine"), None);
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_date("2025-03-14"), Some(date!(2025 - 03 - 14)));
        assert_eq!(parse_date("14/03/2025"), None);
        assert_eq!(parse_date("2025-02-30"), None);
    }

    #[test]
    fn hhmm_formatting() {
        assert_eq!(hhmm(time!(9:05)), "09:05");
        assert_eq!(hhmm(time!(16:30)), "16:30");
    }
}
