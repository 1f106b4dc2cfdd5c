//! Time utilities: normalizing free-form time input into canonical UTC
//! timestamps, the stored timestamp format, and minute formatting.
//!
//! Accepted input:
//! - bare wall-clock times `H[:MM[:SS]] [am|pm]` (case-insensitive), taken
//!   on the record's date in the configured zone;
//! - full timestamps: RFC 3339 (`2025-06-07T14:30:00Z`, `...+02:00`), ISO 8601
//!   with a looser offset (`...T14:30Z`, `...T14:30:00.000+0200`), or a
//!   zone-less `YYYY-MM-DD[T ]HH:MM[:SS[.fff]]`, read in the configured zone;
//! - a bare date `YYYY-MM-DD`, taken as midnight UTC.
//!
//! Everything is stored as `YYYY-MM-DDTHH:MM:SS.mmmZ`, so parsed instants are
//! truncated to milliseconds.

use crate::errors::{AppError, AppResult};
use crate::utils::zone::Zone;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, SubsecRound, Utc};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static BARE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{1,2})(?::(\d{2})(?::(\d{2}))?)?\s*(am|pm)?$").unwrap()
});

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Normalize `raw` against `date` using the operating system's local zone.
pub fn normalize(date: NaiveDate, raw: &str) -> AppResult<DateTime<Utc>> {
    normalize_in(date, raw, Zone::Local)
}

pub fn normalize_in(date: NaiveDate, raw: &str, zone: Zone) -> AppResult<DateTime<Utc>> {
    let ts = parse_any(date, raw.trim(), zone).ok_or_else(|| invalid(raw))??;
    Ok(ts.trunc_subsecs(3))
}

fn parse_any(date: NaiveDate, s: &str, zone: Zone) -> Option<AppResult<DateTime<Utc>>> {
    if let Some(caps) = BARE_TIME.captures(s) {
        return Some(
            bare_time(&caps)
                .ok_or_else(|| invalid(s))
                .and_then(|time| zone.to_utc(date.and_time(time))),
        );
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(Ok(ts.with_timezone(&Utc)));
    }

    if let Some(ts) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    {
        return Some(Ok(ts.with_timezone(&Utc)));
    }

    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(zone.to_utc(naive));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|day| Ok(day.and_time(NaiveTime::MIN).and_utc()))
}

fn bare_time(caps: &Captures) -> Option<NaiveTime> {
    let mut hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    let second: u32 = match caps.get(3) {
        Some(s) => s.as_str().parse().ok()?,
        None => 0,
    };

    if let Some(meridiem) = caps.get(4) {
        let pm = meridiem.as_str().eq_ignore_ascii_case("pm");
        if pm && hour < 12 {
            hour += 12;
        } else if !pm && hour == 12 {
            hour = 0;
        }
    }

    NaiveTime::from_hms_opt(hour, minute, second)
}

fn invalid(raw: &str) -> AppError {
    AppError::InvalidTimeFormat(format!(
        "'{}' (use YYYY-MM-DDTHH:mm:ssZ or a time such as 2:28:40 am)",
        raw
    ))
}

/// Canonical stored form: UTC, millisecond precision, `Z` suffix.
pub fn canonical(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_stored(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| invalid(raw))
}

pub fn minutes_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_minutes()
}

/// Serde adapter writing `DateTime<Utc>` in the canonical stored form and
/// reading any RFC 3339 timestamp.
pub mod iso_millis {
    use super::{canonical, parse_stored};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&canonical(*ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse_stored(&raw).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use super::{canonical, parse_stored};
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            ts: &Option<DateTime<Utc>>,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            match ts {
                Some(ts) => s.serialize_str(&canonical(*ts)),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(d)? {
                Some(raw) => parse_stored(&raw)
                    .map(Some)
                    .map_err(serde::de::Error::custom),
                None => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 7).unwrap()
    }

    fn at_utc(raw: &str) -> String {
        canonical(normalize_in(day(), raw, Zone::utc()).unwrap())
    }

    #[test]
    fn bare_times_follow_meridiem_rules() {
        assert_eq!(at_utc("5:00 pm"), "2025-06-07T17:00:00.000Z");
        assert_eq!(at_utc("5:00PM"), "2025-06-07T17:00:00.000Z");
        assert_eq!(at_utc("12:15 pm"), "2025-06-07T12:15:00.000Z");
        assert_eq!(at_utc("12:15 am"), "2025-06-07T00:15:00.000Z");
        assert_eq!(at_utc("2:28:40 am"), "2025-06-07T02:28:40.000Z");
        assert_eq!(at_utc("14:05"), "2025-06-07T14:05:00.000Z");
        assert_eq!(at_utc("9"), "2025-06-07T09:00:00.000Z");
        assert_eq!(at_utc("7 pm"), "2025-06-07T19:00:00.000Z");
    }

    #[test]
    fn bare_time_uses_configured_zone() {
        let zone = Zone::parse("+02:00").unwrap();
        let ts = normalize_in(day(), "09:00", zone).unwrap();
        assert_eq!(canonical(ts), "2025-06-07T07:00:00.000Z");
    }

    #[test]
    fn full_timestamps_are_utc_normalized() {
        assert_eq!(at_utc("2025-06-07T14:30:00Z"), "2025-06-07T14:30:00.000Z");
        assert_eq!(
            at_utc("2025-06-07T14:30:00+02:00"),
            "2025-06-07T12:30:00.000Z"
        );
        assert_eq!(at_utc("2025-06-08 08:15"), "2025-06-08T08:15:00.000Z");
        assert_eq!(at_utc("2025-06-08T08:15:30.250"), "2025-06-08T08:15:30.250Z");
    }

    #[test]
    fn loose_iso_forms_are_accepted() {
        assert_eq!(at_utc("2025-06-07T14:30Z"), "2025-06-07T14:30:00.000Z");
        assert_eq!(
            at_utc("2025-06-07T14:30:00.000+0200"),
            "2025-06-07T12:30:00.000Z"
        );
        assert_eq!(at_utc("2025-06-07T14:30+02:00"), "2025-06-07T12:30:00.000Z");
        assert_eq!(at_utc("2025-06-07 14:30:00-0130"), "2025-06-07T16:00:00.000Z");
    }

    #[test]
    fn bare_date_is_utc_midnight() {
        let zone = Zone::parse("+02:00").unwrap();
        let ts = normalize_in(day(), "2025-06-09", zone).unwrap();
        assert_eq!(canonical(ts), "2025-06-09T00:00:00.000Z");
    }

    #[test]
    fn sub_millisecond_precision_is_dropped() {
        let ts = normalize_in(day(), "2025-06-07T14:30:00.123456789Z", Zone::utc()).unwrap();
        assert_eq!(canonical(ts), "2025-06-07T14:30:00.123Z");
        assert_eq!(parse_stored(&canonical(ts)).unwrap(), ts);
    }

    #[test]
    fn canonical_output_is_a_fixed_point() {
        let first = at_utc("2025-06-07T14:30:00+02:00");
        let second = at_utc(&first);
        assert_eq!(first, second);
    }

    #[test]
    fn garbage_and_out_of_range_values_are_rejected() {
        for raw in ["", "noon", "25:00", "10:61", "10:00:75", "2025-13-01T00:00:00Z", "123"] {
            let err = normalize_in(day(), raw, Zone::utc()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidTimeFormat, "input: {raw:?}");
        }
    }

    #[test]
    fn explicit_offsets_ignore_the_local_zone() {
        let ts = normalize(day(), "2025-06-07T16:30:00+02:00").unwrap();
        assert_eq!(canonical(ts), "2025-06-07T14:30:00.000Z");
    }
}
