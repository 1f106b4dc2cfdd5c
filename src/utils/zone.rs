//! Wall-clock zone used to interpret bare times and to resolve "today".

use crate::errors::{AppError, AppResult};
use chrono::{
    DateTime, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc,
};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    /// The operating system's local zone (DST aware).
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl Zone {
    pub fn utc() -> Self {
        Zone::Fixed(Utc.fix())
    }

    /// Accepts `local`, `utc`/`z`, or an offset such as `+02:00`.
    pub fn parse(s: &str) -> AppResult<Self> {
        let t = s.trim();
        match t.to_lowercase().as_str() {
            "local" | "" => return Ok(Zone::Local),
            "utc" | "z" => return Ok(Zone::utc()),
            _ => {}
        }

        t.parse::<FixedOffset>()
            .map(Zone::Fixed)
            .map_err(|_| AppError::Config(format!("Invalid timezone '{}'", s)))
    }

    /// Resolve a wall-clock datetime in this zone to an absolute UTC instant.
    pub fn to_utc(&self, naive: NaiveDateTime) -> AppResult<DateTime<Utc>> {
        let resolved = match self {
            Zone::Local => resolve(Local.from_local_datetime(&naive)),
            Zone::Fixed(offset) => resolve(offset.from_local_datetime(&naive)),
        };

        resolved.ok_or_else(|| {
            AppError::InvalidTimeFormat(format!("{} does not exist in the {} zone", naive, self))
        })
    }

    /// Calendar date of `ts` as seen in this zone.
    pub fn date_of(&self, ts: DateTime<Utc>) -> NaiveDate {
        self.naive_of(ts).date()
    }

    pub fn naive_of(&self, ts: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Zone::Local => ts.with_timezone(&Local).naive_local(),
            Zone::Fixed(offset) => ts.with_timezone(offset).naive_local(),
        }
    }

    /// `HH:MM:SS` in this zone, for display.
    pub fn clock_time(&self, ts: DateTime<Utc>) -> String {
        self.naive_of(ts).format("%H:%M:%S").to_string()
    }
}

// Ambiguous wall-clock times (DST fall-back) resolve to the earlier instant.
fn resolve<Tz: TimeZone>(result: LocalResult<DateTime<Tz>>) -> Option<DateTime<Utc>> {
    match result {
        LocalResult::Single(t) | LocalResult::Ambiguous(t, _) => Some(t.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Local => f.write_str("local"),
            Zone::Fixed(offset) if offset.local_minus_utc() == 0 => f.write_str("utc"),
            Zone::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parses_named_and_offset_zones() {
        assert_eq!(Zone::parse("local").unwrap(), Zone::Local);
        assert_eq!(Zone::parse("UTC").unwrap(), Zone::utc());
        let plus_two = Zone::parse("+02:00").unwrap();
        assert_eq!(plus_two.to_string(), "+02:00");
        assert!(Zone::parse("mars/olympus").is_err());
    }

    #[test]
    fn fixed_offset_shifts_to_utc() {
        let zone = Zone::parse("+02:00").unwrap();
        let naive = NaiveDate::from_ymd_opt(2025, 6, 7)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let utc = zone.to_utc(naive).unwrap();
        assert_eq!(utc.to_rfc3339(), "2025-06-07T07:00:00+00:00");
        assert_eq!(zone.clock_time(utc), "09:00:00");
    }

    #[test]
    fn date_of_respects_offset() {
        let zone = Zone::parse("-05:00").unwrap();
        let ts = DateTime::parse_from_rfc3339("2025-06-08T02:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(zone.date_of(ts), NaiveDate::from_ymd_opt(2025, 6, 7).unwrap());
    }
}
