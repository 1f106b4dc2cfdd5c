//! View data for a work day: the record plus the figures a summary shows.

use crate::models::{SessionState, WorkRecord};
use crate::utils::time::minutes_between;
use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakSpan {
    pub number: usize, // 1-based, as used by break-N-* overrides
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkLogView {
    pub user_id: String,
    pub date: NaiveDate,
    pub weekday: String,
    pub state: SessionState,
    pub record: WorkRecord,
    pub breaks: Vec<BreakSpan>,
    pub break_minutes: i64,
    /// Time between start and end (or `now` while running) minus breaks.
    /// `None` until work has started.
    pub worked_minutes: Option<i64>,
}

impl WorkLogView {
    /// Open breaks are counted up to the record's end, or up to `now` while
    /// the day is still running.
    pub fn build(user_id: &str, date: NaiveDate, record: WorkRecord, now: DateTime<Utc>) -> Self {
        let horizon = record.end.unwrap_or(now);

        let breaks: Vec<BreakSpan> = record
            .breaks
            .iter()
            .enumerate()
            .map(|(i, b)| BreakSpan {
                number: i + 1,
                start: b.start,
                end: b.end,
                minutes: minutes_between(b.start, b.end.unwrap_or(horizon)).max(0),
            })
            .collect();

        let break_minutes: i64 = breaks.iter().map(|b| b.minutes).sum();
        let worked_minutes = record
            .start
            .map(|start| (minutes_between(start, horizon) - break_minutes).max(0));

        Self {
            user_id: user_id.to_string(),
            date,
            weekday: date.format("%A").to_string(),
            state: record.state(),
            record,
            breaks,
            break_minutes,
            worked_minutes,
        }
    }
}
