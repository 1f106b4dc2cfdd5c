//! Text rendering of work records for the terminal.

use crate::core::summary::WorkLogView;
use crate::models::WorkRecord;
use crate::utils::colors::{colorize_optional, colorize_state};
use crate::utils::formatting::{bold, mins2readable, pad_right};
use crate::utils::zone::Zone;
use chrono::{DateTime, Utc};

const LABEL_WIDTH: usize = 12;

fn clock_or_na(ts: Option<DateTime<Utc>>, zone: Zone) -> String {
    ts.map(|t| zone.clock_time(t)).unwrap_or_else(|| "N/A".to_string())
}

fn line(label: &str, value: &str) -> String {
    format!("{} {}\n", bold(&pad_right(label, LABEL_WIDTH)), value)
}

/// One line per break: `Break 1: 12:00:00 - 12:30:00 (30 min)`.
pub fn break_lines(view: &WorkLogView, zone: Zone) -> Vec<String> {
    view.breaks
        .iter()
        .map(|b| {
            let end = match b.end {
                Some(end) => zone.clock_time(end),
                None => colorize_optional("Ongoing"),
            };
            format!(
                "Break {}: {} - {} ({} min)",
                b.number,
                zone.clock_time(b.start),
                end,
                b.minutes
            )
        })
        .collect()
}

/// Daily work summary: user, date, day, start, breaks, end, totals.
pub fn work_summary(view: &WorkLogView, display_name: &str, zone: Zone) -> String {
    let mut out = String::new();

    out.push_str(&line("User", display_name));
    out.push_str(&line("Date", &view.date.to_string()));
    out.push_str(&line("Day", &view.weekday));
    out.push_str(&line("State", &colorize_state(view.state)));
    out.push_str(&line(
        "Started At",
        &colorize_optional(&clock_or_na(view.record.start, zone)),
    ));

    let breaks = break_lines(view, zone);
    if breaks.is_empty() {
        out.push_str(&line("Breaks", &colorize_optional("No breaks")));
    } else {
        for (i, b) in breaks.iter().enumerate() {
            let label = if i == 0 { "Breaks" } else { "" };
            out.push_str(&line(label, b));
        }
    }

    out.push_str(&line(
        "Ended At",
        &colorize_optional(&clock_or_na(view.record.end, zone)),
    ));
    out.push_str(&line("Break time", &mins2readable(view.break_minutes, false, false)));

    let worked = view
        .worked_minutes
        .map(|m| mins2readable(m, false, false))
        .unwrap_or_else(|| "N/A".to_string());
    out.push_str(&line("Worked", &colorize_optional(&worked)));

    out
}

/// Short status used after start/resume/break commands.
pub fn status_line(record: &WorkRecord, zone: Zone) -> String {
    let since = match (record.breaks.last(), record.start) {
        (Some(b), _) if b.is_open() => format!(" since {}", zone.clock_time(b.start)),
        (_, Some(start)) if record.end.is_none() => {
            format!(" (started at {})", zone.clock_time(start))
        }
        _ => String::new(),
    };
    format!("Current state: {}{}", colorize_state(record.state()), since)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BreakInterval;
    use crate::utils::time::parse_stored;
    use chrono::NaiveDate;

    fn ts(hhmm: &str) -> DateTime<Utc> {
        parse_stored(&format!("2025-06-07T{}:00Z", hhmm)).unwrap()
    }

    fn view(end: Option<&str>) -> WorkLogView {
        let record = WorkRecord {
            start: Some(ts("09:00")),
            breaks: vec![
                BreakInterval {
                    start: ts("12:00"),
                    end: Some(ts("12:30")),
                },
                BreakInterval::open(ts("15:00")),
            ],
            end: end.map(ts),
            summary_message_id: None,
        };
        WorkLogView::build(
            "42",
            NaiveDate::from_ymd_opt(2025, 6, 7).unwrap(),
            record,
            ts("15:10"),
        )
    }

    #[test]
    fn summary_lists_breaks_and_marks_ongoing() {
        let out = work_summary(&view(None), "alice", Zone::utc());
        assert!(out.contains("alice"));
        assert!(out.contains("Saturday"));
        assert!(out.contains("Break 1: 12:00:00 - 12:30:00 (30 min)"));
        assert!(out.contains("Break 2: 15:00:00 - "));
        assert!(out.contains("Ongoing"));
        assert!(out.contains("09:00:00"));
    }

    #[test]
    fn status_line_mentions_open_break() {
        let v = view(None);
        let line = status_line(&v.record, Zone::utc());
        assert!(line.contains("On break"));
        assert!(line.contains("since 15:00:00"));
    }
}
