use super::session_state::SessionState;
use crate::utils::time::iso_millis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakInterval {
    #[serde(with = "iso_millis")]
    pub start: DateTime<Utc>,
    #[serde(default, with = "iso_millis::option")]
    pub end: Option<DateTime<Utc>>, // None ⇔ break still ongoing
}

impl BreakInterval {
    pub fn open(start: DateTime<Utc>) -> Self {
        Self { start, end: None }
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }
}

/// One user's work day.
///
/// The lifecycle state is not a field: [`WorkRecord::state`] derives it from
/// `start`, `breaks` and `end`, so it cannot drift from the timestamps. It is
/// still written to disk (`state`) to keep the document format stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredWorkRecord", into = "StoredWorkRecord")]
pub struct WorkRecord {
    pub start: Option<DateTime<Utc>>,
    pub breaks: Vec<BreakInterval>,
    pub end: Option<DateTime<Utc>>,
    pub summary_message_id: Option<String>,
}

impl WorkRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        if self.end.is_some() {
            SessionState::Ended
        } else if self.has_open_break() {
            SessionState::OnBreak
        } else if self.start.is_some() {
            SessionState::Started
        } else {
            SessionState::NotStarted
        }
    }

    /// Only the last break can be open; earlier ones are closed by EndBreak
    /// before a new one is appended.
    pub fn has_open_break(&self) -> bool {
        self.breaks.last().is_some_and(BreakInterval::is_open)
    }

    pub fn open_break_mut(&mut self) -> Option<&mut BreakInterval> {
        self.breaks.last_mut().filter(|b| b.is_open())
    }
}

/// On-disk shape of a record (`summaryMessageId` is camelCase in the
/// document).
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredWorkRecord {
    #[serde(default, with = "iso_millis::option")]
    start: Option<DateTime<Utc>>,
    #[serde(default)]
    breaks: Vec<BreakInterval>,
    #[serde(default, with = "iso_millis::option")]
    end: Option<DateTime<Utc>>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    summary_message_id: Option<String>,
}

impl From<StoredWorkRecord> for WorkRecord {
    fn from(stored: StoredWorkRecord) -> Self {
        let record = WorkRecord {
            start: stored.start,
            breaks: stored.breaks,
            end: stored.end,
            summary_message_id: stored.summary_message_id,
        };

        if let Some(stored_state) = stored.state.as_deref()
            && SessionState::from_stored(stored_state) != Some(record.state())
        {
            tracing::warn!(
                stored = stored_state,
                derived = record.state().as_str(),
                "Stored state disagrees with timestamps, using derived state"
            );
        }

        record
    }
}

impl From<WorkRecord> for StoredWorkRecord {
    fn from(record: WorkRecord) -> Self {
        let state = Some(record.state().as_str().to_string());
        StoredWorkRecord {
            start: record.start,
            breaks: record.breaks,
            end: record.end,
            state,
            summary_message_id: record.summary_message_id,
        }
    }
}
