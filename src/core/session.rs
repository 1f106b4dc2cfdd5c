//! Work-session state machine.
//!
//! Pure transition logic: given the current record, an event and the current
//! instant, compute the next record or reject the event. Nothing here touches
//! storage; rejected events never produce a new record.
//!
//! ```text
//! NotStarted --Start--> Started --BeginBreak--> OnBreak
//!                          ^                       |
//!                          +-------EndBreak--------+
//! Started | OnBreak --End--> Ended (terminal)
//! ```
//!
//! Ending while on a break leaves that break open; nothing closes it
//! implicitly.

use crate::errors::{AppError, AppResult};
use crate::models::{BreakInterval, SessionEvent, SessionState, WorkRecord};
use chrono::{DateTime, NaiveDate, Utc};

pub struct SessionMachine;

impl SessionMachine {
    /// Apply `event` to `record` at instant `now`.
    ///
    /// `issued_for` is the state the triggering control was rendered for (a
    /// button shown while `Started`, say). When present and no longer equal to
    /// the record's state, the control is stale and the event is rejected with
    /// `InvalidTransition`.
    pub fn apply(
        record: &WorkRecord,
        date: NaiveDate,
        event: SessionEvent,
        now: DateTime<Utc>,
        issued_for: Option<SessionState>,
    ) -> AppResult<WorkRecord> {
        let state = record.state();

        if state == SessionState::Ended {
            return Err(AppError::SessionEnded(date.to_string()));
        }

        if state == SessionState::NotStarted {
            return match event {
                SessionEvent::Start => {
                    let mut next = record.clone();
                    next.start = Some(now);
                    Ok(next)
                }
                _ => Err(AppError::SessionNotStarted(date.to_string())),
            };
        }

        if let Some(expected) = issued_for
            && expected != state
        {
            return Err(AppError::InvalidTransition(format!(
                "{} was issued while {} but the session is now {}",
                event,
                expected.label().to_lowercase(),
                state.label().to_lowercase()
            )));
        }

        let mut next = record.clone();

        match (state, event) {
            (_, SessionEvent::Start) => {
                return Err(AppError::InvalidTransition(format!(
                    "work already started on {}",
                    date
                )));
            }
            (_, SessionEvent::Resume) => {}
            (SessionState::Started, SessionEvent::BeginBreak) => {
                next.breaks.push(BreakInterval::open(now));
            }
            (_, SessionEvent::BeginBreak) => {
                return Err(AppError::InvalidTransition(
                    "a break is already in progress".into(),
                ));
            }
            (SessionState::OnBreak, SessionEvent::EndBreak) => {
                if let Some(open) = next.open_break_mut() {
                    open.end = Some(now);
                }
            }
            (_, SessionEvent::EndBreak) => {
                return Err(AppError::InvalidTransition("no break in progress".into()));
            }
            (_, SessionEvent::End) => {
                if record.start.is_none() {
                    return Err(AppError::SessionNotStarted(date.to_string()));
                }
                next.end = Some(now);
            }
        }

        Ok(next)
    }
}
