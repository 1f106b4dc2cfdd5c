//! Administrative edits of existing records.
//!
//! Overrides bypass the state machine's guards: `end` can be set on a record
//! that never started, and break timestamps are written as given. The
//! lifecycle state still follows from the timestamps afterwards (setting
//! `end` always yields `Ended`).

use crate::errors::{AppError, AppResult};
use crate::models::{BreakPart, OverrideField, WorkRecord};
use crate::store::SessionStore;
use crate::utils::time;
use crate::utils::zone::Zone;
use chrono::{DateTime, NaiveDate, Utc};

pub struct AmendLogic;

impl AmendLogic {
    /// Validate `field` and `raw_value` (against the record's own date), then
    /// apply the edit to the existing (user, date) record and persist it.
    pub fn apply(
        store: &SessionStore,
        user_id: &str,
        date: NaiveDate,
        field: &str,
        raw_value: &str,
        zone: Zone,
    ) -> AppResult<WorkRecord> {
        let field = OverrideField::parse(field)?;
        let value = time::normalize_in(date, raw_value, zone)?;

        let updated = store.update_existing(user_id, date, |current| {
            Self::amend(current, field, value)
        })?;

        tracing::info!(
            user_id,
            %date,
            %field,
            value = %time::canonical(value),
            state = %updated.state(),
            "Work record overridden"
        );

        Ok(updated)
    }

    pub fn amend(
        record: &WorkRecord,
        field: OverrideField,
        value: DateTime<Utc>,
    ) -> AppResult<WorkRecord> {
        let mut next = record.clone();

        match field {
            OverrideField::Start => next.start = Some(value),
            OverrideField::End => next.end = Some(value),
            OverrideField::Break { number, part } => {
                let count = next.breaks.len();
                let entry = next
                    .breaks
                    .get_mut(number - 1)
                    .ok_or(AppError::InvalidBreakIndex {
                        index: number,
                        count,
                    })?;
                match part {
                    BreakPart::Start => entry.start = value,
                    BreakPart::End => entry.end = Some(value),
                }
            }
        }

        Ok(next)
    }
}
