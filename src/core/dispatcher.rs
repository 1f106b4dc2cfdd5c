//! Event dispatcher: the inbound API used by the transport layer.
//!
//! Resolves the (user, date) key for each event, checks the admin role for
//! admin calls before the store is touched, routes to the state machine or
//! the override engine, and hands records or view data back. It never
//! formats user-facing text.

use crate::config::Config;
use crate::core::amend::AmendLogic;
use crate::core::clock::Clock;
use crate::core::session::SessionMachine;
use crate::core::summary::WorkLogView;
use crate::errors::{AppError, AppResult};
use crate::models::{SessionEvent, SessionState, WorkRecord};
use crate::store::SessionStore;
use crate::utils::zone::Zone;
use chrono::{NaiveDate, SubsecRound};
use std::sync::Arc;

pub struct Dispatcher {
    store: Arc<SessionStore>,
    clock: Arc<dyn Clock>,
    zone: Zone,
    admin_role: String,
}

impl Dispatcher {
    pub fn new(store: Arc<SessionStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            zone: Zone::Local,
            admin_role: "Admin".to_string(),
        }
    }

    pub fn from_config(cfg: &Config, store: Arc<SessionStore>, clock: Arc<dyn Clock>) -> AppResult<Self> {
        Ok(Self::new(store, clock)
            .with_zone(cfg.zone()?)
            .with_admin_role(&cfg.admin_role))
    }

    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }

    pub fn with_admin_role(mut self, role: &str) -> Self {
        self.admin_role = role.to_string();
        self
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Today's date key in the configured zone.
    pub fn today(&self) -> NaiveDate {
        self.zone.date_of(self.clock.now())
    }

    // ---------------------------
    // Session events
    // ---------------------------

    pub fn on_start_command(&self, user_id: &str, username: &str) -> AppResult<WorkRecord> {
        tracing::debug!(user_id, username, "Start command received");
        self.handle_event(user_id, SessionEvent::Start, None)
    }

    pub fn on_resume_command(&self, user_id: &str) -> AppResult<WorkRecord> {
        self.handle_event(user_id, SessionEvent::Resume, None)
    }

    pub fn on_begin_break_button(
        &self,
        user_id: &str,
        issued_for: Option<SessionState>,
    ) -> AppResult<WorkRecord> {
        self.handle_event(user_id, SessionEvent::BeginBreak, issued_for)
    }

    pub fn on_end_break_button(
        &self,
        user_id: &str,
        issued_for: Option<SessionState>,
    ) -> AppResult<WorkRecord> {
        self.handle_event(user_id, SessionEvent::EndBreak, issued_for)
    }

    pub fn on_end_button(
        &self,
        user_id: &str,
        issued_for: Option<SessionState>,
    ) -> AppResult<WorkRecord> {
        self.handle_event(user_id, SessionEvent::End, issued_for)
    }

    fn handle_event(
        &self,
        user_id: &str,
        event: SessionEvent,
        issued_for: Option<SessionState>,
    ) -> AppResult<WorkRecord> {
        // Stored timestamps carry milliseconds; the mirror must hold the same.
        let now = self.clock.now().trunc_subsecs(3);
        let date = self.zone.date_of(now);

        let result = self.store.upsert(user_id, date, |current| {
            SessionMachine::apply(current, date, event, now, issued_for)
        });

        match &result {
            Ok(record) if event.is_mutating() => tracing::info!(
                user_id,
                %date,
                %event,
                state = %record.state(),
                "Session event applied"
            ),
            Ok(_) => {}
            Err(err) if err.is_store_failure() => tracing::error!(
                user_id,
                %date,
                %event,
                error = %err,
                "Session event could not be persisted"
            ),
            Err(err) => tracing::debug!(user_id, %date, %event, error = %err, "Session event rejected"),
        }

        result
    }

    // ---------------------------
    // Views
    // ---------------------------

    /// The user's record for `date` (default: today).
    pub fn on_view_log(&self, user_id: &str, date: Option<NaiveDate>) -> AppResult<WorkLogView> {
        let date = date.unwrap_or_else(|| self.today());
        self.view(user_id, date)
    }

    /// Every date the user has a record for, with its state.
    pub fn on_list(&self, user_id: &str) -> Vec<(NaiveDate, SessionState)> {
        self.store.dates_for(user_id)
    }

    /// Remember the id of the summary message the transport published.
    pub fn record_summary_message(
        &self,
        user_id: &str,
        date: NaiveDate,
        message_id: &str,
    ) -> AppResult<WorkRecord> {
        self.store.update_existing(user_id, date, |current| {
            let mut next = current.clone();
            next.summary_message_id = Some(message_id.to_string());
            Ok(next)
        })
    }

    fn view(&self, user_id: &str, date: NaiveDate) -> AppResult<WorkLogView> {
        let record = self
            .store
            .get(user_id, date)
            .ok_or_else(|| AppError::RecordNotFound {
                user_id: user_id.to_string(),
                date: date.to_string(),
            })?;
        Ok(WorkLogView::build(user_id, date, record, self.clock.now()))
    }

    // ---------------------------
    // Admin
    // ---------------------------

    pub fn on_admin_delete<R: AsRef<str>>(
        &self,
        requester_roles: &[R],
        target_user_id: &str,
        date: NaiveDate,
    ) -> AppResult<()> {
        self.require_admin(requester_roles)?;

        if !self.store.delete(target_user_id, date)? {
            return Err(AppError::RecordNotFound {
                user_id: target_user_id.to_string(),
                date: date.to_string(),
            });
        }

        tracing::info!(user_id = target_user_id, %date, "Work record deleted");
        Ok(())
    }

    pub fn on_admin_modify<R: AsRef<str>>(
        &self,
        requester_roles: &[R],
        target_user_id: &str,
        date: NaiveDate,
        field: &str,
        raw_value: &str,
    ) -> AppResult<WorkRecord> {
        self.require_admin(requester_roles)?;
        AmendLogic::apply(&self.store, target_user_id, date, field, raw_value, self.zone)
    }

    pub fn on_admin_show<R: AsRef<str>>(
        &self,
        requester_roles: &[R],
        target_user_id: &str,
        date: NaiveDate,
    ) -> AppResult<WorkLogView> {
        self.require_admin(requester_roles)?;
        self.view(target_user_id, date)
    }

    fn require_admin<R: AsRef<str>>(&self, roles: &[R]) -> AppResult<()> {
        if roles.iter().any(|r| r.as_ref() == self.admin_role) {
            Ok(())
        } else {
            tracing::debug!(required = %self.admin_role, "Admin call rejected");
            Err(AppError::Unauthorized(self.admin_role.clone()))
        }
    }
}
