//! Session store: durable mapping of (user, date) → [`WorkRecord`].
//!
//! The store keeps an in-memory mirror of the whole document and writes the
//! full snapshot on every change. Two rules keep memory and disk equal:
//!
//! 1. every mutation of a key runs under that key's mutex, from the read of
//!    the current record to the end of the write;
//! 2. a failed write restores the previous value in memory before the error
//!    (`StoreUnavailable`) is returned, so the caller can simply retry.

pub mod document;
pub mod locks;

use crate::errors::{AppError, AppResult};
use crate::models::{SessionState, WorkRecord};
use chrono::NaiveDate;
use document::Snapshot;
use locks::{KeyLocks, lock_unpoisoned};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub struct SessionStore {
    records: Mutex<Snapshot>,
    locks: KeyLocks,
    file_path: Option<PathBuf>,
}

impl SessionStore {
    /// Store without a backing file (tests, dry runs).
    pub fn in_memory() -> Self {
        Self {
            records: Mutex::new(Snapshot::new()),
            locks: KeyLocks::new(),
            file_path: None,
        }
    }

    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let snapshot = document::load(path)?;

        tracing::debug!(
            path = %path.display(),
            users = snapshot.len(),
            "Session store loaded"
        );

        Ok(Self {
            records: Mutex::new(snapshot),
            locks: KeyLocks::new(),
            file_path: Some(path.to_path_buf()),
        })
    }

    pub fn get(&self, user_id: &str, date: NaiveDate) -> Option<WorkRecord> {
        let records = lock_unpoisoned(&self.records);
        records.get(user_id)?.get(&date).cloned()
    }

    /// Every date the user has a record for, oldest first.
    pub fn dates_for(&self, user_id: &str) -> Vec<(NaiveDate, SessionState)> {
        let records = lock_unpoisoned(&self.records);
        records
            .get(user_id)
            .map(|days| days.iter().map(|(d, r)| (*d, r.state())).collect())
            .unwrap_or_default()
    }

    /// Apply `mutator` to the record for (user, date), starting from a fresh
    /// `NotStarted` record when none exists, then persist.
    ///
    /// A failing mutator leaves the store untouched (no record is created).
    /// A mutator returning the record unchanged does not trigger a write.
    pub fn upsert<F>(&self, user_id: &str, date: NaiveDate, mutator: F) -> AppResult<WorkRecord>
    where
        F: FnOnce(&WorkRecord) -> AppResult<WorkRecord>,
    {
        let result = self.with_key_lock(user_id, date, || {
            let existing = self.get(user_id, date);
            let current = existing.clone().unwrap_or_default();
            let next = mutator(&current)?;

            if existing.as_ref() != Some(&next) {
                self.commit(user_id, date, Some(next.clone()))?;
            }
            Ok(next)
        });

        self.release_if_absent(user_id, date);
        result
    }

    /// Like [`upsert`](Self::upsert) but only for records that already exist.
    pub fn update_existing<F>(
        &self,
        user_id: &str,
        date: NaiveDate,
        mutator: F,
    ) -> AppResult<WorkRecord>
    where
        F: FnOnce(&WorkRecord) -> AppResult<WorkRecord>,
    {
        let result = self.with_key_lock(user_id, date, || {
            let current = self.get(user_id, date).ok_or_else(|| AppError::RecordNotFound {
                user_id: user_id.to_string(),
                date: date.to_string(),
            })?;
            let next = mutator(&current)?;

            if next != current {
                self.commit(user_id, date, Some(next.clone()))?;
            }
            Ok(next)
        });

        self.release_if_absent(user_id, date);
        result
    }

    /// Remove the single (user, date) entry. Returns `false` without writing
    /// when there was nothing to remove.
    pub fn delete(&self, user_id: &str, date: NaiveDate) -> AppResult<bool> {
        let result = self.with_key_lock(user_id, date, || {
            if self.get(user_id, date).is_none() {
                return Ok(false);
            }
            self.commit(user_id, date, None)?;
            Ok(true)
        });

        self.release_if_absent(user_id, date);
        result
    }

    fn with_key_lock<T>(
        &self,
        user_id: &str,
        date: NaiveDate,
        f: impl FnOnce() -> AppResult<T>,
    ) -> AppResult<T> {
        let key_lock = self.locks.for_key(user_id, date);
        let _guard = lock_unpoisoned(&key_lock);
        f()
    }

    /// Keys without a record don't keep a lock entry around; rejected events
    /// on fresh keys would otherwise grow the table forever.
    fn release_if_absent(&self, user_id: &str, date: NaiveDate) {
        if self.get(user_id, date).is_none() {
            self.locks.forget(user_id, date);
        }
    }

    /// Install `value` (or remove the entry for `None`), persist the whole
    /// snapshot, and roll the mirror back if the write fails.
    fn commit(&self, user_id: &str, date: NaiveDate, value: Option<WorkRecord>) -> AppResult<()> {
        let mut records = lock_unpoisoned(&self.records);

        let previous = put(&mut records, user_id, date, value);

        let Some(path) = &self.file_path else {
            return Ok(());
        };

        if let Err(err) = document::write_atomic(path, &records) {
            put(&mut records, user_id, date, previous);
            tracing::error!(
                error = %err,
                path = %path.display(),
                user_id,
                %date,
                "Failed to persist session store, change rolled back"
            );
            return Err(AppError::StoreUnavailable(err.to_string()));
        }

        tracing::debug!(user_id, %date, path = %path.display(), "Session store persisted");
        Ok(())
    }
}

/// Set or clear one entry, returning what was there. Users left without any
/// date are dropped from the snapshot.
fn put(
    records: &mut Snapshot,
    user_id: &str,
    date: NaiveDate,
    value: Option<WorkRecord>,
) -> Option<WorkRecord> {
    match value {
        Some(record) => records
            .entry(user_id.to_string())
            .or_default()
            .insert(date, record),
        None => {
            let days = records.get_mut(user_id)?;
            let previous = days.remove(&date);
            if days.is_empty() {
                records.remove(user_id);
            }
            previous
        }
    }
}
