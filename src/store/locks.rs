//! Per-(user, date) mutual exclusion.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub user_id: String,
    pub date: NaiveDate,
}

impl RecordKey {
    pub fn new(user_id: &str, date: NaiveDate) -> Self {
        Self {
            user_id: user_id.to_string(),
            date,
        }
    }
}

/// Lock table handing out one mutex per record key. The table itself is only
/// held long enough to look up or insert an entry.
#[derive(Default)]
pub struct KeyLocks {
    table: Mutex<HashMap<RecordKey, Arc<Mutex<()>>>>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_key(&self, user_id: &str, date: NaiveDate) -> Arc<Mutex<()>> {
        let mut table = lock_unpoisoned(&self.table);
        table
            .entry(RecordKey::new(user_id, date))
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drop the entry once nobody else holds it (after a record is deleted).
    pub fn forget(&self, user_id: &str, date: NaiveDate) {
        let mut table = lock_unpoisoned(&self.table);
        let key = RecordKey::new(user_id, date);
        if table.get(&key).is_some_and(|m| Arc::strong_count(m) == 1) {
            table.remove(&key);
        }
    }

    pub fn len(&self) -> usize {
        lock_unpoisoned(&self.table).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A panicking mutator must not wedge its key forever; the guarded data is
/// either `()` or a snapshot that is only replaced wholesale.
pub fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
