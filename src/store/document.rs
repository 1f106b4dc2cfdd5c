//! JSON document holding every work record.
//!
//! ```json
//! {
//!   "<userId>": {
//!     "2025-06-07": { "start": ..., "breaks": [...], "end": ..., "state": ..., "summaryMessageId": ... }
//!   }
//! }
//! ```
//!
//! Writes go to a sibling `.tmp` file which is then renamed over the target,
//! so a crash mid-write never leaves a truncated document behind.

use crate::errors::{AppError, AppResult};
use crate::models::WorkRecord;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub type UserRecords = BTreeMap<NaiveDate, WorkRecord>;
pub type Snapshot = BTreeMap<String, UserRecords>;

/// Missing or blank file → empty snapshot. Unparseable content is an error:
/// silently starting over would overwrite the user's history on next write.
pub fn load(path: &Path) -> AppResult<Snapshot> {
    if !path.exists() {
        return Ok(Snapshot::new());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        AppError::StoreUnavailable(format!("cannot read {}: {}", path.display(), e))
    })?;

    if content.trim().is_empty() {
        return Ok(Snapshot::new());
    }

    serde_json::from_str(&content).map_err(|e| {
        AppError::StoreUnavailable(format!("cannot parse {}: {}", path.display(), e))
    })
}

pub fn write_atomic(path: &Path, snapshot: &Snapshot) -> AppResult<()> {
    let content = serde_json::to_string_pretty(snapshot)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let tmp = temp_path(path);
    {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(content.as_bytes())?;
        file.write_all(b"\n")?;
        file.sync_all()?;
    }

    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }

    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}
