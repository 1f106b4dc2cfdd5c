use chrono::NaiveDate;
use rworklog::core::clock::SystemClock;
use rworklog::core::dispatcher::Dispatcher;
use rworklog::errors::ErrorKind;
use rworklog::models::{SessionState, WorkRecord};
use rworklog::store::SessionStore;
use rworklog::utils::zone::Zone;
use std::fs;
use std::sync::Arc;

mod common;
use common::{dispatcher_at, temp_data_file, ts};

fn june(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
}

#[test]
fn test_records_survive_reopen() {
    let path = temp_data_file("reopen");
    {
        let store = Arc::new(SessionStore::open(&path).unwrap());
        let (d, clock) = dispatcher_at(store, "2025-06-07T09:00:00Z");
        d.on_start_command("42", "alice").unwrap();
        clock.set(ts("2025-06-07T12:00:00Z"));
        d.on_begin_break_button("42", None).unwrap();
    }

    let reopened = SessionStore::open(&path).unwrap();
    let record = reopened.get("42", june(7)).unwrap();
    assert_eq!(record.state(), SessionState::OnBreak);
    assert_eq!(record.start, Some(ts("2025-06-07T09:00:00Z")));
    assert_eq!(record.breaks.len(), 1);
}

#[test]
fn test_system_clock_records_match_after_reopen() {
    let path = temp_data_file("system_clock");
    let store = Arc::new(SessionStore::open(&path).unwrap());
    let d = Dispatcher::new(store.clone(), Arc::new(SystemClock)).with_zone(Zone::utc());

    d.on_start_command("42", "alice").unwrap();
    d.on_begin_break_button("42", None).unwrap();
    d.on_end_break_button("42", None).unwrap();

    let days = store.dates_for("42");
    assert_eq!(days.len(), 1);
    let date = days[0].0;
    let in_memory = store.get("42", date).unwrap();

    let reopened = SessionStore::open(&path).unwrap();
    assert_eq!(reopened.get("42", date), Some(in_memory));
}

#[test]
fn test_sub_second_timestamps_survive_reopen() {
    let path = temp_data_file("sub_second");
    let store = Arc::new(SessionStore::open(&path).unwrap());
    let (d, clock) = dispatcher_at(store.clone(), "2025-06-07T09:00:00.123456789Z");
    d.on_start_command("42", "alice").unwrap();
    clock.set(ts("2025-06-07T12:00:00.987654Z"));
    d.on_begin_break_button("42", None).unwrap();

    let in_memory = store.get("42", june(7)).unwrap();
    assert_eq!(in_memory.start, Some(ts("2025-06-07T09:00:00.123Z")));
    assert_eq!(in_memory.breaks[0].start, ts("2025-06-07T12:00:00.987Z"));

    let reopened = SessionStore::open(&path).unwrap();
    assert_eq!(reopened.get("42", june(7)), Some(in_memory));
}

#[test]
fn test_document_shape_on_disk() {
    let path = temp_data_file("shape");
    let store = Arc::new(SessionStore::open(&path).unwrap());
    let (d, clock) = dispatcher_at(store, "2025-06-07T09:00:00Z");
    d.on_start_command("42", "alice").unwrap();
    clock.set(ts("2025-06-07T12:00:00Z"));
    d.on_begin_break_button("42", None).unwrap();
    d.record_summary_message("42", june(7), "msg-9").unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let day = &json["42"]["2025-06-07"];

    assert_eq!(day["start"], "2025-06-07T09:00:00.000Z");
    assert_eq!(day["breaks"][0]["start"], "2025-06-07T12:00:00.000Z");
    assert!(day["breaks"][0]["end"].is_null());
    assert!(day["end"].is_null());
    assert_eq!(day["state"], "on_break");
    assert_eq!(day["summaryMessageId"], "msg-9");
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn test_existing_document_is_read() {
    let path = temp_data_file("existing");
    fs::write(
        &path,
        r#"{
  "42": {
    "2025-06-05": {
      "start": "2025-06-05T08:00:00.000Z",
      "breaks": [
        { "start": "2025-06-05T12:00:00.000Z", "end": "2025-06-05T12:45:00.000Z" }
      ],
      "end": "2025-06-05T16:30:00.000Z",
      "state": "ended"
    },
    "2025-06-06": {
      "start": "2025-06-06T08:00:00.000Z",
      "breaks": [],
      "end": null,
      "state": "ended"
    }
  }
}
"#,
    )
    .unwrap();

    let store = SessionStore::open(&path).unwrap();
    assert_eq!(store.get("42", june(5)).unwrap().state(), SessionState::Ended);
    // A stale stored state never wins over the timestamps.
    assert_eq!(store.get("42", june(6)).unwrap().state(), SessionState::Started);
    assert_eq!(
        store.dates_for("42"),
        vec![(june(5), SessionState::Ended), (june(6), SessionState::Started)]
    );
}

#[test]
fn test_corrupt_document_is_refused() {
    let path = temp_data_file("corrupt");
    fs::write(&path, "{ not json").unwrap();

    let err = SessionStore::open(&path).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::StoreUnavailable);
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
}

#[test]
fn test_failed_write_rolls_back() {
    let mut dir = std::env::temp_dir();
    dir.push("rollback_rworklog_dir");
    fs::remove_dir_all(&dir).ok();
    fs::remove_file(&dir).ok();
    let path = dir.join("timeData.json");

    let store = SessionStore::open(&path).unwrap();
    store
        .upsert("42", june(7), |_| {
            Ok(WorkRecord {
                start: Some(ts("2025-06-07T09:00:00Z")),
                ..WorkRecord::new()
            })
        })
        .unwrap();

    // Replace the data directory with a plain file: every write now fails.
    fs::remove_dir_all(&dir).unwrap();
    fs::write(&dir, "blocker").unwrap();

    let err = store
        .upsert("42", june(7), |current| {
            let mut next = current.clone();
            next.end = Some(ts("2025-06-07T17:00:00Z"));
            Ok(next)
        })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StoreUnavailable);
    assert_eq!(store.get("42", june(7)).unwrap().state(), SessionState::Started);

    let err = store.delete("42", june(7)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StoreUnavailable);
    assert!(store.get("42", june(7)).is_some());

    // Once the path is writable again a retry succeeds.
    fs::remove_file(&dir).unwrap();
    let record = store
        .upsert("42", june(7), |current| {
            let mut next = current.clone();
            next.end = Some(ts("2025-06-07T17:00:00Z"));
            Ok(next)
        })
        .unwrap();
    assert_eq!(record.state(), SessionState::Ended);

    let reopened = SessionStore::open(&path).unwrap();
    assert_eq!(reopened.get("42", june(7)), Some(record));
}
