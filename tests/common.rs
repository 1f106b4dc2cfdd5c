#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Utc};
use rworklog::core::clock::FixedClock;
use rworklog::core::dispatcher::Dispatcher;
use rworklog::store::SessionStore;
use rworklog::utils::time::parse_stored;
use rworklog::utils::zone::Zone;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// Isolated CLI environment: its own config dir (UTC zone) and data file.
pub struct TestEnv {
    pub home: PathBuf,
    pub data: String,
}

impl TestEnv {
    pub fn new(name: &str) -> Self {
        let mut home: PathBuf = env::temp_dir();
        home.push(format!("{}_rworklog_home", name));
        fs::remove_dir_all(&home).ok();
        fs::create_dir_all(&home).expect("create test home");
        fs::write(
            home.join("rworklog.conf"),
            "timezone: utc\nadmin_role: Admin\n",
        )
        .expect("write test config");

        let data = home.join("timeData.json").to_string_lossy().to_string();
        Self { home, data }
    }

    /// `rworklog --data <file> --user <user> --at <at> ...`
    pub fn cmd(&self, user: &str, at: &str) -> Command {
        let mut cmd = cargo_bin_cmd!("rworklog");
        cmd.env("RWORKLOG_HOME", &self.home)
            .env_remove("RUST_LOG")
            .args(["--data", &self.data, "--user", user, "--at", at]);
        cmd
    }

    pub fn document(&self) -> serde_json::Value {
        let raw = fs::read_to_string(&self.data).expect("read data file");
        serde_json::from_str(&raw).expect("parse data file")
    }
}

/// Unique data file path inside the system temp dir, removed beforehand.
pub fn temp_data_file(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rworklog.json", name));
    fs::remove_file(&path).ok();
    path
}

pub fn ts(raw: &str) -> DateTime<Utc> {
    parse_stored(raw).expect("valid timestamp")
}

/// Dispatcher over `store`, UTC zone, clock fixed at `at`.
pub fn dispatcher_at(store: Arc<SessionStore>, at: &str) -> (Dispatcher, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(ts(at)));
    let dispatcher = Dispatcher::new(store, clock.clone()).with_zone(Zone::utc());
    (dispatcher, clock)
}
