pub mod commands;
pub mod parser;

use crate::config::Config;
use crate::core::clock::{Clock, FixedClock, SystemClock};
use crate::core::dispatcher::Dispatcher;
use crate::errors::{AppError, AppResult};
use crate::store::SessionStore;
use crate::utils::{path::expand_tilde, time};
use parser::Cli;
use std::env;
use std::sync::Arc;

/// Everything a session or admin command needs.
pub struct Context {
    pub dispatcher: Dispatcher,
    pub user: Option<String>,
}

impl Context {
    pub fn build(cli: &Cli, cfg: &Config) -> AppResult<Self> {
        let zone = cfg.zone()?;

        let data_path = match &cli.data {
            Some(p) => expand_tilde(p),
            None => cfg.data_path(),
        };
        let store = Arc::new(SessionStore::open(&data_path)?);

        let clock: Arc<dyn Clock> = match &cli.at {
            Some(raw) => {
                let today = zone.date_of(SystemClock.now());
                Arc::new(FixedClock::new(time::normalize_in(today, raw, zone)?))
            }
            None => Arc::new(SystemClock),
        };

        let dispatcher = Dispatcher::from_config(cfg, store, clock)?;
        let user = cli
            .user
            .clone()
            .or_else(|| env::var("RWORKLOG_USER").ok())
            .or_else(|| env::var("USER").ok())
            .or_else(|| env::var("USERNAME").ok());

        Ok(Self { dispatcher, user })
    }

    pub fn user_id(&self) -> AppResult<&str> {
        self.user
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| AppError::Config("no user id: pass --user or set RWORKLOG_USER".into()))
    }
}
