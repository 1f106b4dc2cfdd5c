//! rWorklog library root.
//! Exposes the session core (state machine, store, overrides, dispatcher),
//! the CLI parser and the high-level run() function.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::Context;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Start { .. }
        | Commands::Resume
        | Commands::Break { .. }
        | Commands::BreakEnd { .. }
        | Commands::End { .. } => {
            let ctx = Context::build(cli, cfg)?;
            cli::commands::session::handle(&cli.command, &ctx)
        }
        Commands::View { .. } | Commands::List => {
            let ctx = Context::build(cli, cfg)?;
            cli::commands::view::handle(&cli.command, &ctx)
        }
        Commands::Admin { .. } => {
            let ctx = Context::build(cli, cfg)?;
            cli::commands::admin::handle(&cli.command, &ctx)
        }
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let cfg = Config::load()?;
    dispatch(&cli, &cfg)
}
