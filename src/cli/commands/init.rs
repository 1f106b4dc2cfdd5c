use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::{SessionStore, document};
use crate::ui::messages::{info, success};
use crate::utils::path::expand_tilde;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the JSON data file, if it does not exist yet
pub fn handle(cli: &Cli) -> AppResult<()> {
    let mut cfg = Config::load()?;
    if let Some(custom) = &cli.data {
        cfg.data_file = expand_tilde(custom).to_string_lossy().to_string();
    }

    if !cli.test {
        let path = cfg.save()?;
        info(format!("Config file : {}", path.display()));
    }

    let data_path = cfg.data_path();
    if data_path.exists() {
        // Refuse to continue on a corrupt file rather than overwrite it later.
        SessionStore::open(&data_path)?;
        info(format!("Data file already present: {}", data_path.display()));
    } else {
        document::write_atomic(&data_path, &document::Snapshot::new())?;
        info(format!("Data file   : {}", data_path.display()));
    }

    tracing::info!(data = %data_path.display(), test = cli.test, "Initialized");
    success("rWorklog initialization completed!");
    Ok(())
}
