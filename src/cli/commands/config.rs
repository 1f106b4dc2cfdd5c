use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        if *print_config {
            println!("📄 Current configuration ({}):\n", Config::config_file().display());
            println!("{}", serde_yaml::to_string(cfg)?);
        }

        if *check {
            let path = Config::config_file();
            if !path.exists() {
                info(format!("No configuration file at {}: defaults apply.", path.display()));
                return Ok(());
            }

            let missing = Config::missing_fields()?;
            if missing.is_empty() {
                success("Configuration file is complete.");
            } else {
                warning(format!(
                    "Missing fields (defaults used): {}",
                    missing.join(", ")
                ));
            }
        }

        if !*print_config && !*check {
            info("Nothing to do: use --print or --check.");
        }
    }

    Ok(())
}
