use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            ConfigLogic::print(cfg)?;
        }

        if *check {
            if !path.exists() {
                info(format!(
                    "No configuration file at {}; defaults are in use.",
                    path.display()
                ));
            } else {
                let missing = Config::missing_keys(&path)?;
                if missing.is_empty() {
                    success("Configuration file is complete.");
                } else {
                    for key in missing {
                        warning(format!("Missing field '{}' (default value is used)", key));
                    }
                }
            }
        }

        if *edit_config {
            ConfigLogic::edit(&path, editor)?;
        }
    }

    Ok(())
}
