use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(cfg: &Config) -> AppResult<()> {
        println!("📄 Current configuration:\n");
        println!("{}", serde_yaml::to_string(cfg)?);
        Ok(())
    }

    /// Open the configuration file in `editor`, `$EDITOR`/`$VISUAL`, or a
    /// platform default, falling back to the default when the requested
    /// editor fails.
    pub fn edit(path: &Path, editor: &Option<String>) -> AppResult<()> {
        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });
        let requested = editor.clone().unwrap_or_else(|| default_editor.clone());

        match Command::new(&requested).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!("Configuration file edited using '{}'", requested));
                return Ok(());
            }
            _ => warning(format!(
                "Editor '{}' not available, falling back to '{}'",
                requested, default_editor
            )),
        }

        match Command::new(&default_editor).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!("Configuration file edited using '{}'", default_editor));
                Ok(())
            }
            Ok(s) => Err(AppError::Config(format!("editor exited with {}", s))),
            Err(e) => Err(AppError::Config(e.to_string())),
        }
    }
}
