use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{error, success, warning};
use std::path::Path;
use std::process::Command;

fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

fn launch(editor: &str, path: &Path) -> bool {
    match Command::new(editor).arg(path).status() {
        Ok(status) => status.success(),
        Err(e) => {
            tracing::debug!(editor, error = %e, "editor failed to start");
            false
        }
    }
}

/// `config --print-config` shows the effective settings; `--edit-config`
/// opens the file, trying `--editor` first and then `$EDITOR`/`$VISUAL`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    else {
        return Ok(());
    };

    let path = Config::config_file();

    if *print_config {
        println!("📄 Current configuration ({}):\n", path.display());
        println!("{}", cfg.to_yaml()?);
    }

    if *edit_config {
        let fallback = default_editor();
        let chosen = editor.as_deref().unwrap_or(&fallback);

        if launch(chosen, &path) {
            success(format!("Configuration file edited with '{chosen}'"));
        } else if chosen != fallback {
            warning(format!("Editor '{chosen}' not available, trying '{fallback}'"));
            if launch(&fallback, &path) {
                success(format!("Configuration file edited with '{fallback}'"));
            } else {
                error(format!("Could not open the configuration file with '{fallback}'"));
            }
        } else {
            error(format!("Could not open the configuration file with '{chosen}'"));
        }
    }

    Ok(())
}
