use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};

/// Handle the `config` subcommand
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
        if path.exists() {
            println!("📄 {}:\n", path.display());
            ConfigLogic::print(&path)?;
        } else {
            warning("No configuration file yet, showing defaults.");
            let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
            println!("{yaml}");
        }
    }

    if *edit_config {
        ConfigLogic::edit(&path, editor.as_deref())?;
        success(format!("Configuration file edited: {}", path.display()));
    }

    Ok(())
}
