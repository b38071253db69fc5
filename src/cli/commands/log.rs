use crate::cli::parser::{Cli, Commands};
use crate::cli::commands::with_session;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;
use crate::models::role::Capability;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if matches!(cli.command, Commands::Log { print: true }) {
        with_session(cli, cfg, Capability::Users, |conn, _| LogLogic::print_log(conn))?;
    }

    Ok(())
}
