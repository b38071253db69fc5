//! vetclinic library root.
//! Exposes the CLI parser, the high-level `run()` function and the record,
//! report, reminder and access modules behind it.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod mail;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::{Config, TEST_PASSWORD_COST};
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init { .. } => commands::init::handle(cli, cfg),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Log { .. } => commands::log::handle(cli, cfg),
        Commands::Animal(action) => commands::animal::handle(cli, action, cfg),
        Commands::Visit(action) => commands::visit::handle(cli, action, cfg),
        Commands::History(action) => commands::history::handle(cli, action, cfg),
        Commands::Location(action) => commands::location::handle(cli, action, cfg),
        Commands::User(action) => commands::user::handle(cli, action, cfg),
        Commands::Reminder(action) => commands::reminder::handle(cli, action, cfg),
        Commands::Report(action) => commands::report::handle(cli, action, cfg),
        Commands::Finance { .. } => commands::finance::handle(cli, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // configuration is loaded once per invocation
    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    if cli.test {
        cfg.password_cost = TEST_PASSWORD_COST;
    }

    dispatch(&cli, &cfg)
}
