use crate::cli::commands::with_session;
use crate::cli::parser::{Cli, ReportAction};
use crate::config::Config;
use crate::core::reports::ReportLogic;
use crate::db::log::audit;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::models::role::Capability;
use std::path::Path;

pub fn handle(cli: &Cli, action: &ReportAction, cfg: &Config) -> AppResult<()> {
    with_session(cli, cfg, Capability::Reports, |conn, session| {
        match action {
            ReportAction::Show { location } => {
                let bundle = ReportLogic::build(conn, *location)?;
                ReportLogic::print(&bundle);
            }
            ReportAction::Export {
                format,
                file,
                location,
                force,
            } => {
                let bundle = ReportLogic::build(conn, *location)?;
                ExportLogic::export_report(&bundle, *format, Path::new(file), *force)?;
                audit(
                    conn,
                    "export",
                    format.as_str(),
                    &format!("{file} by {}", session.username),
                );
            }
        }
        Ok(())
    })
}
