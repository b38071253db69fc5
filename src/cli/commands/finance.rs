use crate::cli::commands::with_session;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::finance::FinanceLogic;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::models::period::Period;
use crate::models::role::Capability;
use std::path::Path;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Finance {
        period,
        location,
        chart,
        force,
    } = &cli.command
    else {
        return Ok(());
    };

    // reject a malformed period before asking for credentials
    if let Some(p) = period {
        Period::parse(p)?;
    }

    with_session(cli, cfg, Capability::Finance, |conn, _| {
        let summary = FinanceLogic::summary(conn, period.as_deref(), *location)?;
        FinanceLogic::print(&summary, &cfg.currency);

        if let Some(file) = chart {
            let title = match period {
                Some(p) => format!("Payments {p}"),
                None => "Payments".to_string(),
            };
            ExportLogic::export_chart(&summary.rows, &title, Path::new(file), *force)?;
        }
        Ok(())
    })
}
