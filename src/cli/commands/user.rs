use crate::cli::commands::with_session;
use crate::cli::parser::{Cli, UserAction};
use crate::config::Config;
use crate::core::auth::AuthLogic;
use crate::db::log::audit;
use crate::db::users::{delete_user, list_users};
use crate::errors::AppResult;
use crate::models::role::Capability;
use crate::ui::messages::{ask, success, warning};
use crate::utils::table::Table;

pub fn handle(cli: &Cli, action: &UserAction, cfg: &Config) -> AppResult<()> {
    with_session(cli, cfg, Capability::Users, |conn, session| {
        match action {
            UserAction::Add {
                username,
                new_password,
                role,
            } => {
                let password = match new_password {
                    Some(p) => p.clone(),
                    None => ask(format!("Password for '{username}'"))?,
                };
                let id = AuthLogic::register(conn, username, &password, *role, cfg.password_cost)?;
                audit(conn, "add", &format!("user #{id}"), &format!("{username} ({role}) by {}", session.username));
                success(format!("User #{id} '{username}' created with role {role}."));
            }
            UserAction::List => {
                let users = list_users(conn)?;
                let mut table = Table::new(&["ID", "Username", "Role", "Created"]);
                for u in users {
                    table.add_row(vec![u.id.to_string(), u.username, u.role.to_string(), u.created_at]);
                }
                table.print();
            }
            UserAction::Delete { id } => {
                if *id == session.user_id {
                    warning("You are deleting the account you are logged in with.");
                }
                delete_user(conn, *id)?;
                audit(conn, "delete", &format!("user #{id}"), &format!("by {}", session.username));
                success(format!("User #{id} deleted."));
            }
        }
        Ok(())
    })
}
