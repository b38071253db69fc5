use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::auth::AuthLogic;
use crate::db::initialize::init_db;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::users::list_users;
use crate::errors::AppResult;
use crate::models::role::Role;
use crate::ui::messages::{ask, info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database and its schema
///  - the first admin account, when no account exists yet
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Init {
        admin_user,
        admin_password,
    } = &cli.command
    else {
        return Ok(());
    };

    let db_path = cfg.init_all(cli.test)?;

    println!("⚙️  Initializing vetclinic…");
    println!("🗄️  Database   : {}", db_path.display());

    let pool = DbPool::create(&db_path, cfg.busy_timeout())?;
    init_db(&pool.conn)?;

    success(format!("Database initialized at {}", db_path.display()));
    audit(
        &pool.conn,
        "init",
        "database",
        &format!("Database initialized at {}", db_path.display()),
    );

    if !list_users(&pool.conn)?.is_empty() {
        info("Accounts already exist, no admin created.");
        return Ok(());
    }

    let password = match admin_password {
        Some(p) => p.clone(),
        None => ask(format!("Password for '{admin_user}'"))?,
    };

    let id = AuthLogic::register(&pool.conn, admin_user, &password, Role::Admin, cfg.password_cost)?;
    audit(&pool.conn, "add", &format!("user #{id}"), &format!("admin '{admin_user}' created"));
    success(format!("Admin account '{admin_user}' created."));

    Ok(())
}
