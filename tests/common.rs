#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use vetclinic::db::initialize::init_db;
use vetclinic::db::pool::{DbPool, SqliteProvider};

pub const ADMIN: &str = "admin";
pub const ADMIN_PASSWORD: &str = "s3cret";

pub fn vc() -> Command {
    cargo_bin_cmd!("vetclinic")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_vetclinic.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// `init` in test mode with the default admin account.
pub fn init_clinic(db_path: &str) {
    vc()
        .args([
            "--db",
            db_path,
            "--test",
            "init",
            "--admin-password",
            ADMIN_PASSWORD,
        ])
        .assert()
        .success();
}

/// Run a command as `user`.
pub fn as_user(db_path: &str, user: &str, password: &str, args: &[&str]) -> Command {
    let mut cmd = vc();
    cmd.args(["--db", db_path, "--test", "--user", user, "--password", password]);
    cmd.args(args);
    cmd
}

pub fn as_admin(db_path: &str, args: &[&str]) -> Command {
    as_user(db_path, ADMIN, ADMIN_PASSWORD, args)
}

/// Fresh schema-initialized database for library-level tests.
pub fn provider(name: &str) -> SqliteProvider {
    let db_path = setup_test_db(name);
    let pool = DbPool::create(db_path.as_ref(), Duration::from_secs(1)).expect("create db");
    init_db(&pool.conn).expect("init db");
    SqliteProvider::new(db_path, Duration::from_secs(1))
}
