use crate::core::reminders::REMINDER_DAYS;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Lowest bcrypt cost accepted by the hashing library; used by `--test`.
pub const TEST_PASSWORD_COST: u32 = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_secs: u64,
    #[serde(default = "default_password_cost")]
    pub password_cost: u32,
    #[serde(default = "default_reminder_days")]
    pub reminder_days: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub smtp: SmtpConfig,
}

/// Outgoing mail settings for visit reminders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    #[serde(default)]
    pub server: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub from: String,
    #[serde(default = "default_starttls")]
    pub starttls: bool,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_busy_timeout() -> u64 {
    5
}
fn default_password_cost() -> u32 {
    bcrypt::DEFAULT_COST
}
fn default_reminder_days() -> i64 {
    REMINDER_DAYS
}
fn default_currency() -> String {
    "PLN".to_string()
}
fn default_smtp_port() -> u16 {
    587
}
fn default_starttls() -> bool {
    true
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            server: String::new(),
            port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            from: String::new(),
            starttls: default_starttls(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            busy_timeout_secs: default_busy_timeout(),
            password_cost: default_password_cost(),
            reminder_days: default_reminder_days(),
            currency: default_currency(),
            smtp: SmtpConfig::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory (`~/.vetclinic`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".vetclinic")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("vetclinic.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("vetclinic.sqlite")
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_secs(self.busy_timeout_secs)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Write the configuration file (unless in test mode) and make sure the
    /// database directory exists. Returns the database path to initialize.
    pub fn init_all(&self, is_test: bool) -> AppResult<PathBuf> {
        let db_path = PathBuf::from(&self.database);

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        if !is_test {
            fs::create_dir_all(Self::config_dir())?;
            let yaml = serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        Ok(db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: Config = serde_yaml::from_str("database: /tmp/clinic.sqlite\n").unwrap();
        assert_eq!(cfg.database, "/tmp/clinic.sqlite");
        assert_eq!(cfg.busy_timeout_secs, 5);
        assert_eq!(cfg.reminder_days, 7);
        assert_eq!(cfg.currency, "PLN");
        assert_eq!(cfg.smtp.port, 587);
        assert!(cfg.smtp.starttls);
    }

    #[test]
    fn smtp_section_is_parsed() {
        let yaml = r#"
database: clinic.sqlite
smtp:
  server: smtp.example.com
  port: 465
  from: clinic@example.com
  starttls: false
"#;
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.smtp.server, "smtp.example.com");
        assert_eq!(cfg.smtp.port, 465);
        assert!(!cfg.smtp.starttls);
        assert!(cfg.smtp.username.is_empty());
    }

    #[test]
    fn database_key_is_optional() {
        let cfg: Config = serde_yaml::from_str("currency: EUR\n").unwrap();
        assert_eq!(PathBuf::from(&cfg.database), Config::database_file());
        assert_eq!(cfg.currency, "EUR");
    }

    #[test]
    fn absent_file_yields_defaults() {
        let path = std::env::temp_dir().join("vetclinic_no_such_config.conf");
        let _ = fs::remove_file(&path);
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.password_cost, bcrypt::DEFAULT_COST);
    }
}
