//! Outgoing e-mail.

use crate::config::SmtpConfig;
use crate::errors::{AppError, AppResult};
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

/// Delivers one plain-text message.
pub trait Mailer {
    fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()>;
}

/// SMTP delivery configured from the `smtp` section of the config file.
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    fn transport(&self) -> AppResult<SmtpTransport> {
        let cfg = &self.config;
        if cfg.server.trim().is_empty() {
            return Err(AppError::Email(
                "no SMTP server configured (smtp.server)".into(),
            ));
        }

        let relay = if cfg.starttls {
            SmtpTransport::starttls_relay(&cfg.server)
        } else {
            SmtpTransport::relay(&cfg.server)
        };
        let builder = relay
            .map_err(|e| AppError::Email(e.to_string()))?
            .port(cfg.port);

        let builder = if cfg.username.is_empty() {
            builder
        } else {
            builder.credentials(Credentials::new(
                cfg.username.clone(),
                cfg.password.clone(),
            ))
        };

        Ok(builder.build())
    }
}

fn mailbox(addr: &str) -> AppResult<Mailbox> {
    addr.trim()
        .parse::<Mailbox>()
        .map_err(|e| AppError::Email(format!("invalid address '{addr}': {e}")))
}

impl Mailer for SmtpMailer {
    fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let transport = self.transport()?;

        let from = if self.config.from.trim().is_empty() {
            &self.config.username
        } else {
            &self.config.from
        };

        let message = Message::builder()
            .from(mailbox(from)?)
            .to(mailbox(to)?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| AppError::Email(e.to_string()))?;

        transport
            .send(&message)
            .map_err(|e| AppError::Email(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_server_fails_before_connecting() {
        let mailer = SmtpMailer::new(SmtpConfig::default());
        assert!(matches!(
            mailer.send("owner@example.com", "s", "b"),
            Err(AppError::Email(_))
        ));
    }
}
