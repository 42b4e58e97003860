use std::fmt;

use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Message, SmtpTransport, Transport};
use tracing::{debug, info, instrument};

use crate::{FlowboardError, FlowboardResult};

use super::traits::{Mailer, OutgoingMail};

/// Connection settings for an SMTP relay.
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Address used in the `From` header of every message.
    pub from: String,
}

// Keeps the password out of logs
impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("from", &self.from)
            .finish()
    }
}

/* 📖 # Which TLS mode does the relay get?

The relay is always reached on a submission port that starts in plaintext and upgrades
with STARTTLS when the relay offers it, which is what `Tls::Opportunistic` does.
Credentials are only attached when both a user and a password are configured, so a
local relay without authentication works as well.
*/

/// Mailer delivering through an SMTP relay.
pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
    settings: SmtpSettings,
}

impl SmtpMailer {
    pub fn new(settings: SmtpSettings) -> FlowboardResult<Self> {
        let from: Mailbox = settings.from.parse().map_err(|e| {
            Box::new(FlowboardError::config(
                "MAIL_FROM",
                format!("invalid sender address '{}': {}", settings.from, e),
            ))
        })?;

        let tls_parameters = TlsParameters::new(settings.host.clone()).map_err(|e| {
            Box::new(FlowboardError::config(
                "SMTP_HOST",
                format!("cannot set up TLS for '{}': {}", settings.host, e),
            ))
        })?;
        let mut builder = SmtpTransport::builder_dangerous(settings.host.as_str())
            .port(settings.port)
            .tls(Tls::Opportunistic(tls_parameters));
        if let (Some(username), Some(password)) = (&settings.username, &settings.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        info!(host = %settings.host, port = settings.port, from = %settings.from, "SMTP mailer configured");
        Ok(Self {
            transport: builder.build(),
            from,
            settings,
        })
    }

    pub fn settings(&self) -> &SmtpSettings {
        &self.settings
    }

    fn build_message(&self, mail: &OutgoingMail) -> FlowboardResult<Message> {
        let to: Mailbox = mail.to.parse().map_err(|e| {
            Box::new(FlowboardError::mail(
                mail.to.clone(),
                format!("invalid recipient address: {}", e),
            ))
        })?;
        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(mail.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(mail.html_body.clone())
            .map_err(|e| Box::new(FlowboardError::mail(mail.to.clone(), e.to_string())))
    }
}

impl fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("settings", &self.settings)
            .finish()
    }
}

impl Mailer for SmtpMailer {
    #[instrument(skip(self, mail), fields(to = %mail.to, subject = %mail.subject))]
    fn send(&self, mail: &OutgoingMail) -> FlowboardResult<()> {
        let message = self.build_message(mail)?;
        let response = self
            .transport
            .send(&message)
            .map_err(|e| Box::new(FlowboardError::mail(mail.to.clone(), e.to_string())))?;
        debug!(code = %response.code(), "SMTP relay accepted message");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn settings() -> SmtpSettings {
        SmtpSettings {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: Some("mailer@example.com".to_string()),
            password: Some("hunter2".to_string()),
            from: "mailer@example.com".to_string(),
        }
    }

    #[test]
    fn test_debug_hides_password() {
        let debug = format!("{:?}", settings());
        assert!(debug.contains("***"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_invalid_sender_is_config_error() {
        let err = SmtpMailer::new(SmtpSettings {
            from: "not an address".to_string(),
            ..settings()
        })
        .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Config { key, .. } if key == "MAIL_FROM"));
    }

    #[test]
    fn test_invalid_recipient_fails_before_connecting() {
        let mailer = SmtpMailer::new(settings()).unwrap();
        let err = mailer
            .send(&OutgoingMail::new("nobody", "Subject", "<p>hi</p>"))
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Mail { recipient, .. } if recipient == "nobody"));
    }

    #[test]
    fn test_builds_html_message() {
        let mailer = SmtpMailer::new(settings()).unwrap();
        let message = mailer
            .build_message(&OutgoingMail::new(
                "ana@example.com",
                "Welcome",
                "<h1>Hi</h1>",
            ))
            .unwrap();
        let formatted = String::from_utf8(message.formatted()).unwrap();
        assert!(formatted.contains("Subject: Welcome"));
        assert!(formatted.contains("Content-Type: text/html"));
        assert!(formatted.contains("To: ana@example.com"));
    }
}
