use std::sync::Arc;

use crate::FlowboardResult;

/// A rendered HTML email ready to be handed to a transport.
///
/// The sender address is a property of the transport, not of the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

impl OutgoingMail {
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        html_body: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            html_body: html_body.into(),
        }
    }
}

/* 📖 # Why is sending mail a trait?

Request handlers must send notification and confirmation emails, but tests must never
reach an SMTP relay. Handlers only see `MailerHandle`; production wires in SmtpMailer,
tests wire in MockMailer and inspect its outbox or make it fail on demand.
Retry or timeout policies can later be added as wrapping implementations without
touching handler code.
*/

/// Capability to deliver an email. Sending blocks until the transport accepted or
/// rejected the message.
pub trait Mailer: std::fmt::Debug + Send + Sync + 'static {
    fn send(&self, mail: &OutgoingMail) -> FlowboardResult<()>;
}

/// Cheaply cloneable handle to a Mailer implementation.
#[derive(Debug, Clone)]
pub struct MailerHandle(Arc<dyn Mailer>);

impl MailerHandle {
    pub fn new(mailer: impl Mailer + 'static) -> Self {
        Self(Arc::new(mailer))
    }
}

impl std::ops::Deref for MailerHandle {
    type Target = dyn Mailer;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}
