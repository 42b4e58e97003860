mod mock;
mod smtp;
mod traits;

pub use mock::MockMailer;
pub use smtp::{SmtpMailer, SmtpSettings};
pub use traits::{Mailer, MailerHandle, OutgoingMail};
