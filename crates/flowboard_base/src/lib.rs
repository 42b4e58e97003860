/* 📖 # Why have flowboard_base as a core library?
flowboard_base provides the foundational error handling, tracing setup and platform
abstractions (filesystem, HTTP server, mail transport) used across all crates.
The engine only ever talks to these traits, which keeps it testable without sockets,
SMTP relays or a populated `public/` directory.
*/

pub mod error;
mod error_tests;
pub mod mail;
pub mod pal;
pub mod tracing;

// Re-export commonly used types for convenience
pub use error::{Error as FlowboardError, Result as FlowboardResult, ResultExt};
pub use mail::{Mailer, MailerHandle, MockMailer, OutgoingMail, SmtpMailer, SmtpSettings};
pub use pal::{FilePath, MockPal, Pal, PalHandle, RealPal};
