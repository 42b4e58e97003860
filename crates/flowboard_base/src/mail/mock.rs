use std::sync::Arc;

use parking_lot::Mutex;

use crate::{FlowboardError, FlowboardResult};

use super::traits::{Mailer, OutgoingMail};

#[derive(Debug, Default)]
struct MockMailerState {
    sent: Vec<OutgoingMail>,
    attempts: usize,
    /// Number of sends that succeed before every further send fails.
    fail_after: Option<usize>,
}

/// In-memory Mailer for tests.
///
/// Records delivered mail in an outbox and can be told to start failing after a
/// number of successful sends. Clones share the same outbox.
///
/// ```
/// use flowboard_base::{Mailer, MockMailer, OutgoingMail};
///
/// let mailer = MockMailer::new();
/// mailer.send(&OutgoingMail::new("ana@example.com", "Hi", "<p>Hi</p>")).unwrap();
/// assert_eq!(mailer.sent()[0].subject, "Hi");
///
/// let failing = MockMailer::failing();
/// assert!(failing.send(&OutgoingMail::new("ana@example.com", "Hi", "")).is_err());
/// assert_eq!(failing.attempts(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockMailer {
    state: Arc<Mutex<MockMailerState>>,
}

impl MockMailer {
    /// A mailer that accepts every message.
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer that rejects every message.
    pub fn failing() -> Self {
        Self::new().fail_after(0)
    }

    /// Let `successes` sends through, then fail every following one.
    pub fn fail_after(self, successes: usize) -> Self {
        self.state.lock().fail_after = Some(successes);
        self
    }

    /// Messages accepted so far, in send order.
    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.state.lock().sent.clone()
    }

    /// Number of send calls, successful or not.
    pub fn attempts(&self) -> usize {
        self.state.lock().attempts
    }
}

impl Mailer for MockMailer {
    fn send(&self, mail: &OutgoingMail) -> FlowboardResult<()> {
        let mut state = self.state.lock();
        state.attempts += 1;
        if let Some(limit) = state.fail_after {
            if state.sent.len() >= limit {
                return Err(Box::new(FlowboardError::mail(
                    mail.to.clone(),
                    "mock transport configured to fail",
                )));
            }
        }
        state.sent.push(mail.clone());
        Ok(())
    }
}
