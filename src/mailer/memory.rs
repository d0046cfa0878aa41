use super::{EmailMessage, MailError, Mailer};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Keeps every delivered message in memory. Can be switched into a failing mode.
#[derive(Debug, Default)]
pub struct MemoryMailer {
    sent: Mutex<Vec<EmailMessage>>,
    failing: AtomicBool,
    attempts: AtomicUsize,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every send fails with [`MailError::Rejected`].
    pub fn fail_deliveries(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }

    /// Sends attempted, including failed ones.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(MailError::Rejected("delivery disabled".into()));
        }
        self.sent
            .lock()
            .map_err(|_| MailError::Rejected("mailbox poisoned".into()))?
            .push(message.clone());
        Ok(())
    }
}
