//! # Outbound Email
//!
//! [`Mailer`] is the seam between the notifier and whatever delivers mail. Delivery is reported
//! back as a `Result` so the notifier can record `email_sent`; it never decides whether a stock
//! movement succeeds.
//!
//! - [`ResendMailer`] posts to a Resend-compatible HTTP API.
//! - [`DisabledMailer`] stands in when no API key is configured.
//! - [`MemoryMailer`] keeps messages in memory for tests and the demo binary.

pub mod memory;
pub mod resend;
pub mod template;

pub use memory::MemoryMailer;
pub use resend::ResendMailer;

use crate::config::EmailConfig;
use crate::error::InventoryError;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("email is not configured")]
    NotConfigured,
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider rejected the message: {0}")]
    Rejected(String),
}

impl From<MailError> for InventoryError {
    fn from(e: MailError) -> Self {
        InventoryError::NotificationDelivery(e.to_string())
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError>;
}

/// Reports every send as failed, so notifications stay `email_sent = false`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        info!(to = %message.to, "Email not configured, message not sent");
        Err(MailError::NotConfigured)
    }
}

/// The mailer a deployment gets from its configuration: Resend when an API key is present.
pub fn from_config(config: &EmailConfig) -> Result<Arc<dyn Mailer>, MailError> {
    match &config.api_key {
        Some(api_key) => Ok(Arc::new(ResendMailer::new(config, api_key.clone())?)),
        None => Ok(Arc::new(DisabledMailer)),
    }
}
