use super::{EmailMessage, MailError, Mailer};
use crate::config::EmailConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, instrument};

/// Sends mail through a Resend-compatible `POST /emails` endpoint.
pub struct ResendMailer {
    client: Client,
    endpoint: String,
    from: String,
    api_key: String,
}

impl ResendMailer {
    pub fn new(config: &EmailConfig, api_key: String) -> Result<Self, MailError> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            from: config.from.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    #[instrument(skip(self, message), fields(to = %message.to))]
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        let body = json!({
            "from": self.from,
            "to": message.to,
            "subject": message.subject,
            "html": message.html,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected(format!("{status}: {detail}")));
        }

        debug!(%status, "Email accepted");
        Ok(())
    }
}
