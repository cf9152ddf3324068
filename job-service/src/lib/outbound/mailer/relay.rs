use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::Config;
use crate::identity::errors::MailError;
use crate::identity::ports::MailSender;

/// Mail delivery through an HTTP relay.
///
/// Messages leave the process as a JSON POST to the configured relay
/// endpoint. Delivery is fire-and-forget from the domain's point of view:
/// callers log failures and move on.
pub struct HttpMailSender {
    client: reqwest::Client,
    relay_url: String,
    from: String,
}

#[derive(Debug, Serialize)]
struct OutboundMail<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

impl HttpMailSender {
    /// Create a new mail sender from configuration.
    ///
    /// The request timeout bounds every send; nothing in the domain waits
    /// longer than this on mail.
    pub fn new(config: &Config) -> Result<Self, anyhow::Error> {
        tracing::info!(
            relay_url = %config.mail.relay_url,
            from = %config.mail.from,
            "Initializing HTTP mail relay client"
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            relay_url: config.mail.relay_url.clone(),
            from: config.mail.from.clone(),
        })
    }
}

#[async_trait]
impl MailSender for HttpMailSender {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        let payload = OutboundMail {
            from: &self.from,
            to,
            subject,
            html: body,
        };

        let response = self
            .client
            .post(&self.relay_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| MailError::SendFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MailError::SendFailed(format!(
                "relay returned {}",
                response.status()
            )));
        }

        tracing::debug!(to = %to, subject = %subject, "Mail handed to relay");

        Ok(())
    }
}
