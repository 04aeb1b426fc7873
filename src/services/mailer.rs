use std::time::Duration;

use serde_json::json;

use crate::config::MailerConfig;

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned {0}")]
    Status(reqwest::StatusCode),
}

/// Transactional-email client for the welcome message sent after
/// registration. Disabled cleanly when no API key is configured.
#[derive(Clone)]
pub struct Mailer {
    http: reqwest::Client,
    config: MailerConfig,
}

impl Mailer {
    pub fn new(config: MailerConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    /// Dispatch the welcome email on its own task. Never on the
    /// registration response path; failures are logged, not surfaced.
    pub fn spawn_welcome(&self, email: String, name: String) {
        let mailer = self.clone();
        tokio::spawn(async move {
            if let Err(err) = mailer.send_welcome(&email, &name).await {
                tracing::warn!(%email, "welcome email failed: {}", err);
            }
        });
    }

    pub async fn send_welcome(&self, email: &str, name: &str) -> Result<(), MailerError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            tracing::debug!(%email, "mailer disabled, skipping welcome email");
            return Ok(());
        };

        let response = self
            .http
            .post(format!("{}/v3/smtp/email", self.config.base_url))
            .header("accept", "application/json")
            .header("api-key", api_key)
            .json(&welcome_payload(&self.config, email, name))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MailerError::Status(response.status()));
        }

        tracing::info!(%email, "welcome email dispatched");
        Ok(())
    }
}

fn welcome_payload(config: &MailerConfig, email: &str, name: &str) -> serde_json::Value {
    json!({
        "sender": {
            "name": config.sender_name,
            "email": config.sender_email,
        },
        "to": [{
            "email": email,
            "name": name,
        }],
        "subject": "Welcome to Threadstore",
        "htmlContent": format!(
            "<html><body><p>Hello {},</p><p>Welcome to Threadstore.</p></body></html>",
            name
        ),
    })
}
