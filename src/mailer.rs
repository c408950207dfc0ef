//! Outbound email collaborator boundary.

use std::future::Future;

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("email request failed: {0}")]
    Transport(String),

    #[error("{0}")]
    Provider(String),
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub id: String,
}

pub trait Mailer: Clone + Send + Sync + 'static {
    fn send(
        &self,
        from: &str,
        to: &str,
        subject: &str,
        html: &str,
    ) -> impl Future<Output = Result<SentEmail, MailerError>> + Send;
}

#[derive(Debug, Deserialize)]
struct ResendResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ResendErrorBody {
    message: Option<String>,
}

/// Resend HTTP API client.
#[derive(Clone)]
pub struct ResendMailer {
    api_key: String,
}

impl ResendMailer {
    const ENDPOINT: &'static str = "https://api.resend.com/emails";

    pub fn new(api_key: String) -> Self {
        Self { api_key }
    }
}

impl Mailer for ResendMailer {
    async fn send(
        &self,
        from: &str,
        to: &str,
        subject: &str,
        html: &str,
    ) -> Result<SentEmail, MailerError> {
        if self.api_key.is_empty() {
            return Err(MailerError::Provider(
                "RESEND_API_KEY is not configured".into(),
            ));
        }

        // 30-second timeout so a stalled provider cannot hang the request
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| MailerError::Transport(e.to_string()))?;

        let response = client
            .post(Self::ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "from": from,
                "to": [to],
                "subject": subject,
                "html": html,
            }))
            .send()
            .await
            .map_err(|e| MailerError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ResendErrorBody>()
                .await
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| format!("provider returned {status}"));
            return Err(MailerError::Provider(message));
        }

        let body: ResendResponse = response
            .json()
            .await
            .map_err(|e| MailerError::Transport(e.to_string()))?;

        Ok(SentEmail { id: body.id })
    }
}
