use anyhow::{Context, anyhow};
use gitflow_notifier_core::{NotifyError, Result};
use url::Url;

use crate::{NotificationCard, adaptive};

/// Microsoft Teams incoming webhook.
pub struct TeamsWebhook {
    client: reqwest::Client,
    url: Url,
}

impl TeamsWebhook {
    pub fn new(url: Url) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("gitflow-notifier/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self::with_client(client, url))
    }

    pub fn with_client(client: reqwest::Client, url: Url) -> Self { Self { client, url } }

    /// Post the rendered card. Not retried.
    pub async fn send(&self, card: &NotificationCard) -> Result<()> {
        // The webhook URL embeds a secret, so only the host is logged.
        let host = self.url.host_str().unwrap_or("[unknown]");
        let payload = adaptive::render_message(card);
        let response = self
            .client
            .post(self.url.clone())
            .json(&payload)
            .send()
            .await
            .with_context(|| format!("Failed to reach webhook at {host}"))
            .map_err(NotifyError::delivery)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::delivery(anyhow!(
                "Webhook at {host} responded {status}: {}",
                body.trim()
            )));
        }
        tracing::info!("Delivered notification to {} ({})", host, status);
        Ok(())
    }
}
