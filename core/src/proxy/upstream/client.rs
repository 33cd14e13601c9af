//! Upstream client for calling the FPL API

use reqwest::Client;
use serde_json::Value;
use tokio::time::Duration;

use crate::error::GatewayError;

#[derive(Clone)]
pub struct UpstreamClient {
    http_client: Client,
    base_url: String,
}

impl UpstreamClient {
    /// `request_timeout` bounds the whole outbound call, in seconds; a hung
    /// upstream surfaces as a network error instead of hanging the caller.
    pub fn new(base_url: &str, request_timeout: u64) -> Self {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(20))
            .pool_max_idle_per_host(16)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .timeout(Duration::from_secs(request_timeout))
            .user_agent("fpl-relay/0.1")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the bootstrap-static payload (players, teams, events)
    pub async fn bootstrap(&self) -> Result<Value, GatewayError> {
        self.fetch_json(&format!("{}/bootstrap-static/", self.base_url))
            .await
    }

    /// Fetch live data for a single gameweek
    pub async fn live(&self, gw: &str) -> Result<Value, GatewayError> {
        self.fetch_json(&format!("{}/event/{}/live/", self.base_url, gw))
            .await
    }

    /// GET a JSON document. Non-2xx statuses are logged here with the
    /// upstream's own body text; the caller only ever sees the envelope.
    async fn fetch_json(&self, url: &str) -> Result<Value, GatewayError> {
        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Upstream error {} at {}: {}", status, url, body);
            return Err(GatewayError::UpstreamStatus { status });
        }

        let data = response.json::<Value>().await?;
        Ok(data)
    }
}
