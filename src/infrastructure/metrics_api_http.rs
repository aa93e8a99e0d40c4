use std::time::Duration;

use log::debug;
use reqwest::Client;

use super::delivery_api_http::{build_http_client, post_json};
use crate::{LogRequest, MetricsApi, StdResult};

/// Logs delivery events to the Promoted Metrics API over HTTP.
pub struct HttpMetricsApi {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpMetricsApi {
    /// Creates a new `HttpMetricsApi` instance for the given endpoint.
    pub fn try_new(endpoint: &str, api_key: &str, timeout: Duration) -> StdResult<Self> {
        Ok(Self {
            client: build_http_client(endpoint, api_key, timeout, "metrics")?,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl MetricsApi for HttpMetricsApi {
    async fn run_metrics_logging(&self, log_request: &LogRequest) -> StdResult<()> {
        debug!(
            "Metrics API request: {}",
            serde_json::to_string(log_request).unwrap_or_default()
        );
        post_json(&self.client, &self.endpoint, &self.api_key, log_request).await?;

        Ok(())
    }
}
