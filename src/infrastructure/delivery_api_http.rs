use std::time::Duration;

use log::debug;
use reqwest::Client;
use serde::Serialize;

use crate::{DeliveryApi, DeliveryError, Request, Response, StdResult};

/// Header carrying the Promoted API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Builds an HTTP client for a Promoted API endpoint.
pub(crate) fn build_http_client(
    endpoint: &str,
    api_key: &str,
    timeout: Duration,
    api_name: &str,
) -> StdResult<Client> {
    if endpoint.is_empty() || api_key.is_empty() {
        return Err(DeliveryError::InvalidConfiguration(format!(
            "{api_name} endpoint and API key are required"
        ))
        .into());
    }

    Ok(Client::builder()
        .timeout(timeout)
        .build()
        .map_err(DeliveryError::from)?)
}

/// Posts a JSON body to a Promoted API and fails on a non success status.
pub(crate) async fn post_json<T: Serialize + Sync>(
    client: &Client,
    endpoint: &str,
    api_key: &str,
    body: &T,
) -> StdResult<reqwest::Response> {
    let response = client
        .post(endpoint)
        .header(API_KEY_HEADER, api_key)
        .json(body)
        .send()
        .await
        .map_err(DeliveryError::from)?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(DeliveryError::Remote {
            status: status.as_u16(),
            body,
        }
        .into());
    }

    Ok(response)
}

/// Ranks requests with the Promoted Delivery API over HTTP.
pub struct HttpDeliveryApi {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpDeliveryApi {
    /// Creates a new `HttpDeliveryApi` instance for the given endpoint.
    pub fn try_new(endpoint: &str, api_key: &str, timeout: Duration) -> StdResult<Self> {
        Ok(Self {
            client: build_http_client(endpoint, api_key, timeout, "delivery")?,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl DeliveryApi for HttpDeliveryApi {
    async fn run_delivery(&self, request: &Request) -> StdResult<Response> {
        debug!(
            "Delivery API request: {}",
            serde_json::to_string(request).unwrap_or_default()
        );
        let response = post_json(&self.client, &self.endpoint, &self.api_key, request).await?;

        Ok(response
            .json::<Response>()
            .await
            .map_err(DeliveryError::from)?)
    }
}
