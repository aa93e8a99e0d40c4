use std::{fmt::Display, time::Duration};

use thiserror::Error;

/// Default timeout applied to both the Delivery and the Metrics API calls.
pub const DEFAULT_TIMEOUT_MILLIS: u64 = 1000;

/// Configuration error
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required setting is empty
    #[error("{0} needs to be specified")]
    Missing(&'static str),
}

/// Settings needed to reach the Promoted Delivery and Metrics APIs.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryConfig {
    /// The Metrics API endpoint.
    pub metrics_api_endpoint_url: String,

    /// The Metrics API key.
    pub metrics_api_key: String,

    /// The Delivery API endpoint.
    pub delivery_api_endpoint_url: String,

    /// The Delivery API key.
    pub delivery_api_key: String,

    /// Skip the Delivery API and only log the request to the Metrics API.
    pub only_log: bool,

    /// Share of only-log requests also sent to the Delivery API as shadow traffic.
    pub shadow_traffic_delivery_rate: f64,

    /// Wait for shadow traffic calls to complete.
    pub blocking_shadow_traffic: bool,

    /// Delivery API timeout.
    pub delivery_timeout: Duration,

    /// Metrics API timeout.
    pub metrics_timeout: Duration,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            metrics_api_endpoint_url: String::new(),
            metrics_api_key: String::new(),
            delivery_api_endpoint_url: String::new(),
            delivery_api_key: String::new(),
            only_log: false,
            shadow_traffic_delivery_rate: 0.0,
            blocking_shadow_traffic: false,
            delivery_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MILLIS),
            metrics_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MILLIS),
        }
    }
}

impl DeliveryConfig {
    /// Checks that every endpoint and key has been provided.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("metricsApiEndpointUrl", &self.metrics_api_endpoint_url),
            ("metricsApiKey", &self.metrics_api_key),
            ("deliveryApiEndpointUrl", &self.delivery_api_endpoint_url),
            ("deliveryApiKey", &self.delivery_api_key),
        ];
        match required.iter().find(|(_, value)| value.is_empty()) {
            Some((name, _)) => Err(ConfigError::Missing(*name)),
            None => Ok(()),
        }
    }
}

impl Display for DeliveryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DeliveryConfig: metrics={}, delivery={}, only_log={}, shadow_rate={}, blocking_shadow={}",
            self.metrics_api_endpoint_url,
            self.delivery_api_endpoint_url,
            self.only_log,
            self.shadow_traffic_delivery_rate,
            self.blocking_shadow_traffic
        )
    }
}

/// Parses a boolean setting, falling back to `default` when unset or malformed.
pub fn parse_bool_or(value: Option<&str>, default: bool) -> bool {
    match value {
        Some("1" | "t" | "T" | "TRUE" | "true" | "True") => true,
        Some("0" | "f" | "F" | "FALSE" | "false" | "False") => false,
        _ => default,
    }
}

/// Parses a float setting, falling back to `default` when unset or malformed.
pub fn parse_f64_or(value: Option<&str>, default: f64) -> f64 {
    value
        .and_then(|value| value.parse::<f64>().ok())
        .unwrap_or(default)
}

/// Parses an unsigned integer setting, falling back to `default` when unset or malformed.
pub fn parse_u64_or(value: Option<&str>, default: u64) -> u64 {
    value
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default)
}
