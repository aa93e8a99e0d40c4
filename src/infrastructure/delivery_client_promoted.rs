use std::{sync::Arc, time::Duration};

use chrono::Utc;
use log::{debug, info, warn};
use tokio::{sync::Mutex, task::JoinSet};

use crate::{
    ClientInfo, ClientType, DEFAULT_TIMEOUT_MILLIS, DeliveryApi, DeliveryClient, DeliveryConfig,
    DeliveryError, DeliveryRequest, DeliveryResponse, ExecutionServer, HttpDeliveryApi,
    HttpMetricsApi, LogRequest, MetricsApi, Request, Response, SdkDelivery, StdResult, Timing,
    TrafficType,
};

/// Default cap on the number of insertions sent in a single request.
pub const DEFAULT_MAX_REQUEST_INSERTIONS: usize = 1000;

/// Version reported in delivery logs of in-process deliveries.
pub const SERVER_VERSION: &str = concat!("rs.", env!("CARGO_PKG_VERSION"));

/// A delivery client for the Promoted Delivery and Metrics APIs.
///
/// Requests are ranked by the Delivery API, unless they are only logged or the API call
/// fails: they are then ranked in process and logged to the Metrics API.
pub struct PromotedDeliveryClient {
    delivery_api: Arc<dyn DeliveryApi>,
    metrics_api: Arc<dyn MetricsApi>,
    sdk_delivery: SdkDelivery,
    max_request_insertions: usize,
    shadow_traffic_delivery_rate: f64,
    blocking_shadow_traffic: bool,
    shadow_traffic_tasks: Mutex<JoinSet<()>>,
}

impl PromotedDeliveryClient {
    /// Creates a new `PromotedDeliveryClient` instance with the given APIs and default options.
    pub fn new(delivery_api: Arc<dyn DeliveryApi>, metrics_api: Arc<dyn MetricsApi>) -> Self {
        Self {
            delivery_api,
            metrics_api,
            sdk_delivery: SdkDelivery::new(),
            max_request_insertions: DEFAULT_MAX_REQUEST_INSERTIONS,
            shadow_traffic_delivery_rate: 0.0,
            blocking_shadow_traffic: false,
            shadow_traffic_tasks: Mutex::new(JoinSet::new()),
        }
    }

    /// Waits for the pending non blocking shadow traffic calls.
    ///
    /// Must be awaited before the runtime shuts down, otherwise pending calls are cancelled.
    pub async fn flush_shadow_traffic(&self) {
        let mut shadow_traffic_tasks = self.shadow_traffic_tasks.lock().await;
        while let Some(result) = shadow_traffic_tasks.join_next().await {
            if let Err(e) = result {
                warn!("Shadow traffic task failed: {e}");
            }
        }
    }

    /// Returns a builder for a `PromotedDeliveryClient`.
    pub fn builder() -> PromotedDeliveryClientBuilder {
        PromotedDeliveryClientBuilder::default()
    }

    fn validate_request(request: &Request) -> Result<(), DeliveryError> {
        if !request.request_id.is_empty() {
            return Err(DeliveryError::InvalidRequest(
                "Request.requestId should not be set".to_string(),
            ));
        }
        if request.user_info.is_none() {
            return Err(DeliveryError::InvalidRequest(
                "Request.userInfo should be set".to_string(),
            ));
        }
        for insertion in &request.insertion {
            if !insertion.insertion_id.is_empty() {
                return Err(DeliveryError::InvalidRequest(
                    "Insertion.insertionId should not be set".to_string(),
                ));
            }
            if insertion.content_id.is_empty() {
                return Err(DeliveryError::InvalidRequest(
                    "Insertion.contentId should be set".to_string(),
                ));
            }
        }

        Ok(())
    }

    fn fill_request_defaults(&self, request: &mut Request) {
        request.client_info = Some(ClientInfo {
            client_type: ClientType::PlatformServer,
            traffic_type: TrafficType::Production,
        });
        if request.timing.is_none_or(|timing| timing.client_log_timestamp == 0) {
            request.timing = Some(Timing {
                client_log_timestamp: Utc::now().timestamp_millis().max(0) as u64,
            });
        }
        if request.client_request_id.is_empty() {
            request.client_request_id = uuid::Uuid::new_v4().to_string();
        }
        if request.insertion.len() > self.max_request_insertions {
            warn!(
                "Too many insertions: {}, truncating to {}",
                request.insertion.len(),
                self.max_request_insertions
            );
            request.insertion.truncate(self.max_request_insertions);
        }
    }

    fn should_send_shadow_traffic(&self) -> bool {
        self.shadow_traffic_delivery_rate > 0.0
            && rand::random::<f64>() < self.shadow_traffic_delivery_rate
    }

    async fn send_shadow_traffic(&self, request: &Request) {
        let mut shadow_request = request.clone();
        shadow_request.client_info = Some(ClientInfo {
            client_type: ClientType::PlatformServer,
            traffic_type: TrafficType::Shadow,
        });
        let delivery_api = Arc::clone(&self.delivery_api);
        let shadow_call = async move {
            match delivery_api.run_delivery(&shadow_request).await {
                Ok(_) => debug!(
                    "Shadow traffic sent for client request {}",
                    shadow_request.client_request_id
                ),
                Err(e) => warn!("Shadow traffic call failed: {e}"),
            }
        };
        if self.blocking_shadow_traffic {
            shadow_call.await;
        } else {
            let mut shadow_traffic_tasks = self.shadow_traffic_tasks.lock().await;
            while shadow_traffic_tasks.try_join_next().is_some() {}
            shadow_traffic_tasks.spawn(shadow_call);
        }
    }

    async fn log_sdk_delivery(&self, request: &Request, response: &Response) {
        let log_request =
            LogRequest::from_delivery(request, response, ExecutionServer::Sdk, SERVER_VERSION);
        if let Err(e) = self.metrics_api.run_metrics_logging(&log_request).await {
            warn!("Metrics logging failed: {e}");
        }
    }
}

#[async_trait::async_trait]
impl DeliveryClient for PromotedDeliveryClient {
    async fn deliver(&self, delivery_request: DeliveryRequest) -> StdResult<DeliveryResponse> {
        let DeliveryRequest {
            mut request,
            only_log,
            retrieval_insertion_offset,
        } = delivery_request;
        Self::validate_request(&request)?;
        self.fill_request_defaults(&mut request);
        info!(
            "Delivering client request {} with {} insertions",
            request.client_request_id,
            request.insertion.len()
        );

        if only_log {
            if self.should_send_shadow_traffic() {
                self.send_shadow_traffic(&request).await;
            }
        } else {
            match self.delivery_api.run_delivery(&request).await {
                Ok(response) => {
                    return Ok(DeliveryResponse::new(
                        response,
                        &request.client_request_id,
                        ExecutionServer::Api,
                    ));
                }
                Err(e) => warn!("Delivery API call failed, falling back to SDK delivery: {e}"),
            }
        }

        let response = self
            .sdk_delivery
            .run_delivery(&request, retrieval_insertion_offset)?;
        request.request_id = response.request_id.clone();
        self.log_sdk_delivery(&request, &response).await;

        Ok(DeliveryResponse::new(
            response,
            &request.client_request_id,
            ExecutionServer::Sdk,
        ))
    }
}

/// A builder for `PromotedDeliveryClient`.
///
/// The HTTP APIs are created from the endpoints and keys, unless APIs are injected.
pub struct PromotedDeliveryClientBuilder {
    delivery_endpoint: String,
    delivery_api_key: String,
    delivery_timeout: Duration,
    metrics_endpoint: String,
    metrics_api_key: String,
    metrics_timeout: Duration,
    max_request_insertions: usize,
    shadow_traffic_delivery_rate: f64,
    blocking_shadow_traffic: bool,
    delivery_api: Option<Arc<dyn DeliveryApi>>,
    metrics_api: Option<Arc<dyn MetricsApi>>,
}

impl Default for PromotedDeliveryClientBuilder {
    fn default() -> Self {
        Self {
            delivery_endpoint: String::new(),
            delivery_api_key: String::new(),
            delivery_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MILLIS),
            metrics_endpoint: String::new(),
            metrics_api_key: String::new(),
            metrics_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MILLIS),
            max_request_insertions: DEFAULT_MAX_REQUEST_INSERTIONS,
            shadow_traffic_delivery_rate: 0.0,
            blocking_shadow_traffic: false,
            delivery_api: None,
            metrics_api: None,
        }
    }
}

impl PromotedDeliveryClientBuilder {
    /// Fills the builder from a `DeliveryConfig`.
    pub fn with_config(self, config: &DeliveryConfig) -> Self {
        self.with_delivery_endpoint(&config.delivery_api_endpoint_url)
            .with_delivery_api_key(&config.delivery_api_key)
            .with_delivery_timeout(config.delivery_timeout)
            .with_metrics_endpoint(&config.metrics_api_endpoint_url)
            .with_metrics_api_key(&config.metrics_api_key)
            .with_metrics_timeout(config.metrics_timeout)
            .with_shadow_traffic_delivery_rate(config.shadow_traffic_delivery_rate)
            .with_blocking_shadow_traffic(config.blocking_shadow_traffic)
    }

    pub fn with_delivery_endpoint(mut self, endpoint: &str) -> Self {
        self.delivery_endpoint = endpoint.to_string();
        self
    }

    pub fn with_delivery_api_key(mut self, api_key: &str) -> Self {
        self.delivery_api_key = api_key.to_string();
        self
    }

    pub fn with_delivery_timeout(mut self, timeout: Duration) -> Self {
        self.delivery_timeout = timeout;
        self
    }

    pub fn with_metrics_endpoint(mut self, endpoint: &str) -> Self {
        self.metrics_endpoint = endpoint.to_string();
        self
    }

    pub fn with_metrics_api_key(mut self, api_key: &str) -> Self {
        self.metrics_api_key = api_key.to_string();
        self
    }

    pub fn with_metrics_timeout(mut self, timeout: Duration) -> Self {
        self.metrics_timeout = timeout;
        self
    }

    pub fn with_max_request_insertions(mut self, max_request_insertions: usize) -> Self {
        self.max_request_insertions = max_request_insertions;
        self
    }

    pub fn with_shadow_traffic_delivery_rate(mut self, rate: f64) -> Self {
        self.shadow_traffic_delivery_rate = rate;
        self
    }

    pub fn with_blocking_shadow_traffic(mut self, blocking: bool) -> Self {
        self.blocking_shadow_traffic = blocking;
        self
    }

    /// Uses the given Delivery API instead of an HTTP one.
    pub fn with_delivery_api(mut self, delivery_api: Arc<dyn DeliveryApi>) -> Self {
        self.delivery_api = Some(delivery_api);
        self
    }

    /// Uses the given Metrics API instead of an HTTP one.
    pub fn with_metrics_api(mut self, metrics_api: Arc<dyn MetricsApi>) -> Self {
        self.metrics_api = Some(metrics_api);
        self
    }

    /// Builds the client.
    pub fn build(self) -> StdResult<PromotedDeliveryClient> {
        if !(0.0..=1.0).contains(&self.shadow_traffic_delivery_rate) {
            return Err(DeliveryError::InvalidConfiguration(format!(
                "shadow traffic delivery rate must be between 0 and 1, got {}",
                self.shadow_traffic_delivery_rate
            ))
            .into());
        }
        if self.max_request_insertions == 0 {
            return Err(DeliveryError::InvalidConfiguration(
                "max request insertions must be positive".to_string(),
            )
            .into());
        }
        let delivery_api: Arc<dyn DeliveryApi> = match self.delivery_api {
            Some(delivery_api) => delivery_api,
            None => Arc::new(HttpDeliveryApi::try_new(
                &self.delivery_endpoint,
                &self.delivery_api_key,
                self.delivery_timeout,
            )?),
        };
        let metrics_api: Arc<dyn MetricsApi> = match self.metrics_api {
            Some(metrics_api) => metrics_api,
            None => Arc::new(HttpMetricsApi::try_new(
                &self.metrics_endpoint,
                &self.metrics_api_key,
                self.metrics_timeout,
            )?),
        };

        Ok(PromotedDeliveryClient {
            delivery_api,
            metrics_api,
            sdk_delivery: SdkDelivery::new(),
            max_request_insertions: self.max_request_insertions,
            shadow_traffic_delivery_rate: self.shadow_traffic_delivery_rate,
            blocking_shadow_traffic: self.blocking_shadow_traffic,
            shadow_traffic_tasks: Mutex::new(JoinSet::new()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::anyhow;

    use crate::{Insertion, MockDeliveryApi, MockMetricsApi};

    use super::*;

    fn api_response(content_ids: &[&str]) -> Response {
        Response {
            request_id: "request-1".to_string(),
            insertion: content_ids
                .iter()
                .enumerate()
                .map(|(position, content_id)| Insertion {
                    content_id: content_id.to_string(),
                    insertion_id: format!("insertion-{content_id}"),
                    position: Some(position as u64),
                    properties: None,
                })
                .collect(),
            paging_info: None,
        }
    }

    fn client(
        delivery_api: MockDeliveryApi,
        metrics_api: MockMetricsApi,
    ) -> PromotedDeliveryClient {
        PromotedDeliveryClient::new(Arc::new(delivery_api), Arc::new(metrics_api))
    }

    #[tokio::test]
    async fn deliver_with_delivery_api() {
        let delivery_api = {
            let mut delivery_api = MockDeliveryApi::new();
            delivery_api
                .expect_run_delivery()
                .withf(|request: &Request| {
                    request.client_info
                        == Some(ClientInfo {
                            client_type: ClientType::PlatformServer,
                            traffic_type: TrafficType::Production,
                        })
                        && request.timing.is_some_and(|t| t.client_log_timestamp > 0)
                        && !request.client_request_id.is_empty()
                })
                .returning(|_| Ok(api_response(&["2", "1"])))
                .times(1);

            delivery_api
        };
        let metrics_api = MockMetricsApi::new();

        let response = client(delivery_api, metrics_api)
            .deliver(DeliveryRequest::new(Request::dummy(2), false))
            .await
            .unwrap();

        assert_eq!(ExecutionServer::Api, response.execution_server);
        assert_eq!(api_response(&["2", "1"]), response.response);
        assert!(!response.client_request_id.is_empty());
    }

    #[tokio::test]
    async fn deliver_keeps_caller_client_request_id() {
        let delivery_api = {
            let mut delivery_api = MockDeliveryApi::new();
            delivery_api
                .expect_run_delivery()
                .withf(|request: &Request| request.client_request_id == "client-request-1")
                .returning(|_| Ok(api_response(&["1"])))
                .times(1);

            delivery_api
        };
        let request = Request {
            client_request_id: "client-request-1".to_string(),
            ..Request::dummy(1)
        };

        let response = client(delivery_api, MockMetricsApi::new())
            .deliver(DeliveryRequest::new(request, false))
            .await
            .unwrap();

        assert_eq!("client-request-1", response.client_request_id);
    }

    #[tokio::test]
    async fn deliver_falls_back_to_sdk_when_delivery_api_fails() {
        let delivery_api = {
            let mut delivery_api = MockDeliveryApi::new();
            delivery_api
                .expect_run_delivery()
                .returning(|_| Err(anyhow!("Delivery API unavailable")))
                .times(1);

            delivery_api
        };
        let metrics_api = {
            let mut metrics_api = MockMetricsApi::new();
            metrics_api
                .expect_run_metrics_logging()
                .withf(|log_request: &LogRequest| {
                    log_request.delivery_log.len() == 1
                        && log_request.delivery_log[0].execution.execution_server
                            == ExecutionServer::Sdk
                        && !log_request.delivery_log[0].request.request_id.is_empty()
                })
                .returning(|_| Ok(()))
                .times(1);

            metrics_api
        };

        let response = client(delivery_api, metrics_api)
            .deliver(DeliveryRequest::new(Request::dummy(2), false))
            .await
            .unwrap();

        assert_eq!(ExecutionServer::Sdk, response.execution_server);
        assert_eq!(2, response.insertions().len());
        assert_eq!("1", response.insertions()[0].content_id);
    }

    #[tokio::test]
    async fn deliver_only_log_skips_delivery_api() {
        let delivery_api = {
            let mut delivery_api = MockDeliveryApi::new();
            delivery_api.expect_run_delivery().times(0);

            delivery_api
        };
        let metrics_api = {
            let mut metrics_api = MockMetricsApi::new();
            metrics_api
                .expect_run_metrics_logging()
                .returning(|_| Ok(()))
                .times(1);

            metrics_api
        };

        let response = client(delivery_api, metrics_api)
            .deliver(DeliveryRequest::new(Request::dummy(3), true))
            .await
            .unwrap();

        assert_eq!(ExecutionServer::Sdk, response.execution_server);
        assert_eq!(3, response.insertions().len());
    }

    #[tokio::test]
    async fn deliver_tolerates_metrics_failure() {
        let metrics_api = {
            let mut metrics_api = MockMetricsApi::new();
            metrics_api
                .expect_run_metrics_logging()
                .returning(|_| Err(anyhow!("Metrics API unavailable")))
                .times(1);

            metrics_api
        };

        let response = client(MockDeliveryApi::new(), metrics_api)
            .deliver(DeliveryRequest::new(Request::dummy(1), true))
            .await
            .unwrap();

        assert_eq!(ExecutionServer::Sdk, response.execution_server);
    }

    #[tokio::test]
    async fn deliver_rejects_request_with_request_id() {
        let request = Request {
            request_id: "request-1".to_string(),
            ..Request::dummy(1)
        };

        client(MockDeliveryApi::new(), MockMetricsApi::new())
            .deliver(DeliveryRequest::new(request, false))
            .await
            .expect_err("Expected an invalid request");
    }

    #[tokio::test]
    async fn deliver_rejects_request_without_user_info() {
        let request = Request {
            user_info: None,
            ..Request::dummy(1)
        };

        client(MockDeliveryApi::new(), MockMetricsApi::new())
            .deliver(DeliveryRequest::new(request, false))
            .await
            .expect_err("Expected an invalid request");
    }

    #[tokio::test]
    async fn deliver_rejects_invalid_insertions() {
        let mut with_insertion_id = Request::dummy(1);
        with_insertion_id.insertion[0].insertion_id = "insertion-1".to_string();
        let mut without_content_id = Request::dummy(1);
        without_content_id.insertion[0].content_id = String::new();
        let client = client(MockDeliveryApi::new(), MockMetricsApi::new());

        for request in [with_insertion_id, without_content_id] {
            let error = client
                .deliver(DeliveryRequest::new(request, false))
                .await
                .expect_err("Expected an invalid request");
            assert!(matches!(
                error.downcast_ref::<DeliveryError>(),
                Some(DeliveryError::InvalidRequest(_))
            ));
        }
    }

    #[tokio::test]
    async fn deliver_truncates_insertions() {
        let delivery_api = {
            let mut delivery_api = MockDeliveryApi::new();
            delivery_api
                .expect_run_delivery()
                .withf(|request: &Request| request.insertion.len() == 2)
                .returning(|_| Ok(api_response(&["2", "1"])))
                .times(1);

            delivery_api
        };
        let client = PromotedDeliveryClient::builder()
            .with_delivery_api(Arc::new(delivery_api))
            .with_metrics_api(Arc::new(MockMetricsApi::new()))
            .with_max_request_insertions(2)
            .build()
            .unwrap();

        client
            .deliver(DeliveryRequest::new(Request::dummy(5), false))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn deliver_only_log_sends_blocking_shadow_traffic() {
        let delivery_api = {
            let mut delivery_api = MockDeliveryApi::new();
            delivery_api
                .expect_run_delivery()
                .withf(|request: &Request| {
                    request.client_info.map(|client_info| client_info.traffic_type)
                        == Some(TrafficType::Shadow)
                })
                .returning(|_| Ok(api_response(&["1"])))
                .times(1);

            delivery_api
        };
        let metrics_api = {
            let mut metrics_api = MockMetricsApi::new();
            metrics_api
                .expect_run_metrics_logging()
                .withf(|log_request: &LogRequest| {
                    log_request.client_info.map(|client_info| client_info.traffic_type)
                        == Some(TrafficType::Production)
                })
                .returning(|_| Ok(()))
                .times(1);

            metrics_api
        };
        let client = PromotedDeliveryClient::builder()
            .with_delivery_api(Arc::new(delivery_api))
            .with_metrics_api(Arc::new(metrics_api))
            .with_shadow_traffic_delivery_rate(1.0)
            .with_blocking_shadow_traffic(true)
            .build()
            .unwrap();

        let response = client
            .deliver(DeliveryRequest::new(Request::dummy(1), true))
            .await
            .unwrap();

        assert_eq!(ExecutionServer::Sdk, response.execution_server);
    }

    #[tokio::test]
    async fn deliver_tolerates_shadow_traffic_failure() {
        let delivery_api = {
            let mut delivery_api = MockDeliveryApi::new();
            delivery_api
                .expect_run_delivery()
                .returning(|_| Err(anyhow!("Delivery API unavailable")))
                .times(1);

            delivery_api
        };
        let metrics_api = {
            let mut metrics_api = MockMetricsApi::new();
            metrics_api
                .expect_run_metrics_logging()
                .returning(|_| Ok(()))
                .times(1);

            metrics_api
        };
        let client = PromotedDeliveryClient::builder()
            .with_delivery_api(Arc::new(delivery_api))
            .with_metrics_api(Arc::new(metrics_api))
            .with_shadow_traffic_delivery_rate(1.0)
            .with_blocking_shadow_traffic(true)
            .build()
            .unwrap();

        client
            .deliver(DeliveryRequest::new(Request::dummy(1), true))
            .await
            .unwrap();
    }

    struct SlowDeliveryApi {
        delay: Duration,
        total_calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl DeliveryApi for SlowDeliveryApi {
        async fn run_delivery(&self, _request: &Request) -> StdResult<Response> {
            tokio::time::sleep(self.delay).await;
            self.total_calls.fetch_add(1, Ordering::SeqCst);

            Ok(api_response(&["1"]))
        }
    }

    #[tokio::test]
    async fn deliver_only_log_sends_non_blocking_shadow_traffic() {
        let delivery_api = Arc::new(SlowDeliveryApi {
            delay: Duration::from_millis(20),
            total_calls: Default::default(),
        });
        let metrics_api = {
            let mut metrics_api = MockMetricsApi::new();
            metrics_api
                .expect_run_metrics_logging()
                .returning(|_| Ok(()))
                .times(1);

            metrics_api
        };
        let client = PromotedDeliveryClient::builder()
            .with_delivery_api(delivery_api.clone())
            .with_metrics_api(Arc::new(metrics_api))
            .with_shadow_traffic_delivery_rate(1.0)
            .with_blocking_shadow_traffic(false)
            .build()
            .unwrap();

        let response = client
            .deliver(DeliveryRequest::new(Request::dummy(1), true))
            .await
            .unwrap();
        let total_calls_on_return = delivery_api.total_calls.load(Ordering::SeqCst);
        client.flush_shadow_traffic().await;

        assert_eq!(ExecutionServer::Sdk, response.execution_server);
        assert_eq!(0, total_calls_on_return);
        assert_eq!(1, delivery_api.total_calls.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn flush_shadow_traffic_without_pending_calls() {
        let client = client(MockDeliveryApi::new(), MockMetricsApi::new());

        client.flush_shadow_traffic().await;
    }

    #[tokio::test]
    async fn deliver_only_log_without_shadow_traffic() {
        let delivery_api = {
            let mut delivery_api = MockDeliveryApi::new();
            delivery_api.expect_run_delivery().times(0);

            delivery_api
        };
        let metrics_api = {
            let mut metrics_api = MockMetricsApi::new();
            metrics_api
                .expect_run_metrics_logging()
                .returning(|_| Ok(()))
                .times(1);

            metrics_api
        };
        let client = PromotedDeliveryClient::builder()
            .with_delivery_api(Arc::new(delivery_api))
            .with_metrics_api(Arc::new(metrics_api))
            .with_shadow_traffic_delivery_rate(0.0)
            .build()
            .unwrap();

        client
            .deliver(DeliveryRequest::new(Request::dummy(1), true))
            .await
            .unwrap();
    }

    #[test]
    fn build_rejects_invalid_shadow_traffic_rate() {
        for rate in [-0.1, 1.5, f64::NAN] {
            let result = PromotedDeliveryClient::builder()
                .with_delivery_api(Arc::new(MockDeliveryApi::new()))
                .with_metrics_api(Arc::new(MockMetricsApi::new()))
                .with_shadow_traffic_delivery_rate(rate)
                .build();

            assert!(result.is_err(), "Expected an invalid shadow traffic rate: {rate}");
        }
    }

    #[test]
    fn build_requires_endpoints_without_injected_apis() {
        let result = PromotedDeliveryClient::builder().build();

        assert!(result.is_err(), "Expected missing endpoints");
    }

    #[test]
    fn build_from_config() {
        let config = DeliveryConfig {
            metrics_api_endpoint_url: "http://localhost:8081/log".to_string(),
            metrics_api_key: "metrics-key".to_string(),
            delivery_api_endpoint_url: "http://localhost:8080/deliver".to_string(),
            delivery_api_key: "delivery-key".to_string(),
            shadow_traffic_delivery_rate: 0.5,
            ..DeliveryConfig::default()
        };

        let client = PromotedDeliveryClient::builder()
            .with_config(&config)
            .build()
            .unwrap();

        assert_eq!(0.5, client.shadow_traffic_delivery_rate);
        assert!(!client.blocking_shadow_traffic);
    }
}
