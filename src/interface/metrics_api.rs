use crate::{LogRequest, StdResult};

/// A trait for logging delivery events to the Metrics API.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetricsApi: Sync + Send {
    /// Sends the log request to the Metrics API.
    async fn run_metrics_logging(&self, log_request: &LogRequest) -> StdResult<()>;
}
