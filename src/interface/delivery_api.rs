use crate::{Request, Response, StdResult};

/// A trait for ranking a request with the remote Delivery API.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DeliveryApi: Sync + Send {
    /// Sends the request to the Delivery API and returns the ranked page.
    async fn run_delivery(&self, request: &Request) -> StdResult<Response>;
}
