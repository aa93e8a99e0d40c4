use crate::{DeliveryRequest, DeliveryResponse, StdResult};

/// A trait for delivering ranked content to a platform.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DeliveryClient: Sync + Send {
    /// Ranks the request insertions.
    async fn deliver(&self, request: DeliveryRequest) -> StdResult<DeliveryResponse>;
}
