mod delivery_api_http;
mod delivery_client_promoted;
mod delivery_sdk;
mod metrics_api_http;

pub use delivery_api_http::*;
pub use delivery_client_promoted::*;
pub use delivery_sdk::*;
pub use metrics_api_http::*;
