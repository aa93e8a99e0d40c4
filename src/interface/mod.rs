mod delivery_api;
mod delivery_client;
mod metrics_api;

pub use delivery_api::*;
pub use delivery_client::*;
pub use metrics_api::*;
