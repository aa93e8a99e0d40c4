//! Example client for the Promoted Delivery API.
//!
//! The library holds the delivery model, the traits at the remote API seams and their
//! implementations. The binary wires them to rank a small product catalog.

mod infrastructure;
mod interface;
mod model;

pub use infrastructure::*;
pub use interface::*;
pub use model::*;
