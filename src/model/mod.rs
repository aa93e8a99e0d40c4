mod catalog;
mod config;
mod error;
mod request;
mod response;

pub use catalog::*;
pub use config::*;
pub use error::*;
pub use request::*;
pub use response::*;
