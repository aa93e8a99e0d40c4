use thiserror::Error;

/// The standard result type used throughout the application.
pub type StdResult<T> = Result<T, anyhow::Error>;

/// Delivery error
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// The request does not satisfy the delivery contract
    #[error("Invalid delivery request: {0}")]
    InvalidRequest(String),

    /// The client was built with invalid options
    #[error("Invalid client configuration: {0}")]
    InvalidConfiguration(String),

    /// The remote API answered with a non success status
    #[error("Remote error ({status}): {body}")]
    Remote { status: u16, body: String },

    /// The remote API could not be reached
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
