use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{ClientInfo, Insertion, Request, Timing, UserInfo};

/// Paging state returned with a ranked page.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PagingInfo {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub paging_id: String,

    /// Cursor to request the next page.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cursor: String,
}

/// A ranked page returned by the Delivery API or by in-process delivery.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub request_id: String,

    /// The ranked insertions, in display order.
    #[serde(default)]
    pub insertion: Vec<Insertion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging_info: Option<PagingInfo>,
}

/// Where a delivery request was ranked.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionServer {
    #[default]
    UnknownExecutionServer,
    /// Ranked by the Delivery API.
    Api,
    /// Ranked in process by the client.
    Sdk,
}

impl Display for ExecutionServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionServer::UnknownExecutionServer => write!(f, "UNKNOWN_EXECUTION_SERVER"),
            ExecutionServer::Api => write!(f, "API"),
            ExecutionServer::Sdk => write!(f, "SDK"),
        }
    }
}

/// The outcome of a delivery client call.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryResponse {
    /// The ranked page.
    pub response: Response,

    /// The client request identifier the request was sent with.
    pub client_request_id: String,

    /// Where the request was ranked.
    pub execution_server: ExecutionServer,
}

impl DeliveryResponse {
    /// Creates a new `DeliveryResponse` instance.
    pub fn new(
        response: Response,
        client_request_id: &str,
        execution_server: ExecutionServer,
    ) -> Self {
        Self {
            response,
            client_request_id: client_request_id.to_string(),
            execution_server,
        }
    }

    /// Retrieves the ranked insertions.
    pub fn insertions(&self) -> &[Insertion] {
        &self.response.insertion
    }
}

/// Describes how a logged delivery was executed.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryExecution {
    pub execution_server: ExecutionServer,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub server_version: String,
}

/// A request and the response it was served, as logged to the Metrics API.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryLog {
    pub request: Request,
    pub response: Response,
    pub execution: DeliveryExecution,
}

/// A batch of events sent to the Metrics API.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_info: Option<UserInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_info: Option<ClientInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<Timing>,

    #[serde(default)]
    pub delivery_log: Vec<DeliveryLog>,
}

impl LogRequest {
    /// Creates a `LogRequest` holding a single delivery log entry.
    pub fn from_delivery(
        request: &Request,
        response: &Response,
        execution_server: ExecutionServer,
        server_version: &str,
    ) -> Self {
        Self {
            user_info: request.user_info.clone(),
            client_info: request.client_info,
            timing: request.timing,
            delivery_log: vec![DeliveryLog {
                request: request.clone(),
                response: response.clone(),
                execution: DeliveryExecution {
                    execution_server,
                    server_version: server_version.to_string(),
                },
            }],
        }
    }
}
