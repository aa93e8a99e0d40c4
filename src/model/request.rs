use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Identifies the user a request is made for.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// Anonymous user identifier, stable across sessions.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub anon_user_id: String,

    /// Platform user identifier.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_id: String,
}

impl UserInfo {
    /// Creates a new `UserInfo` instance.
    pub fn new(anon_user_id: &str, user_id: &str) -> Self {
        Self {
            anon_user_id: anon_user_id.to_string(),
            user_id: user_id.to_string(),
        }
    }
}

/// The surface a request is ranked for.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UseCase {
    #[default]
    UnknownUseCase,
    Custom,
    Search,
    SearchSuggestions,
    Feed,
    RelatedContent,
    CloseUp,
    CategoryContent,
    MyContent,
    MySavedContent,
    SellerContent,
    Discover,
}

/// Paging parameters, starting either at an offset or at a cursor.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    /// Identifier of the paging sequence.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub paging_id: String,

    /// Number of insertions requested, `0` means all of them.
    #[serde(default)]
    pub size: i32,

    /// Offset of the first insertion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i32>,

    /// Opaque cursor returned by a previous response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl Paging {
    /// Creates a `Paging` starting at the given offset.
    pub fn with_offset(offset: i32, size: i32) -> Self {
        Self {
            offset: Some(offset),
            size,
            ..Self::default()
        }
    }
}

/// Free-form properties attached to a request or an insertion.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Properties {
    /// The properties as a JSON object.
    #[serde(rename = "struct", default, skip_serializing_if = "Map::is_empty")]
    pub struct_field: Map<String, Value>,
}

impl From<Map<String, Value>> for Properties {
    fn from(struct_field: Map<String, Value>) -> Self {
        Self { struct_field }
    }
}

/// A content item, sent to be ranked or returned ranked.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Insertion {
    /// Identifier of the content in the platform catalog.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content_id: String,

    /// Identifier of this impression, assigned by Promoted.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub insertion_id: String,

    /// Absolute position in the ranked list.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_u64"
    )]
    pub position: Option<u64>,

    /// Properties of the content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
}

impl Insertion {
    /// Creates an `Insertion` for the given content.
    pub fn new(content_id: &str) -> Self {
        Self {
            content_id: content_id.to_string(),
            ..Self::default()
        }
    }
}

/// Protobuf JSON writes 64-bit integers as strings, accept both forms.
fn deserialize_optional_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => number
            .as_u64()
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid position: {number}"))),
        Some(Value::String(text)) => text
            .parse::<u64>()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid position {text:?}: {e}"))),
        Some(other) => Err(serde::de::Error::custom(format!("invalid position: {other}"))),
    }
}

/// The kind of client issuing a request.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientType {
    #[default]
    UnknownRequestClient,
    PlatformServer,
    PlatformClient,
}

/// The kind of traffic a request belongs to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrafficType {
    #[default]
    UnknownTrafficType,
    Production,
    Replay,
    Shadow,
}

/// Describes the client issuing a request.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    #[serde(default)]
    pub client_type: ClientType,
    #[serde(default)]
    pub traffic_type: TrafficType,
}

/// Client side timing of a request.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Timing {
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub client_log_timestamp: u64,
}

/// A ranking request for the Delivery API.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_info: Option<UserInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<Timing>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_info: Option<ClientInfo>,

    /// Assigned by Promoted, must be left empty by callers.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub request_id: String,

    /// Caller side identifier used to join logs.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client_request_id: String,

    #[serde(default)]
    pub use_case: UseCase,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub search_query: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,

    #[serde(default)]
    pub disable_personalization: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,

    /// The content items to rank.
    #[serde(default)]
    pub insertion: Vec<Insertion>,
}

impl Request {
    /// Creates a dummy `Request` for testing purposes.
    #[cfg(test)]
    pub(crate) fn dummy(total_insertions: usize) -> Self {
        Self {
            user_info: Some(UserInfo::new("anon-1", "user-1")),
            use_case: UseCase::Search,
            search_query: "dummy".to_string(),
            insertion: (1..=total_insertions)
                .map(|i| Insertion::new(&i.to_string()))
                .collect(),
            ..Self::default()
        }
    }
}

/// A request handed to a delivery client, with the options driving its execution.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryRequest {
    /// The ranking request.
    pub request: Request,

    /// Skip the Delivery API, rank in process and log to the Metrics API.
    pub only_log: bool,

    /// Position of the first insertion of `request` in the full retrieval list.
    pub retrieval_insertion_offset: u64,
}

impl DeliveryRequest {
    /// Creates a new `DeliveryRequest` instance.
    pub fn new(request: Request, only_log: bool) -> Self {
        Self {
            request,
            only_log,
            retrieval_insertion_offset: 0,
        }
    }
}

impl Display for DeliveryRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DeliveryRequest: client_request_id={}, use_case={:?}, insertions={}, only_log={}",
            self.request.client_request_id,
            self.request.use_case,
            self.request.insertion.len(),
            self.only_log
        )
    }
}
