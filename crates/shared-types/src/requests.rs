//! Shift swap requests as held by the remote request store

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier assigned by the request store.
///
/// The store may answer with a JSON string or a number; both are kept as text.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RequestId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
            Missing(()),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => RequestId(text),
            RawId::Number(number) => RequestId(number.to_string()),
            RawId::Missing(()) => RequestId::default(),
        })
    }
}

/// Lifecycle state of a request: open until someone accepts it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestStatus {
    #[default]
    Open,
    Accepted,
    Other(String),
}

impl RequestStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RequestStatus::Open => "open",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Other(status) => status,
        }
    }
}

impl From<String> for RequestStatus {
    fn from(status: String) -> Self {
        match status.trim().to_lowercase().as_str() {
            "open" => RequestStatus::Open,
            "accepted" => RequestStatus::Accepted,
            _ => RequestStatus::Other(status),
        }
    }
}

impl From<RequestStatus> for String {
    fn from(status: RequestStatus) -> Self {
        status.as_str().to_string()
    }
}

impl Serialize for RequestStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RequestStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let status = Option::<String>::deserialize(deserializer)?;
        Ok(status.map(RequestStatus::from).unwrap_or(RequestStatus::Other(String::new())))
    }
}

/// A request as listed by the store. The client never edits these in place;
/// it re-fetches after every successful add or accept.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShiftRequest {
    #[serde(default)]
    pub id: RequestId,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub date: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub name: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub code: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub note: String,
    #[serde(default = "missing_status")]
    pub status: RequestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepter_name: Option<String>,
}

/// Text fields the store may send as `null`
fn empty_if_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn missing_status() -> RequestStatus {
    RequestStatus::Other(String::new())
}

impl ShiftRequest {
    pub fn is_open(&self) -> bool {
        self.status == RequestStatus::Open
    }

    pub fn is_accepted(&self) -> bool {
        self.status == RequestStatus::Accepted
    }
}
