use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ===== Envelopes =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub limit: u32,
    pub skip: u32,
    pub has_more: bool,
}

/// List endpoints answer with the full envelope; it is never unwrapped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Paginated<T> {
    pub fn has_more(&self) -> bool {
        self.pagination.has_more
    }

    /// `skip` for the following page, if the server says there is one.
    pub fn next_skip(&self) -> Option<u32> {
        self.has_more()
            .then(|| {
                let len = u32::try_from(self.data.len()).unwrap_or(u32::MAX);
                self.pagination.skip.saturating_add(len)
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Strip a single-object `{ "data": T }` wrapper.
///
/// Only objects that carry `data`, carry no `pagination`, and whose `data`
/// is not an array are unwrapped. Everything else (list envelopes, bare
/// action results, scalars) passes through untouched. A bare action result
/// that happens to nest a non-list `data` is unwrapped as well; callers
/// rely on this exact rule.
pub fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if !map.contains_key("pagination") => match map.remove("data") {
            Some(data) if !data.is_array() => data,
            Some(data) => {
                map.insert("data".to_string(), data);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    }
}

/// Human-readable message for a failed response body.
pub fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

// ===== Action results =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Returned by delete and close actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceAck {
    pub message: String,
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteAccepted {
    pub message: String,
    pub org_id: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRequestApproved {
    pub message: String,
    pub user_id: String,
    pub org_id: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationAccepted {
    pub message: String,
    pub channel_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchActionResponse {
    pub message: String,
    pub results: Vec<BatchItemResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItemResult {
    pub id: String,
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkedRead {
    pub message: String,
    pub message_id: String,
    pub read_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkedUnread {
    pub message: String,
    pub message_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkedAllRead {
    pub message: String,
    pub channel_id: String,
    pub messages_marked: u32,
}
