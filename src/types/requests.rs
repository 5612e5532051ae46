// src/types/requests.rs
//! JSON bodies sent to the Net API. Absent optional fields are omitted.

use serde::{Deserialize, Serialize};

use super::models::{InviteRole, JsonObject, OrgRole, ProfileData};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ProfileData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ProfileUpdate<'a> {
    pub profile: &'a ProfilePatch,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewOrganization {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonObject>,
}

/// Partial update. `Some(None)` sends an explicit `null` to clear a field.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrganizationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonObject>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RoleChange {
    pub role: OrgRole,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct InviteRequest<'a> {
    pub email: &'a str,
    pub role: InviteRole,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct JoinRequestBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ApprovalBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<InviteRole>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
}

/// Partial update. `org_id: Some(None)` detaches the post from its org.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<Option<String>>,
}

/// Application payload. The default value serializes to `{}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_md: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RejectionBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BatchAction {
    Accept,
    Reject,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct BatchRequest<'a> {
    pub action: BatchAction,
    pub application_ids: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct MessageBody<'a> {
    pub content_md: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_draft_serializes_to_empty_object() {
        let body = serde_json::to_value(ApplicationDraft::default()).unwrap();
        assert_eq!(body, json!({}));
    }

    #[test]
    fn test_patch_distinguishes_clear_from_absent() {
        let patch = OrganizationPatch {
            name: Some("Acme".to_string()),
            website: Some(None),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(patch).unwrap(),
            json!({"name": "Acme", "website": null})
        );
    }
}
