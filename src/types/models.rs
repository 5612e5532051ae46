// src/types/models.rs
//! Records served by the Net API. The client passes them through untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub type JsonObject = Map<String, Value>;

// ===== Users =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub profile: UserProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Profile name when set, email otherwise.
    pub fn display_name(&self) -> &str {
        self.profile
            .data
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.email)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub data: ProfileData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_bio: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

// ===== Organizations =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrgStatus {
    Active,
    Deleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OrgRole {
    Owner,
    Admin,
    Member,
}

impl OrgRole {
    pub fn can_manage(self) -> bool {
        matches!(self, OrgRole::Owner | OrgRole::Admin)
    }
}

/// Roles an invite or an approved join request may grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InviteRole {
    Admin,
    Member,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub data: Option<JsonObject>,
    pub status: OrgStatus,
    #[serde(default)]
    pub role: Option<OrgRole>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgMember {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub role: OrgRole,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgInvite {
    pub id: String,
    pub org_id: String,
    #[serde(default)]
    pub org_name: Option<String>,
    #[serde(default)]
    pub org_slug: Option<String>,
    #[serde(default)]
    pub invitee_email: Option<String>,
    #[serde(default)]
    pub inviter_name: Option<String>,
    pub role: InviteRole,
    #[serde(default)]
    pub status: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinRequestStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRequest {
    pub id: String,
    pub org_id: String,
    #[serde(default)]
    pub org_name: Option<String>,
    #[serde(default)]
    pub org_slug: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub status: JoinRequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ===== Posts & applications =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub author_id: String,
    #[serde(default)]
    pub org_id: Option<String>,
    #[serde(default)]
    pub org_name: Option<String>,
    #[serde(default)]
    pub org_status: Option<String>,
    pub title: String,
    #[serde(default)]
    pub short_content: Option<String>,
    #[serde(default)]
    pub long_content: Option<String>,
    #[serde(default)]
    pub data: Option<JsonObject>,
    pub expires_at: DateTime<Utc>,
    pub status: PostStatus,
    #[serde(default)]
    pub application_count: u32,
    #[serde(default)]
    pub my_application_status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
    Withdrawn,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub post_id: String,
    #[serde(default)]
    pub post_title: Option<String>,
    #[serde(default)]
    pub post_status: Option<String>,
    pub applicant_id: String,
    #[serde(default)]
    pub applicant_name: Option<String>,
    #[serde(default)]
    pub data: Option<JsonObject>,
    #[serde(default)]
    pub content_md: Option<String>,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ===== Channels & messages =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelStatus {
    Active,
    Archived,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub application_id: String,
    pub post_id: String,
    pub user1_id: String,
    pub user1_name: String,
    pub user2_id: String,
    pub user2_name: String,
    #[serde(default)]
    pub context: Option<JsonObject>,
    #[serde(default)]
    pub last_message_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
    pub status: ChannelStatus,
    pub created_at: DateTime<Utc>,
}

impl Channel {
    /// Name of the participant that is not `user_id`.
    pub fn peer_name(&self, user_id: &str) -> &str {
        if self.user1_id == user_id {
            &self.user2_name
        } else {
            &self.user1_name
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub channel_id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub content_md: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// ===== Dashboard summary =====

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserSummary {
    pub unread_messages: UnreadMessages,
    pub pending_applicants: PendingApplicants,
    pub my_applications: MyApplicationsSummary,
    pub org_invites: SummaryBucket<InviteSummaryItem>,
    pub org_join_requests: SummaryBucket<JoinRequestSummaryItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnreadMessages {
    pub total: u32,
    #[serde(default)]
    pub channels: Vec<ChannelUnread>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelUnread {
    pub channel_id: String,
    pub unread_count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PendingApplicants {
    pub total: u32,
    #[serde(default)]
    pub posts: Vec<PostPendingCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPendingCount {
    pub post_id: String,
    pub title: String,
    pub pending_count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MyApplicationsSummary {
    pub pending: SummaryBucket<Application>,
    pub accepted: SummaryBucket<Application>,
    pub rejected: SummaryBucket<Application>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryBucket<T> {
    pub count: u32,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Default for SummaryBucket<T> {
    fn default() -> Self {
        Self {
            count: 0,
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteSummaryItem {
    pub invite_id: String,
    pub org_id: String,
    pub org_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRequestSummaryItem {
    pub request_id: String,
    pub org_id: String,
    pub org_name: String,
    pub user_id: String,
    pub user_name: String,
}

// ===== Display helpers =====

macro_rules! lowercase_display {
    ($($ty:ty),* $(,)?) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let text = serde_json::to_value(self)
                    .ok()
                    .and_then(|v| v.as_str().map(str::to_string))
                    .unwrap_or_default();
                f.write_str(&text)
            }
        })*
    };
}

lowercase_display!(
    OrgStatus,
    OrgRole,
    InviteRole,
    JoinRequestStatus,
    PostStatus,
    ApplicationStatus,
    ChannelStatus,
);
