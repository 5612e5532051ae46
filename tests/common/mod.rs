#![allow(dead_code)]

use httpmock::MockServer;
use net_studio::{NetClient, Session};
use serde_json::{json, Value};
use std::sync::Arc;

pub fn client_for(server: &MockServer, token: Option<&str>) -> NetClient {
    let session = Arc::new(Session::ephemeral(token.map(str::to_string)));
    NetClient::new(server.base_url(), session).unwrap()
}

pub fn user(id: &str) -> Value {
    json!({
        "id": id,
        "email": format!("{}@example.com", id),
        "profile": {"data": {"name": id}},
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-01-01T00:00:00Z"
    })
}

pub fn post(id: &str, author_id: &str) -> Value {
    json!({
        "id": id,
        "author_id": author_id,
        "title": "Backend engineer",
        "expires_at": "2026-12-31T00:00:00Z",
        "status": "open",
        "application_count": 1,
        "created_at": "2026-10-01T00:00:00Z",
        "updated_at": "2026-10-01T00:00:00Z"
    })
}

pub fn org(id: &str, role: Option<&str>) -> Value {
    json!({
        "id": id,
        "name": "Acme",
        "slug": "acme",
        "status": "active",
        "role": role,
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-01-01T00:00:00Z"
    })
}

pub fn application(id: &str, post_id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "post_id": post_id,
        "applicant_id": "u2",
        "content_md": "hello",
        "status": status,
        "created_at": "2026-10-02T00:00:00Z",
        "updated_at": "2026-10-02T00:00:00Z"
    })
}

pub fn channel(id: &str) -> Value {
    json!({
        "id": id,
        "application_id": "a1",
        "post_id": "p1",
        "user1_id": "u1",
        "user1_name": "Ada",
        "user2_id": "u2",
        "user2_name": "Grace",
        "expires_at": "2026-12-01T00:00:00Z",
        "status": "active",
        "created_at": "2026-10-01T00:00:00Z"
    })
}

pub fn message(id: &str, sender_id: &str, created_at: &str) -> Value {
    json!({
        "id": id,
        "channel_id": "c1",
        "sender_id": sender_id,
        "sender_name": sender_id,
        "content_md": format!("message {}", id),
        "is_read": false,
        "created_at": created_at
    })
}

pub fn page(items: Vec<Value>) -> Value {
    json!({
        "data": items,
        "pagination": {"limit": 50, "skip": 0, "has_more": false}
    })
}

pub fn empty_summary() -> Value {
    json!({
        "unread_messages": {"total": 0, "channels": []},
        "pending_applicants": {"total": 0, "posts": []},
        "my_applications": {
            "pending": {"count": 0, "items": []},
            "accepted": {"count": 0, "items": []},
            "rejected": {"count": 0, "items": []}
        },
        "org_invites": {"count": 0, "items": []},
        "org_join_requests": {"count": 0, "items": []}
    })
}
