mod common;

use httpmock::prelude::*;
use net_studio::types::OrgRole;
use net_studio::views::{Conversation, Dashboard, Inbox, OrgDetail, PostBoard, PostDetail};
use serde_json::json;

use common::client_for;

#[tokio::test]
async fn test_post_detail_for_owner_loads_applications() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/posts/p1");
            then.status(200).json_body(json!({"data": common::post("p1", "u1")}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/users/me");
            then.status(200).json_body(json!({"data": common::user("u1")}));
        })
        .await;
    let applications = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/posts/p1/applications")
                .query_param("limit", "50");
            then.status(200).json_body(common::page(vec![
                common::application("a1", "p1", "pending"),
                common::application("a2", "p1", "accepted"),
            ]));
        })
        .await;
    let mine = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/posts/p1/applications/me");
            then.status(200).json_body(json!({"data": null}));
        })
        .await;

    let client = client_for(&server, Some("t"));
    let detail = PostDetail::load(&client, "p1").await.unwrap();

    assert!(detail.is_owner());
    assert_eq!(detail.applications.len(), 2);
    assert!(detail.my_application.is_none());
    applications.assert_async().await;
    assert_eq!(mine.hits_async().await, 0);
}

#[tokio::test]
async fn test_post_detail_for_applicant_loads_own_application() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/posts/p1");
            then.status(200).json_body(json!({"data": common::post("p1", "u1")}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/users/me");
            then.status(200).json_body(json!({"data": common::user("u2")}));
        })
        .await;
    let applications = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/posts/p1/applications");
            then.status(200).json_body(common::page(vec![]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/posts/p1/applications/me");
            then.status(200)
                .json_body(json!({"data": common::application("a1", "p1", "pending")}));
        })
        .await;

    let client = client_for(&server, Some("t"));
    let detail = PostDetail::load(&client, "p1").await.unwrap();

    assert!(!detail.is_owner());
    assert_eq!(detail.my_application.as_ref().map(|a| a.id.as_str()), Some("a1"));
    assert!(detail.applications.is_empty());
    assert_eq!(applications.hits_async().await, 0);
    assert!(detail.to_string().contains("Backend engineer"));
}

#[tokio::test]
async fn test_post_detail_fails_when_any_joined_read_fails() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/posts/p1");
            then.status(200).json_body(json!({"data": common::post("p1", "u1")}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/users/me");
            then.status(401)
                .json_body(json!({"error": {"code": "unauthorized", "message": "Invalid token"}}));
        })
        .await;

    let client = client_for(&server, Some("stale"));
    let err = PostDetail::load(&client, "p1").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid token");
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_post_board_keeps_applied_posts() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/posts")
                .query_param("limit", "50")
                .query_param("status", "open")
                .query_param("exclude_applied", "false");
            then.status(200).json_body(common::page(vec![common::post("p1", "u1")]));
        })
        .await;

    let client = client_for(&server, Some("t"));
    let board = PostBoard::load(&client, Some("open"), None).await.unwrap();

    mock.assert_async().await;
    assert_eq!(board.posts.data.len(), 1);
}

#[tokio::test]
async fn test_conversation_is_oldest_first_and_survives_mark_read_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/channels/c1");
            then.status(200).json_body(json!({"data": common::channel("c1")}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/channels/c1/messages")
                .query_param("limit", "100");
            then.status(200).json_body(common::page(vec![
                common::message("m3", "u2", "2026-10-03T12:00:00Z"),
                common::message("m2", "u1", "2026-10-03T11:00:00Z"),
                common::message("m1", "u2", "2026-10-03T10:00:00Z"),
            ]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/users/me");
            then.status(200).json_body(json!({"data": common::user("u1")}));
        })
        .await;
    let mark = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/channels/c1/read-all");
            then.status(500)
                .json_body(json!({"error": {"code": "internal", "message": "boom"}}));
        })
        .await;

    let client = client_for(&server, Some("t"));
    let conversation = Conversation::load(&client, "c1").await.unwrap();

    let ids: Vec<&str> = conversation.messages.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["m1", "m2", "m3"]);
    assert_eq!(conversation.peer_name(), "Grace");
    mark.assert_async().await;
}

#[tokio::test]
async fn test_inbox_merges_unread_counts() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/channels")
                .query_param("status", "active");
            then.status(200).json_body(common::page(vec![common::channel("c1")]));
        })
        .await;
    let mut summary = common::empty_summary();
    summary["unread_messages"] = json!({
        "total": 2,
        "channels": [{"channel_id": "c1", "unread_count": 2}]
    });
    server
        .mock_async(move |when, then| {
            when.method(GET).path("/v1/users/me/summary");
            then.status(200).json_body(json!({"data": summary}));
        })
        .await;

    let client = client_for(&server, Some("t"));
    let inbox = Inbox::load(&client, Some("active")).await.unwrap();

    assert_eq!(inbox.unread_total, 2);
    assert_eq!(inbox.unread_count("c1"), 2);
    assert_eq!(inbox.unread_count("c9"), 0);
    assert!(inbox.to_string().contains("2 unread messages"));
}

#[tokio::test]
async fn test_dashboard_counts_attention_items() {
    let server = MockServer::start_async().await;
    let mut summary = common::empty_summary();
    summary["unread_messages"]["total"] = json!(3);
    summary["org_invites"]["count"] = json!(1);
    server
        .mock_async(move |when, then| {
            when.method(GET).path("/v1/users/me/summary");
            then.status(200).json_body(json!({"data": summary}));
        })
        .await;

    let client = client_for(&server, Some("t"));
    let dashboard = Dashboard::load(&client).await.unwrap();
    assert_eq!(dashboard.attention_count(), 4);
}

async fn mock_org_basics(server: &MockServer, role: &'static str) {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/orgs/o1");
            then.status(200).json_body(json!({"data": common::org("o1", None)}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/users/me");
            then.status(200).json_body(json!({"data": common::user("u1")}));
        })
        .await;
    server
        .mock_async(move |when, then| {
            when.method(GET)
                .path("/v1/users/me/orgs")
                .query_param("limit", "100");
            then.status(200)
                .json_body(common::page(vec![common::org("o1", Some(role))]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/orgs/o1/members");
            then.status(200).json_body(common::page(vec![json!({
                "id": "m1",
                "user_id": "u1",
                "user_name": "Ada",
                "role": "owner",
                "created_at": "2026-01-01T00:00:00Z"
            })]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/orgs/o1/posts")
                .query_param("limit", "20");
            then.status(200).json_body(common::page(vec![common::post("p1", "u1")]));
        })
        .await;
}

#[tokio::test]
async fn test_org_detail_for_admin_loads_pending_requests() {
    let server = MockServer::start_async().await;
    mock_org_basics(&server, "admin").await;
    let invites = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/orgs/o1/invites");
            then.status(200).json_body(common::page(vec![]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/orgs/o1/join-requests");
            then.status(200).json_body(common::page(vec![
                json!({
                    "id": "j1",
                    "org_id": "o1",
                    "user_name": "Grace",
                    "status": "pending",
                    "created_at": "2026-10-01T00:00:00Z",
                    "updated_at": "2026-10-01T00:00:00Z"
                }),
                json!({
                    "id": "j2",
                    "org_id": "o1",
                    "user_name": "Linus",
                    "status": "rejected",
                    "created_at": "2026-10-01T00:00:00Z",
                    "updated_at": "2026-10-02T00:00:00Z"
                }),
            ]));
        })
        .await;

    let client = client_for(&server, Some("t"));
    let detail = OrgDetail::load(&client, "o1").await.unwrap();

    assert_eq!(detail.my_role, Some(OrgRole::Admin));
    assert!(detail.is_admin());
    assert_eq!(detail.members.len(), 1);
    assert_eq!(detail.posts.len(), 1);
    let pending: Vec<&str> = detail.join_requests.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(pending, vec!["j1"]);
    invites.assert_async().await;
}

#[tokio::test]
async fn test_org_detail_for_member_skips_admin_reads() {
    let server = MockServer::start_async().await;
    mock_org_basics(&server, "member").await;
    let invites = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/orgs/o1/invites");
            then.status(200).json_body(common::page(vec![]));
        })
        .await;

    let client = client_for(&server, Some("t"));
    let detail = OrgDetail::load(&client, "o1").await.unwrap();

    assert!(detail.is_member());
    assert!(!detail.is_admin());
    assert!(detail.invites.is_empty());
    assert!(detail.join_requests.is_empty());
    assert_eq!(invites.hits_async().await, 0);
}
