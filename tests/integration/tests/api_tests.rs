//! API Integration Tests
//!
//! Each test spawns the server on the in-memory storage backend, so no
//! external services are required.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use forum_core::Snowflake;
use integration_tests::{
    assert_error, assert_json, assert_status, fixtures::*, test_config, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

async fn open_discussion(server: &TestServer) -> DiscussionBody {
    let response = server
        .post("/api/v1/discussions", Some(&alice()), &CreateDiscussion::unique())
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn reply(server: &TestServer, discussion_id: Snowflake, body: &PostReply) -> ReplyBody {
    let response = server
        .post(
            &format!("/api/v1/discussions/{discussion_id}/replies"),
            Some(&bob()),
            body,
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn inbox(server: &TestServer, actor: &forum_core::Actor) -> NotificationList {
    let response = server.get("/api/v1/notifications", Some(actor)).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health", None).await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready", None).await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["storage"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health", None).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Identity
// ============================================================================

#[tokio::test]
async fn test_invalid_token_is_rejected() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .get_with_authorization("/api/v1/discussions", "Bearer not-a-jwt")
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.code, "INVALID_TOKEN");

    let response = server
        .get_with_authorization("/api/v1/discussions", "Basic YWxpY2U6c2VjcmV0")
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_token_from_other_issuer_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let foreign = forum_common::JwtService::new("some-other-secret", 900)
        .issue_access_token(&alice())
        .unwrap();

    let response = server
        .get_with_authorization("/api/v1/notifications", &format!("Bearer {foreign}"))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Discussion Tests
// ============================================================================

#[tokio::test]
async fn test_create_discussion() {
    let server = TestServer::start().await.unwrap();
    let discussion = open_discussion(&server).await;

    assert_eq!(discussion.author_id, alice().id);
    assert_eq!(discussion.category, "design_help");
    assert_eq!(discussion.category_label, "Design Help");
    assert_eq!(discussion.tags, vec!["grid".to_string(), "layout".to_string()]);
    assert!(discussion.is_author);
    assert!(!discussion.is_solved);
    assert_eq!(discussion.views_count, 0);
    assert_eq!(discussion.replies_count, 0);
    assert_eq!(discussion.posted_ago, "just now");
}

#[tokio::test]
async fn test_create_discussion_requires_actor() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .post("/api/v1/discussions", None, &CreateDiscussion::unique())
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.code, "AUTHENTICATION_REQUIRED");
}

#[tokio::test]
async fn test_create_discussion_validation() {
    let server = TestServer::start().await.unwrap();

    let mut blank = CreateDiscussion::unique();
    blank.title = "   ".to_string();
    let response = server
        .post("/api/v1/discussions", Some(&alice()), &blank)
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.code, "VALIDATION_ERROR");

    let mut long = CreateDiscussion::unique();
    long.title = "x".repeat(201);
    let response = server
        .post("/api/v1/discussions", Some(&alice()), &long)
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.code, "VALIDATION_ERROR");
    assert!(error.details.is_some());

    // Nothing was stored
    let response = server.get("/api/v1/discussions", None).await.unwrap();
    let page: DiscussionPage = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(page.data.is_empty());
}

#[tokio::test]
async fn test_malformed_body() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .post("/api/v1/discussions", Some(&alice()), &json!({ "title": 5 }))
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.code, "INVALID_BODY");
}

#[tokio::test]
async fn test_detail_counts_every_view() {
    let server = TestServer::start().await.unwrap();
    let d = open_discussion(&server).await;
    let path = format!("/api/v1/discussions/{}", d.id);

    let first: DiscussionBody =
        assert_json(server.get(&path, None).await.unwrap(), StatusCode::OK).await.unwrap();
    let second: DiscussionBody =
        assert_json(server.get(&path, Some(&bob())).await.unwrap(), StatusCode::OK)
            .await
            .unwrap();

    assert_eq!(first.views_count, 1);
    assert_eq!(second.views_count, 2);
    assert!(!first.is_author);
    assert!(!second.is_author);

    // Listing is not a view
    let page: DiscussionPage = assert_json(
        server.get("/api/v1/discussions", None).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(page.data[0].views_count, 2);
}

#[tokio::test]
async fn test_unknown_and_malformed_ids() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/api/v1/discussions/424242", None).await.unwrap();
    let error = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.code, "DISCUSSION_NOT_FOUND");

    let response = server.get("/api/v1/discussions/abc", None).await.unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.code, "INVALID_PATH_PARAMETER");
}

#[tokio::test]
async fn test_list_filters() {
    let server = TestServer::start().await.unwrap();
    let solved = open_discussion(&server).await;
    let open = open_discussion(&server).await;

    let r = reply(&server, solved.id, &PostReply::new("use minmax")).await;
    let response = server
        .post_empty(
            &format!("/api/v1/replies/{}/mark-solution?discussion_id={}", r.id, solved.id),
            Some(&alice()),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let page: DiscussionPage = assert_json(
        server.get("/api/v1/discussions?solved=false", None).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    let ids: Vec<_> = page.data.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![open.id]);

    let page: DiscussionPage = assert_json(
        server
            .get("/api/v1/discussions?tag=GRID&category=design_help", None)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(page.data.len(), 2);

    let page: DiscussionPage = assert_json(
        server.get("/api/v1/discussions?limit=1", None).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].id, open.id);
    assert_eq!(page.next_before, Some(open.id));

    let response = server.get("/api/v1/discussions?limit=0", None).await.unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_toggle_discussion_like() {
    let server = TestServer::start().await.unwrap();
    let d = open_discussion(&server).await;
    let path = format!("/api/v1/discussions/{}/like", d.id);

    let liked: LikeBody =
        assert_json(server.post_empty(&path, Some(&bob())).await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert!(liked.liked);
    assert_eq!(liked.likes_count, 1);

    let view: DiscussionBody = assert_json(
        server
            .get(&format!("/api/v1/discussions/{}", d.id), Some(&bob()))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(view.liked_by_me);

    let unliked: LikeBody =
        assert_json(server.post_empty(&path, Some(&bob())).await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert!(!unliked.liked);
    assert_eq!(unliked.likes_count, 0);

    // Alice heard about the like once
    let notes = inbox(&server, &alice()).await;
    assert_eq!(notes.data.iter().filter(|n| n.kind == "liked").count(), 1);
}

#[tokio::test]
async fn test_anonymous_like_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let d = open_discussion(&server).await;

    let response = server
        .post_empty(&format!("/api/v1/discussions/{}/like", d.id), None)
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.code, "AUTHENTICATION_REQUIRED");

    let view: DiscussionBody = assert_json(
        server.get(&format!("/api/v1/discussions/{}", d.id), None).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(view.likes_count, 0);
}

#[tokio::test]
async fn test_pin_requires_moderator() {
    let server = TestServer::start().await.unwrap();
    let older = open_discussion(&server).await;
    let _newer = open_discussion(&server).await;
    let path = format!("/api/v1/discussions/{}/pin", older.id);

    let response = server
        .put(&path, Some(&alice()), &json!({ "pinned": true }))
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.code, "NOT_AUTHORIZED");

    let pinned: DiscussionBody = assert_json(
        server
            .put(&path, Some(&moderator()), &json!({ "pinned": true }))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(pinned.is_pinned);

    let page: DiscussionPage = assert_json(
        server.get("/api/v1/discussions", None).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(page.data[0].id, older.id);
}

#[tokio::test]
async fn test_list_cursor_walks_past_pinned_page() {
    let server = TestServer::start().await.unwrap();
    let mut opened = Vec::new();
    for _ in 0..4 {
        opened.push(open_discussion(&server).await.id);
    }
    for id in &opened[..2] {
        let path = format!("/api/v1/discussions/{id}/pin");
        let response = server
            .put(&path, Some(&moderator()), &json!({ "pinned": true }))
            .await
            .unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let first: DiscussionPage = assert_json(
        server.get("/api/v1/discussions?limit=2", None).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    let ids: Vec<_> = first.data.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![opened[1], opened[0]]);
    assert_eq!(first.next_before, Some(opened[0]));
    assert_eq!(first.next_before_pinned, Some(true));

    let path = format!(
        "/api/v1/discussions?limit=2&before={}&before_pinned=true",
        opened[0]
    );
    let second: DiscussionPage =
        assert_json(server.get(&path, None).await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    let ids: Vec<_> = second.data.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![opened[3], opened[2]]);
}

// ============================================================================
// Reply Tests
// ============================================================================

#[tokio::test]
async fn test_post_and_list_replies() {
    let server = TestServer::start().await.unwrap();
    let d = open_discussion(&server).await;

    let first = reply(&server, d.id, &PostReply::new("first")).await;
    let nested = reply(&server, d.id, &PostReply::under("nested", first.id)).await;
    let second = reply(&server, d.id, &PostReply::new("second")).await;
    assert_eq!(nested.parent_id, Some(first.id));
    assert!(!first.is_solution);

    let replies: Vec<ReplyBody> = assert_json(
        server
            .get(&format!("/api/v1/discussions/{}/replies", d.id), Some(&bob()))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    let ids: Vec<_> = replies.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![first.id, nested.id, second.id]);
    assert!(replies.iter().all(|r| r.is_author && r.discussion_id == d.id));
    assert!(replies.iter().all(|r| r.author_id == bob().id));
    assert_eq!(replies[0].content, "first");

    let view: DiscussionBody = assert_json(
        server.get(&format!("/api/v1/discussions/{}", d.id), None).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(view.replies_count, 3);
}

#[tokio::test]
async fn test_reply_errors() {
    let server = TestServer::start().await.unwrap();
    let d = open_discussion(&server).await;
    let other = open_discussion(&server).await;
    let top = reply(&server, d.id, &PostReply::new("top")).await;
    let nested = reply(&server, d.id, &PostReply::under("nested", top.id)).await;
    let path = format!("/api/v1/discussions/{}/replies", d.id);

    let response = server
        .post(&path, Some(&bob()), &PostReply::new("  "))
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.code, "VALIDATION_ERROR");

    let response = server
        .post(&path, Some(&bob()), &PostReply::under("deeper", nested.id))
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.code, "INVALID_PARENT");

    let response = server
        .post(
            &format!("/api/v1/discussions/{}/replies", other.id),
            Some(&bob()),
            &PostReply::under("elsewhere", top.id),
        )
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.code, "INVALID_PARENT");

    let response = server.post(&path, None, &PostReply::new("hi")).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .post("/api/v1/discussions/999/replies", Some(&bob()), &PostReply::new("hi"))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // Only the two successful replies count
    let view: DiscussionBody = assert_json(
        server.get(&format!("/api/v1/discussions/{}", d.id), None).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(view.replies_count, 2);
}

#[tokio::test]
async fn test_toggle_reply_like() {
    let server = TestServer::start().await.unwrap();
    let d = open_discussion(&server).await;
    let r = reply(&server, d.id, &PostReply::new("answer")).await;
    let path = format!("/api/v1/replies/{}/like", r.id);

    let liked: LikeBody =
        assert_json(server.post_empty(&path, Some(&carol())).await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert!(liked.liked);
    assert_eq!(liked.likes_count, 1);

    let replies: Vec<ReplyBody> = assert_json(
        server
            .get(&format!("/api/v1/discussions/{}/replies", d.id), Some(&carol()))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(replies[0].liked_by_me);
    assert_eq!(replies[0].likes_count, 1);

    let response = server.post_empty("/api/v1/replies/31337/like", Some(&carol())).await.unwrap();
    let error = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.code, "REPLY_NOT_FOUND");
}

// ============================================================================
// Solution Protocol
// ============================================================================

#[tokio::test]
async fn test_alice_accepts_bobs_answer() {
    let server = TestServer::start().await.unwrap();
    let d1 = open_discussion(&server).await;
    let r1 = reply(&server, d1.id, &PostReply::new("try X")).await;
    let path = format!("/api/v1/replies/{}/mark-solution?discussion_id={}", r1.id, d1.id);

    // Bob cannot accept his own answer
    let response = server.post_empty(&path, Some(&bob())).await.unwrap();
    let error = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.code, "NOT_AUTHORIZED");

    let solved: SolutionBody =
        assert_json(server.post_empty(&path, Some(&alice())).await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert!(solved.discussion.is_solved);
    assert!(solved.reply.is_solution);
    assert_eq!(solved.reply.id, r1.id);

    // One-way: the second attempt conflicts
    let response = server.post_empty(&path, Some(&alice())).await.unwrap();
    let error = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.code, "ALREADY_SOLVED");

    let notes = inbox(&server, &bob()).await;
    assert_eq!(notes.data.len(), 1);
    assert_eq!(notes.data[0].kind, "solved");
    assert_eq!(notes.data[0].actor_id, alice().id);
    assert_eq!(notes.data[0].discussion_id, d1.id);
    assert_eq!(notes.data[0].reply_id, Some(r1.id));
    assert_eq!(notes.unread_count, 1);

    let notes = inbox(&server, &alice()).await;
    assert_eq!(notes.data.len(), 1);
    assert_eq!(notes.data[0].kind, "new_reply");
}

#[tokio::test]
async fn test_mark_solution_errors() {
    let server = TestServer::start().await.unwrap();
    let d = open_discussion(&server).await;
    let other = open_discussion(&server).await;
    let foreign = reply(&server, other.id, &PostReply::new("wrong thread")).await;

    let response = server
        .post_empty(
            &format!("/api/v1/replies/{}/mark-solution?discussion_id={}", foreign.id, d.id),
            Some(&alice()),
        )
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.code, "REPLY_NOT_FOUND");

    let response = server
        .post_empty(
            &format!("/api/v1/replies/{}/mark-solution", foreign.id),
            Some(&alice()),
        )
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.code, "INVALID_QUERY_PARAMETER");

    let response = server
        .post_empty(
            &format!("/api/v1/replies/{}/mark-solution?discussion_id={}", foreign.id, other.id),
            None,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_concurrent_mark_solution_has_one_winner() {
    let server = TestServer::start().await.unwrap();
    let d = open_discussion(&server).await;
    let mut paths = Vec::new();
    for i in 0..6 {
        let r = reply(&server, d.id, &PostReply::new(&format!("candidate {i}"))).await;
        paths.push(format!("/api/v1/replies/{}/mark-solution?discussion_id={}", r.id, d.id));
    }

    let alice = alice();
    let attempts = paths.iter().map(|path| server.post_empty(path, Some(&alice)));
    let statuses: Vec<StatusCode> = futures::future::join_all(attempts)
        .await
        .into_iter()
        .map(|r| r.unwrap().status())
        .collect();

    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::OK).count(), 1);
    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count(), 5);

    let replies: Vec<ReplyBody> = assert_json(
        server
            .get(&format!("/api/v1/discussions/{}/replies", d.id), None)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(replies.iter().filter(|r| r.is_solution).count(), 1);
}

// ============================================================================
// Notification Tests
// ============================================================================

#[tokio::test]
async fn test_notification_read_flow() {
    let server = TestServer::start().await.unwrap();
    let d = open_discussion(&server).await;
    reply(&server, d.id, &PostReply::new("one")).await;
    reply(&server, d.id, &PostReply::new("two")).await;
    reply(&server, d.id, &PostReply::new("three")).await;

    let notes = inbox(&server, &alice()).await;
    assert_eq!(notes.unread_count, 3);
    assert!(notes.data.iter().all(|n| n.kind == "new_reply" && !n.is_read));
    let newest = &notes.data[0];

    let response = server
        .put_empty(&format!("/api/v1/notifications/{}/read", newest.id), Some(&alice()))
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Repeating it, someone else's attempt and an unknown id are all silent
    for (id, actor) in [(newest.id, alice()), (newest.id, bob()), (Snowflake::new(5), alice())] {
        let response = server
            .put_empty(&format!("/api/v1/notifications/{id}/read"), Some(&actor))
            .await
            .unwrap();
        assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
    }

    let unread: NotificationList = assert_json(
        server
            .get("/api/v1/notifications?unread_only=true", Some(&alice()))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(unread.data.len(), 2);
    assert_eq!(unread.unread_count, 2);

    let marked: MarkAllRead = assert_json(
        server
            .put_empty("/api/v1/notifications/read-all", Some(&alice()))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(marked.updated, 2);

    let notes = inbox(&server, &alice()).await;
    assert_eq!(notes.unread_count, 0);
    assert!(notes.data.iter().all(|n| n.is_read));
}

#[tokio::test]
async fn test_self_reply_does_not_notify() {
    let server = TestServer::start().await.unwrap();
    let d = open_discussion(&server).await;

    let response = server
        .post(
            &format!("/api/v1/discussions/{}/replies", d.id),
            Some(&alice()),
            &PostReply::new("bump"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    assert!(inbox(&server, &alice()).await.data.is_empty());
}

#[tokio::test]
async fn test_notifications_require_actor() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/api/v1/notifications", None).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server.put_empty("/api/v1/notifications/read-all", None).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Rate Limiting
// ============================================================================

#[tokio::test]
async fn test_rate_limit_spares_health() {
    let config = test_config(&[
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "1"),
        ("RATE_LIMIT_BURST", "2"),
    ])
    .unwrap();
    let server = TestServer::start_with_config(config).await.unwrap();

    let mut statuses = Vec::new();
    for _ in 0..4 {
        statuses.push(server.get("/api/v1/discussions", None).await.unwrap().status());
    }
    assert!(statuses.contains(&StatusCode::TOO_MANY_REQUESTS));

    for _ in 0..4 {
        let response = server.get("/health", None).await.unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }
}
