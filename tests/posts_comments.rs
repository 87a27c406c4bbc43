//! Post and comment API integration tests
//!
//! Ownership rules, comment ordering and the cascading post delete.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use common::{assert_error, TestApp, TestUser};

async fn create_post(app: &TestApp, user: &TestUser, title: &str) -> Uuid {
    let response = app
        .post("/post", Some(&user.access_token), json!({ "title": title, "content": "Body" }))
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    id_of(&response.body)
}

async fn add_comment(app: &TestApp, user: &TestUser, post_id: Uuid, content: &str) -> Uuid {
    let response = app
        .post(
            &format!("/comment/{post_id}/comment"),
            Some(&user.access_token),
            json!({ "content": content }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    id_of(&response.body)
}

fn id_of(body: &Value) -> Uuid {
    body["id"]
        .as_str()
        .and_then(|id| Uuid::parse_str(id).ok())
        .expect("body carries an id")
}

#[tokio::test]
async fn test_post_lifecycle() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;

    let response = app
        .post("/post", Some(&alice.access_token), json!({ "title": "Hello", "content": "World" }))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["sender"], alice.id.to_string());
    let post_id = id_of(&response.body);

    let response = app
        .put(&format!("/post/{post_id}"), Some(&alice.access_token), json!({ "content": "Edited" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["title"], "Hello");
    assert_eq!(response.body["content"], "Edited");

    let response = app.get(&format!("/post/{post_id}"), Some(&alice.access_token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["comments"], json!([]));
    assert_eq!(response.body["sender"]["id"], alice.id.to_string());
    assert_eq!(response.body["sender"]["username"], "alice");
    assert!(response.body["sender"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_post_detail_after_sender_deleted() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let post_id = create_post(&app, &alice, "Orphan").await;

    let response = app.delete(&format!("/user/{}", alice.id), Some(&alice.access_token)).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.get(&format!("/post/{post_id}"), Some(&bob.access_token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["title"], "Orphan");
    assert_eq!(response.body["sender"], Value::Null);
}

#[tokio::test]
async fn test_post_validation_and_missing() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;

    let response = app
        .post("/post", Some(&alice.access_token), json!({ "title": "   ", "content": "Body" }))
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST);

    let response = app.get("/post/not-a-uuid", Some(&alice.access_token)).await;
    assert_error(&response, StatusCode::BAD_REQUEST);

    let response = app.get(&format!("/post/{}", Uuid::new_v4()), Some(&alice.access_token)).await;
    assert_error(&response, StatusCode::NOT_FOUND);

    let response = app.delete(&format!("/post/{}", Uuid::new_v4()), Some(&alice.access_token)).await;
    assert_error(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_posts_by_sender() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;

    create_post(&app, &alice, "a1").await;
    create_post(&app, &bob, "b1").await;
    create_post(&app, &alice, "a2").await;

    let all = app.get("/post", Some(&bob.access_token)).await;
    assert_eq!(all.body.as_array().map(Vec::len), Some(3));

    let mine = app.get(&format!("/post?sender={}", alice.id), Some(&bob.access_token)).await;
    let titles: Vec<&str> = mine
        .body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|p| p["title"].as_str())
        .collect();
    assert_eq!(titles, vec!["a1", "a2"]);
}

#[tokio::test]
async fn test_only_sender_may_change_post() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let post_id = create_post(&app, &alice, "Mine").await;

    let response = app
        .put(&format!("/post/{post_id}"), Some(&bob.access_token), json!({ "title": "Stolen" }))
        .await;
    assert_error(&response, StatusCode::FORBIDDEN);

    let response = app.delete(&format!("/post/{post_id}"), Some(&bob.access_token)).await;
    assert_error(&response, StatusCode::FORBIDDEN);

    let response = app.get(&format!("/post/{post_id}"), Some(&bob.access_token)).await;
    assert_eq!(response.body["title"], "Mine");
}

#[tokio::test]
async fn test_comments_keep_order() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let post_id = create_post(&app, &alice, "Post").await;

    let first = add_comment(&app, &bob, post_id, "first").await;
    let second = add_comment(&app, &alice, post_id, "second").await;

    let response = app.get(&format!("/post/{post_id}"), Some(&bob.access_token)).await;
    let embedded: Vec<&str> = response.body["comments"]
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|c| c["id"].as_str())
        .collect();
    assert_eq!(embedded, vec![first.to_string(), second.to_string()]);
    assert_eq!(response.body["comments"][0]["content"], "first");
    assert_eq!(response.body["comments"][0]["author"], bob.id.to_string());

    let response = app.get(&format!("/comment/{post_id}/comment"), Some(&bob.access_token)).await;
    let contents: Vec<&str> = response
        .body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|c| c["content"].as_str())
        .collect();
    assert_eq!(contents, vec!["first", "second"]);

    let response = app
        .get(&format!("/comment/{post_id}/comment/{first}"), Some(&alice.access_token))
        .await;
    assert_eq!(response.body["author"], bob.id.to_string());
}

#[tokio::test]
async fn test_comment_on_missing_post() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let missing = Uuid::new_v4();

    let response = app
        .post(&format!("/comment/{missing}/comment"), Some(&alice.access_token), json!({ "content": "hi" }))
        .await;
    assert_error(&response, StatusCode::NOT_FOUND);

    let response = app.get(&format!("/comment/{missing}/comment"), Some(&alice.access_token)).await;
    assert_error(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comment_permissions() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let carol = app.create_user("carol").await;
    let post_id = create_post(&app, &alice, "Post").await;
    let comment = add_comment(&app, &bob, post_id, "bob says").await;
    let uri = format!("/comment/{post_id}/comment/{comment}");

    // Only the author edits.
    let response = app.put(&uri, Some(&alice.access_token), json!({ "content": "edited" })).await;
    assert_error(&response, StatusCode::FORBIDDEN);
    let response = app.put(&uri, Some(&bob.access_token), json!({ "content": "edited" })).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["content"], "edited");

    // A bystander cannot delete; the post's sender can.
    assert_error(&app.delete(&uri, Some(&carol.access_token)).await, StatusCode::FORBIDDEN);
    assert_eq!(app.delete(&uri, Some(&alice.access_token)).await.status, StatusCode::OK);
    assert_error(&app.delete(&uri, Some(&alice.access_token)).await, StatusCode::NOT_FOUND);

    let response = app.get(&format!("/post/{post_id}"), Some(&alice.access_token)).await;
    assert_eq!(response.body["comments"], json!([]));
}

#[tokio::test]
async fn test_delete_all_comments() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let post_id = create_post(&app, &alice, "Post").await;
    add_comment(&app, &bob, post_id, "one").await;
    add_comment(&app, &bob, post_id, "two").await;
    let uri = format!("/comment/{post_id}/comment");

    assert_error(&app.delete(&uri, Some(&bob.access_token)).await, StatusCode::FORBIDDEN);

    let response = app.delete(&uri, Some(&alice.access_token)).await;
    assert_eq!(response.status, StatusCode::OK);

    assert_eq!(app.count_where("comments", "post_id", post_id).await, 0);
    assert_eq!(app.count_where("post_comments", "post_id", post_id).await, 0);
    assert_eq!(app.count_where("posts", "id", post_id).await, 1);
}

#[tokio::test]
async fn test_delete_post_cascades() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let post_id = create_post(&app, &alice, "Doomed").await;
    let other_post = create_post(&app, &bob, "Other").await;
    for n in 0..3 {
        add_comment(&app, &bob, post_id, &format!("c{n}")).await;
    }
    add_comment(&app, &alice, other_post, "stays").await;

    let response = app.delete(&format!("/post/{post_id}"), Some(&alice.access_token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["commentsRemoved"], 3);

    assert_eq!(app.count_where("posts", "id", post_id).await, 0);
    assert_eq!(app.count_where("comments", "post_id", post_id).await, 0);
    assert_eq!(app.count_where("post_comments", "post_id", post_id).await, 0);
    assert_eq!(app.count_where("comments", "post_id", other_post).await, 1);

    let response = app.get(&format!("/comment/{post_id}/comment"), Some(&alice.access_token)).await;
    assert_error(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_failed_cascade_leaves_post_and_comments() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let post_id = create_post(&app, &alice, "Sturdy").await;
    add_comment(&app, &alice, post_id, "one").await;
    add_comment(&app, &alice, post_id, "two").await;

    sqlx::query(
        "CREATE TRIGGER fail_comment_delete BEFORE DELETE ON comments \
         BEGIN SELECT RAISE(ABORT, 'injected failure'); END;",
    )
    .execute(&app.pool)
    .await
    .unwrap();

    let response = app.delete(&format!("/post/{post_id}"), Some(&alice.access_token)).await;
    assert_error(&response, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "Internal server error");

    assert_eq!(app.count_where("posts", "id", post_id).await, 1);
    assert_eq!(app.count_where("comments", "post_id", post_id).await, 2);
    assert_eq!(app.count_where("post_comments", "post_id", post_id).await, 2);
}
