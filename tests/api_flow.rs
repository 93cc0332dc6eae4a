//! End-to-end flows against a live server.
//!
//! Start one locally (`cargo run`), then:
//! `DEVLINK_BASE_URL=http://localhost:8080 cargo test -- --ignored`

use uuid::Uuid;

use devlink::auth::dto::TokenResponse;
use devlink::client::api::ApiClient;
use devlink::posts::dto::PostResponse;
use devlink::posts::repo::{Comment, Like};
use devlink::profiles::dto::ProfileResponse;
use devlink::users::dto::RegisterRequest;

fn base_url() -> String {
    std::env::var("DEVLINK_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".into())
}

fn throwaway() -> RegisterRequest {
    RegisterRequest {
        name: Some("Flow Test".into()),
        email: Some(format!("flow-{}@devlink.dev", Uuid::new_v4().simple())),
        password: Some("flow-password".into()),
    }
}

async fn signed_in_client() -> ApiClient {
    let api = ApiClient::new(base_url());
    let TokenResponse { token } = api
        .post("/api/users", &throwaway())
        .await
        .expect("registration should succeed");
    api.set_auth_token(Some(token));
    api
}

#[tokio::test]
#[ignore = "requires a live server at DEVLINK_BASE_URL"]
async fn register_create_profile_and_tear_down() {
    let api = ApiClient::new(base_url());
    let register = throwaway();

    let TokenResponse { token } = api
        .post("/api/users", &register)
        .await
        .expect("registration should succeed");
    api.set_auth_token(Some(token));

    let body = serde_json::json!({ "status": "Developer", "skills": "js,node" });
    let profile: ProfileResponse = api
        .post("/api/profile", &body)
        .await
        .expect("profile creation should succeed");
    assert_eq!(profile.skills, vec!["js", "node"]);
    assert_eq!(profile.user.name, "Flow Test");

    let me: ProfileResponse = api
        .get("/api/profile/me")
        .await
        .expect("own profile should load");
    assert_eq!(me.status, "Developer");

    // The same email again trips the duplicate check.
    let failure = api
        .post::<_, TokenResponse>("/api/users", &register)
        .await
        .expect_err("duplicate registration should fail");
    assert_eq!(failure.status, 400);
    assert!(failure.errors.iter().any(|e| e.msg == "User already exists"));

    let deleted: serde_json::Value = api
        .delete("/api/profile")
        .await
        .expect("account deletion should succeed");
    assert_eq!(deleted["msg"], "User deleted");

    let failure = api
        .get::<ProfileResponse>("/api/profile/me")
        .await
        .expect_err("the profile should be gone");
    assert_eq!(
        failure.msg.as_deref(),
        Some("There is no profile for this user")
    );
}

#[tokio::test]
#[ignore = "requires a live server at DEVLINK_BASE_URL"]
async fn post_like_comment_lifecycle() {
    let api = signed_in_client().await;

    let post: PostResponse = api
        .post("/api/posts", &serde_json::json!({ "text": "hello from the flow test" }))
        .await
        .expect("post creation should succeed");

    let likes: Vec<Like> = api
        .put_empty(&format!("/api/posts/like/{}", post.id))
        .await
        .expect("liking should succeed");
    assert_eq!(likes.len(), 1);

    let failure = api
        .put_empty::<Vec<Like>>(&format!("/api/posts/like/{}", post.id))
        .await
        .expect_err("a second like should be rejected");
    assert_eq!(failure.msg.as_deref(), Some("Post already liked"));

    let likes: Vec<Like> = api
        .put_empty(&format!("/api/posts/unlike/{}", post.id))
        .await
        .expect("unliking should succeed");
    assert!(likes.is_empty());

    let failure = api
        .put_empty::<Vec<Like>>(&format!("/api/posts/unlike/{}", post.id))
        .await
        .expect_err("unliking twice should be rejected");
    assert_eq!(failure.status, 400);
    assert_eq!(failure.msg.as_deref(), Some("Post has not been liked yet"));

    let comments: Vec<Comment> = api
        .post(
            &format!("/api/posts/comment/{}", post.id),
            &serde_json::json!({ "text": "nice" }),
        )
        .await
        .expect("commenting should succeed");
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].text, "nice");

    let removed: Vec<Comment> = api
        .delete(&format!("/api/posts/comment/{}/{}", post.id, comments[0].id))
        .await
        .expect("removing the comment should succeed");
    assert!(removed.is_empty());

    let deleted: serde_json::Value = api
        .delete(&format!("/api/posts/{}", post.id))
        .await
        .expect("deleting the post should succeed");
    assert_eq!(deleted["msg"], "Post deleted");

    // Leave no throwaway accounts behind.
    let _ = api.delete::<serde_json::Value>("/api/profile").await;
}

#[tokio::test]
#[ignore = "requires a live server at DEVLINK_BASE_URL"]
async fn other_accounts_cannot_unlike_or_delete() {
    let author = signed_in_client().await;
    let stranger = signed_in_client().await;

    let post: PostResponse = author
        .post("/api/posts", &serde_json::json!({ "text": "mine alone" }))
        .await
        .expect("post creation should succeed");
    let comments: Vec<Comment> = author
        .post(
            &format!("/api/posts/comment/{}", post.id),
            &serde_json::json!({ "text": "my own comment" }),
        )
        .await
        .expect("commenting should succeed");

    // Never liked it, so there is nothing to take back.
    let failure = stranger
        .put_empty::<Vec<Like>>(&format!("/api/posts/unlike/{}", post.id))
        .await
        .expect_err("unliking a post never liked should be rejected");
    assert_eq!(failure.status, 400);
    assert_eq!(failure.msg.as_deref(), Some("Post has not been liked yet"));

    let failure = stranger
        .delete::<serde_json::Value>(&format!("/api/posts/{}", post.id))
        .await
        .expect_err("deleting someone else's post should be rejected");
    assert_eq!(failure.status, 400);
    assert_eq!(failure.msg.as_deref(), Some("This is not your post"));

    let failure = stranger
        .delete::<Vec<Comment>>(&format!("/api/posts/comment/{}/{}", post.id, comments[0].id))
        .await
        .expect_err("deleting someone else's comment should be rejected");
    assert_eq!(failure.status, 400);
    assert_eq!(failure.msg.as_deref(), Some("This is not your post"));

    // Still there for the author, who cleans up.
    let deleted: serde_json::Value = author
        .delete(&format!("/api/posts/{}", post.id))
        .await
        .expect("the author should still own the post");
    assert_eq!(deleted["msg"], "Post deleted");

    let _ = author.delete::<serde_json::Value>("/api/profile").await;
    let _ = stranger.delete::<serde_json::Value>("/api/profile").await;
}
