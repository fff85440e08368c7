//! Comment and user HTTP routes.

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};

use super::responses::{created, done, ok, ApiJson, ApiResult};
use super::state::{GuardedCommentStore, GuardedUserStore, ServerState};
use crate::community_store::{CommentPayload, UserPayload};

async fn list_comments(State(store): State<GuardedCommentStore>) -> ApiResult {
    let comments = store.list_comments()?;
    Ok(ok(comments, "Comments retrieved successfully"))
}

async fn list_lesson_comments(
    State(store): State<GuardedCommentStore>,
    Path(lesson_id): Path<String>,
) -> ApiResult {
    let comments = store.list_lesson_comments(&lesson_id)?;
    Ok(ok(comments, "Comments retrieved successfully"))
}

async fn get_comment(
    State(store): State<GuardedCommentStore>,
    Path(id): Path<String>,
) -> ApiResult {
    let comment = store.get_comment(&id)?;
    Ok(ok(comment, "Comment retrieved successfully"))
}

async fn create_comment(
    State(store): State<GuardedCommentStore>,
    Path(lesson_id): Path<String>,
    ApiJson(payload): ApiJson<CommentPayload>,
) -> ApiResult {
    let comment = store.create_comment(&lesson_id, payload)?;
    Ok(created(comment, "Comment created successfully"))
}

async fn update_comment(
    State(store): State<GuardedCommentStore>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<CommentPayload>,
) -> ApiResult {
    let comment = store.update_comment(&id, payload)?;
    Ok(ok(comment, "Comment updated successfully"))
}

async fn delete_comment(
    State(store): State<GuardedCommentStore>,
    Path(id): Path<String>,
) -> ApiResult {
    store.delete_comment(&id)?;
    Ok(done("Comment deleted successfully"))
}

async fn list_users(State(store): State<GuardedUserStore>) -> ApiResult {
    let users = store.list_users()?;
    Ok(ok(users, "Users retrieved successfully"))
}

async fn get_user(State(store): State<GuardedUserStore>, Path(id): Path<String>) -> ApiResult {
    let user = store.get_user(&id)?;
    Ok(ok(user, "User retrieved successfully"))
}

async fn create_user(
    State(store): State<GuardedUserStore>,
    ApiJson(payload): ApiJson<UserPayload>,
) -> ApiResult {
    let user = store.create_user(payload)?;
    Ok(created(user, "User created successfully"))
}

async fn update_user(
    State(store): State<GuardedUserStore>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UserPayload>,
) -> ApiResult {
    let user = store.update_user(&id, payload)?;
    Ok(ok(user, "User updated successfully"))
}

async fn delete_user(State(store): State<GuardedUserStore>, Path(id): Path<String>) -> ApiResult {
    store.delete_user(&id)?;
    Ok(done("User deleted successfully"))
}

pub fn community_routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/lessons/{id}/comments",
            get(list_lesson_comments).post(create_comment),
        )
        .route("/comments", get(list_comments))
        .route(
            "/comments/{id}",
            get(get_comment).put(update_comment).delete(delete_comment),
        )
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}
