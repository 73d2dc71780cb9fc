use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    error::ApiError,
    posts::{
        dto::{DeleteResponse, PostBody},
        repo::{Comment, Post},
        service,
    },
    state::AppState,
    validate,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/post", get(list_posts).post(create_post))
        .route("/post/:id", get(get_post).delete(delete_post))
        .route("/post/like/:id", post(like_post))
        .route("/post/unlike/:id", post(unlike_post))
        .route("/post/comment/:id", post(comment_post))
        .route("/post/comment/:id/:comment_id", delete(delete_comment))
}

async fn fetch_post(state: &AppState, id: Uuid) -> Result<Post, ApiError> {
    Post::find(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Post"))
}

fn check_text(text: &str) -> Result<(), ApiError> {
    let errors = validate::check(validate::POST, &[("text", Some(text))]);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}

#[instrument(skip(state))]
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, ApiError> {
    let posts = Post::list(&state.db).await?;
    Ok(Json(posts))
}

#[instrument(skip(state))]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Post>, ApiError> {
    Ok(Json(fetch_post(&state, id).await?))
}

#[instrument(skip(state, claims, payload))]
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<PostBody>,
) -> Result<Json<Post>, ApiError> {
    check_text(&payload.text)?;
    let created = Post::create(
        &state.db,
        claims.sub,
        payload.text.trim(),
        payload.name.as_deref(),
        payload.avatar.as_deref(),
    )
    .await?;
    info!(post_id = %created.id, user_id = %claims.sub, "post created");
    Ok(Json(created))
}

#[instrument(skip(state, claims))]
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let found = fetch_post(&state, id).await?;
    if found.user_id != claims.sub {
        warn!(post_id = %id, user_id = %claims.sub, "delete refused: not the author");
        return Err(ApiError::NotAuthorized);
    }
    Post::delete(&state.db, id).await?;
    info!(post_id = %id, user_id = %claims.sub, "post deleted");
    Ok(Json(DeleteResponse { success: true }))
}

#[instrument(skip(state, claims))]
pub async fn like_post(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Post>, ApiError> {
    let found = fetch_post(&state, id).await?;
    let mut likes = found.likes.0;
    service::add_like(&mut likes, claims.sub)?;
    let updated = Post::set_likes(&state.db, id, &likes).await?;
    Ok(Json(updated))
}

#[instrument(skip(state, claims))]
pub async fn unlike_post(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Post>, ApiError> {
    let found = fetch_post(&state, id).await?;
    let mut likes = found.likes.0;
    service::remove_like(&mut likes, claims.sub)?;
    let updated = Post::set_likes(&state.db, id, &likes).await?;
    Ok(Json(updated))
}

#[instrument(skip(state, claims, payload))]
pub async fn comment_post(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<PostBody>,
) -> Result<Json<Post>, ApiError> {
    check_text(&payload.text)?;
    let found = fetch_post(&state, id).await?;
    let mut comments = found.comments.0;
    service::add_comment(
        &mut comments,
        Comment {
            id: Uuid::new_v4(),
            user: claims.sub,
            text: payload.text.trim().to_string(),
            name: payload.name,
            avatar: payload.avatar,
            date: OffsetDateTime::now_utc(),
        },
    );
    let updated = Post::set_comments(&state.db, id, &comments).await?;
    Ok(Json(updated))
}

#[instrument(skip(state, claims))]
pub async fn delete_comment(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path((id, comment_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Post>, ApiError> {
    let found = fetch_post(&state, id).await?;
    let mut comments = found.comments.0;
    service::remove_comment(&mut comments, comment_id, claims.sub, found.user_id)?;
    let updated = Post::set_comments(&state.db, id, &comments).await?;
    info!(post_id = %id, comment_id = %comment_id, user_id = %claims.sub, "comment deleted");
    Ok(Json(updated))
}
