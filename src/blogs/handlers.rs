use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use tracing::{error, info, instrument};

use crate::{
    auth::services::AuthUser,
    blogs::dto::{BlogPayload, BlogResponse, DeletedBlogResponse},
    blogs::repo::Blog,
    state::AppState,
    users::repo::User,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/blogs", get(list_blogs).post(create_blog))
        .route("/blogs/me", get(list_my_blogs))
        .route("/blogs/:id", patch(update_blog).delete(delete_blog))
}

async fn resolve_author(
    state: &AppState,
    email: &str,
) -> Result<User, (StatusCode, String)> {
    User::find_by_email(&state.db, email)
        .await
        .map_err(|e| {
            error!(error = %e, "find_by_email failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?
        .ok_or((StatusCode::NOT_FOUND, "User not found".to_string()))
}

#[instrument(skip(state, payload))]
pub async fn create_blog(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Json(payload): Json<BlogPayload>,
) -> Result<(StatusCode, Json<BlogResponse>), (StatusCode, String)> {
    let user = resolve_author(&state, &email).await?;

    let blog = Blog::create(&state.db, user.id, &payload.title, &payload.content)
        .await
        .map_err(|e| {
            error!(error = %e, "create blog failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    info!(blog_id = blog.id, user_id = user.id, "blog created");
    Ok((StatusCode::CREATED, Json(BlogResponse::from(blog))))
}

#[instrument(skip(state))]
pub async fn list_blogs(
    State(state): State<AppState>,
) -> Result<Json<Vec<BlogResponse>>, (StatusCode, String)> {
    let blogs = Blog::list_all(&state.db)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    if blogs.is_empty() {
        return Err((StatusCode::NOT_FOUND, "No blogs found".into()));
    }
    Ok(Json(blogs.into_iter().map(BlogResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn list_my_blogs(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
) -> Result<Json<Vec<BlogResponse>>, (StatusCode, String)> {
    let user = resolve_author(&state, &email).await?;

    let blogs = Blog::list_by_user(&state.db, user.id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    if blogs.is_empty() {
        return Err((StatusCode::NOT_FOUND, "No blogs found".into()));
    }
    Ok(Json(blogs.into_iter().map(BlogResponse::from).collect()))
}

#[instrument(skip(state, payload))]
pub async fn update_blog(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<BlogPayload>,
) -> Result<Json<BlogResponse>, (StatusCode, String)> {
    let user = resolve_author(&state, &email).await?;

    let blog = Blog::update(&state.db, id, user.id, &payload.title, &payload.content)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or((StatusCode::NOT_FOUND, "Blog not found".to_string()))?;

    info!(blog_id = blog.id, user_id = user.id, "blog updated");
    Ok(Json(BlogResponse::from(blog)))
}

#[instrument(skip(state))]
pub async fn delete_blog(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<DeletedBlogResponse>, (StatusCode, String)> {
    let user = resolve_author(&state, &email).await?;

    let deleted = Blog::soft_delete(&state.db, id, user.id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Blog not found".into()));
    }

    info!(blog_id = id, user_id = user.id, "blog soft-deleted");
    Ok(Json(DeletedBlogResponse { id }))
}
