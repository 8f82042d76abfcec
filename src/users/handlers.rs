use axum::{
    extract::{DefaultBodyLimit, Multipart, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use bytes::Bytes;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::services::AuthUser,
    media::services::upload_profile_image,
    state::AppState,
    users::dto::{
        AvailabilityResponse, DeletedUserResponse, EmailQuery, NicknameQuery, ProfileResponse,
    },
    users::repo::User,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/profile", get(get_profile).patch(update_profile))
        .route("/users/email", get(check_email))
        .route("/users/nickname", get(check_nickname))
        .route("/users/delete", delete(delete_user))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    let user = User::find_by_email(&state.db, &email)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or((StatusCode::NOT_FOUND, "User not found".to_string()))?;

    Ok(Json(ProfileResponse {
        nickname: user.nickname,
        profile_url: user.profile_url,
    }))
}

/// Multipart body: `nickname` text field, optional `file` part with the
/// profile image.
#[instrument(skip(state, mp))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    mut mp: Multipart,
) -> Result<(StatusCode, Json<ProfileResponse>), (StatusCode, String)> {
    let mut nickname: Option<String> = None;
    let mut upload: Option<(Bytes, String)> = None;

    while let Some(field) = mp
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("nickname") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
                nickname = Some(value);
            }
            Some("file") => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".into());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
                upload = Some((data, content_type));
            }
            _ => {}
        }
    }

    let nickname =
        nickname.ok_or((StatusCode::BAD_REQUEST, "nickname field is required".to_string()))?;
    if nickname.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Nickname is required".into()));
    }

    match User::nickname_taken_by_other(&state.db, &nickname, &email).await {
        Ok(true) => {
            warn!(nickname = %nickname, "nickname already taken");
            return Err((StatusCode::BAD_REQUEST, "Nickname already taken".into()));
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "nickname_taken_by_other failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    }

    let profile_url = match upload {
        Some((body, content_type)) => {
            let url = upload_profile_image(&state, body, &content_type)
                .await
                .map_err(|e| {
                    error!(error = %e, "profile image upload failed");
                    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
                })?;
            Some(url)
        }
        None => None,
    };

    let user = User::update_profile(&state.db, &email, &nickname, profile_url.as_deref())
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or((StatusCode::NOT_FOUND, "User not found".to_string()))?;

    info!(user_id = user.id, email = %user.email, "profile updated");
    Ok((
        StatusCode::CREATED,
        Json(ProfileResponse {
            nickname: user.nickname,
            profile_url: user.profile_url,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn check_email(
    State(state): State<AppState>,
    Query(q): Query<EmailQuery>,
) -> Result<Json<AvailabilityResponse>, (StatusCode, String)> {
    let taken = User::email_taken(&state.db, &q.email.trim().to_lowercase())
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    if taken {
        return Err((StatusCode::BAD_REQUEST, "Email already in use".into()));
    }
    Ok(Json(AvailabilityResponse { available: true }))
}

#[instrument(skip(state))]
pub async fn check_nickname(
    State(state): State<AppState>,
    Query(q): Query<NicknameQuery>,
) -> Result<Json<AvailabilityResponse>, (StatusCode, String)> {
    let taken = User::nickname_taken(&state.db, &q.nickname)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    if taken {
        return Err((StatusCode::BAD_REQUEST, "Nickname already in use".into()));
    }
    Ok(Json(AvailabilityResponse { available: true }))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
) -> Result<Json<DeletedUserResponse>, (StatusCode, String)> {
    let deleted = User::soft_delete(&state.db, &email)
        .await
        .map_err(|e| {
            error!(error = %e, email = %email, "soft delete failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    if !deleted {
        return Err((StatusCode::NOT_FOUND, "User not found".into()));
    }

    info!(email = %email, "user soft-deleted");
    Ok(Json(DeletedUserResponse { email }))
}
