use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use tracing::{error, instrument};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/s3/buckets", get(list_buckets))
}

#[derive(Debug, Serialize)]
pub struct BucketsResponse {
    pub buckets: Vec<String>,
}

/// Storage connectivity probe.
#[instrument(skip(state))]
pub async fn list_buckets(
    State(state): State<AppState>,
) -> Result<Json<BucketsResponse>, (StatusCode, String)> {
    let buckets = state.storage.bucket_names().await.map_err(|e| {
        error!(error = %e, "failed to reach object storage");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    Ok(Json(BucketsResponse { buckets }))
}
