// src/handlers/progress.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use validator::Validate;

use crate::{error::AppError, models::progress::UserProgress, store::Storage};

/// Retrieves progress for one topic.
///
/// A topic that was never attempted is a normal case and returns an empty
/// record, not a 404.
pub async fn get_progress(
    State(storage): State<Arc<dyn Storage>>,
    Path(topic_label): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let progress = storage
        .user_progress(&topic_label)
        .await
        .unwrap_or_else(|| UserProgress::empty(topic_label));

    Ok(Json(progress))
}

/// Stores a progress record, replacing any prior record for the topic.
///
/// Deserialized from a raw value so shape mismatches map to 400 via
/// `From<serde_json::Error>` rather than the extractor's 422.
pub async fn update_progress(
    State(storage): State<Arc<dyn Storage>>,
    Json(payload): Json<serde_json::Value>,
) -> Result<impl IntoResponse, AppError> {
    let progress: UserProgress = serde_json::from_value(payload)?;
    progress.validate()?;
    let stored = storage.update_user_progress(progress).await;
    Ok(Json(stored))
}

/// Clears every progress record unconditionally.
pub async fn reset_progress(
    State(storage): State<Arc<dyn Storage>>,
) -> Result<impl IntoResponse, AppError> {
    storage.reset_all_progress().await;
    Ok(Json(serde_json::json!({
        "message": "All progress has been reset"
    })))
}
