// src/handlers/topics.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{error::AppError, store::Storage};

/// Lists the full topic corpus in load order.
pub async fn list_topics(
    State(storage): State<Arc<dyn Storage>>,
) -> Result<impl IntoResponse, AppError> {
    let topics = storage.topics().await;
    Ok(Json(topics))
}

/// Retrieves a single topic by its label.
///
/// Labels contain spaces and colons, so clients URL-encode them; axum hands
/// us the decoded path segment.
pub async fn get_topic(
    State(storage): State<Arc<dyn Storage>>,
    Path(label): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let topic = storage
        .topic_by_label(&label)
        .await
        .ok_or(AppError::NotFound("Topic not found".to_string()))?;

    Ok(Json(topic))
}
