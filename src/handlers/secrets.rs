// src/handlers/secrets.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};

use crate::{error::AppError, store::Storage};

/// Lists the fixed surgery-secrets reference list in ordinal order.
pub async fn list_secrets(
    State(storage): State<Arc<dyn Storage>>,
) -> Result<impl IntoResponse, AppError> {
    let secrets = storage.surgery_secrets().await;
    Ok(Json(secrets))
}
