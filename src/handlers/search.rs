// src/handlers/search.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{error::AppError, store::Storage};

/// Query parameters for both search endpoints.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

fn require_query(params: SearchParams) -> Result<String, AppError> {
    match params.q {
        Some(q) if !q.is_empty() => Ok(q),
        _ => Err(AppError::BadRequest(
            "Query parameter 'q' is required".to_string(),
        )),
    }
}

/// Substring search over question prompts, explanations and option values.
pub async fn search_questions(
    State(storage): State<Arc<dyn Storage>>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let query = require_query(params)?;
    let results = storage.search_questions(&query).await;
    Ok(Json(results))
}

/// Substring search over surgery-secret text.
pub async fn search_secrets(
    State(storage): State<Arc<dyn Storage>>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let query = require_query(params)?;
    let results = storage.search_secrets(&query).await;
    Ok(Json(results))
}
