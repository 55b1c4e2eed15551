use axum::{extract::State, http::StatusCode};
use std::sync::Arc;

use crate::{error::AppResult, routes::AppState};

/// `POST /e2e/reset` - wipes the store between end-to-end scenarios
pub async fn reset(State(state): State<Arc<AppState>>) -> AppResult<StatusCode> {
    state.service.reset().await?;
    Ok(StatusCode::OK)
}
