use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{NewRecommendation, Recommendation},
    routes::{extract::ValidatedJson, AppState},
};

/// `POST /recommendations`
pub async fn create(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<NewRecommendation>,
) -> AppResult<StatusCode> {
    state.service.insert(request).await?;
    Ok(StatusCode::CREATED)
}

/// `POST /recommendations/:id/upvote`
pub async fn upvote(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.service.upvote(id).await?;
    Ok(StatusCode::OK)
}

/// `POST /recommendations/:id/downvote`
pub async fn downvote(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.service.downvote(id).await?;
    Ok(StatusCode::OK)
}

/// `GET /recommendations`
pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Recommendation>>> {
    let recommendations = state.service.get_latest().await?;
    Ok(Json(recommendations))
}

/// `GET /recommendations/:id`
pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<Recommendation>> {
    let recommendation = state.service.get_by_id(id).await?;
    Ok(Json(recommendation))
}

/// `GET /recommendations/random`
pub async fn random(State(state): State<Arc<AppState>>) -> AppResult<Json<Recommendation>> {
    let recommendation = state.service.get_random().await?;
    Ok(Json(recommendation))
}

/// `GET /recommendations/top/:amount`
pub async fn top(
    State(state): State<Arc<AppState>>,
    Path(amount): Path<u32>,
) -> AppResult<Json<Vec<Recommendation>>> {
    let recommendations = state.service.get_top(amount).await?;
    Ok(Json(recommendations))
}
