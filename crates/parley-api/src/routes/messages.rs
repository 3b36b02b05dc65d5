use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    Json,
};
use parley_core::AppState;
use parley_models::message::{PullRequest, PullResponse, SendRequest, SendResponse};

use crate::error::ApiError;

pub async fn send(
    State(state): State<AppState>,
    body: Result<Json<SendRequest>, JsonRejection>,
) -> Result<Json<SendResponse>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    state
        .conversations
        .send(&body.chat, &body.text, &body.sender)
        .await?;

    Ok(Json(SendResponse::success()))
}

pub async fn pull(
    State(state): State<AppState>,
    params: Result<Query<PullRequest>, QueryRejection>,
) -> Result<Json<PullResponse>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let page = state
        .conversations
        .pull(&params.chat, params.cursor, params.limit, params.reverse)
        .await?;

    Ok(Json(PullResponse::success(
        page.items,
        page.has_more,
        page.next_cursor,
    )))
}
