use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::attempt::{AttemptResponse, SubmitAttemptRequest},
    models::NewAttempt,
};

use crate::error::{WebError, WebResult};

use super::services;

#[utoipa::path(
    post,
    path = "/api/attempts",
    request_body = SubmitAttemptRequest,
    responses(
        (status = 201, description = "Attempt recorded successfully", body = AttemptResponse),
        (status = 400, description = "Validation error"),
        (status = 422, description = "Rejected by a storage constraint"),
        (status = 503, description = "Storage backend unavailable")
    ),
    tag = "attempts"
)]
pub async fn submit_attempt(
    State(db): State<Database>,
    payload: Result<Json<SubmitAttemptRequest>, JsonRejection>,
) -> WebResult<Response> {
    let Json(req) = payload.map_err(|rejection| WebError::BadRequest(rejection.body_text()))?;

    let new_attempt = NewAttempt::try_from(req)?;

    let attempt = services::submit_attempt(db.pool(), &new_attempt).await?;
    tracing::info!(
        id = attempt.id,
        category = %attempt.category,
        time_seconds = attempt.time_seconds,
        "Recorded attempt for {}",
        attempt.name
    );

    Ok((StatusCode::CREATED, Json(AttemptResponse::from(attempt))).into_response())
}

#[utoipa::path(
    get,
    path = "/api/attempts",
    responses(
        (status = 200, description = "All attempts ordered by date, then time", body = Vec<AttemptResponse>)
    ),
    tag = "attempts"
)]
pub async fn list_attempts(State(db): State<Database>) -> WebResult<Json<Vec<AttemptResponse>>> {
    let attempts = services::list_attempts(db.pool()).await?;

    let response: Vec<AttemptResponse> = attempts.into_iter().map(AttemptResponse::from).collect();

    Ok(Json(response))
}
