// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::{
    error::ApiError,
    models::{LoginRequest, LoginResponse},
    state::AppState,
};

/// Exchange static credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Invalid JSON"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    request: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(request) = request?;

    if !state
        .credentials
        .authenticate(&request.username, &request.password)
    {
        tracing::warn!(username = %request.username, "Failed login attempt");
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = state.tokens.issue(&request.username).map_err(|e| {
        tracing::error!(error = %e, "Token signing failed");
        ApiError::internal("Could not generate token")
    })?;

    tracing::info!(username = %request.username, "Login succeeded");
    Ok(Json(LoginResponse { token }))
}
