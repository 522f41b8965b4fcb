// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Asset management and valuation endpoints.
//!
//! Every handler is scoped to the authenticated owner. Ids that belong to
//! another owner behave exactly like ids that do not exist.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{Asset, AssetPayload, CreatedAsset, TotalValue, ValuedAsset},
    state::AppState,
};

/// Record a new holding for the authenticated user.
#[utoipa::path(
    post,
    path = "/assets",
    tag = "Assets",
    security(("bearer_auth" = [])),
    request_body = AssetPayload,
    responses(
        (status = 201, description = "Asset created", body = CreatedAsset),
        (status = 400, description = "Invalid body or unsupported currency"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Storage error")
    )
)]
pub async fn create_asset(
    Auth(user): Auth,
    State(state): State<AppState>,
    payload: Result<Json<AssetPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedAsset>), ApiError> {
    let Json(payload) = payload?;
    let currency = payload.currency()?;

    let id = state
        .store
        .create(&user.username, &payload.label, currency, payload.amount)?;

    tracing::info!(owner = %user.username, asset_id = id, %currency, "Asset created");

    Ok((StatusCode::CREATED, Json(CreatedAsset { id })))
}

/// List every holding of the authenticated user.
#[utoipa::path(
    get,
    path = "/assets",
    tag = "Assets",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Owned assets", body = Vec<Asset>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_assets(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Asset>>, ApiError> {
    let assets = state.store.list(&user.username)?;
    Ok(Json(assets))
}

/// Fetch one holding together with its current USD value.
#[utoipa::path(
    get,
    path = "/assets/{id}",
    tag = "Assets",
    security(("bearer_auth" = [])),
    params(("id" = u64, Path, description = "Asset id")),
    responses(
        (status = 200, description = "Asset with USD value", body = ValuedAsset),
        (status = 400, description = "Invalid asset id"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Asset not found"),
        (status = 502, description = "Price service unavailable")
    )
)]
pub async fn get_asset(
    Auth(user): Auth,
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<ValuedAsset>, ApiError> {
    let Path(id) = id?;
    let asset = state.store.get(&user.username, id)?;
    let rates = state.rates.fetch_rates().await?;

    Ok(Json(ValuedAsset {
        usd_value: rates.usd_value(asset.currency, asset.amount),
        id: asset.id,
        label: asset.label,
        currency: asset.currency,
        amount: asset.amount,
    }))
}

/// Replace label, currency and amount of an owned holding.
///
/// An id the caller does not own is accepted and left untouched.
#[utoipa::path(
    put,
    path = "/assets/{id}",
    tag = "Assets",
    security(("bearer_auth" = [])),
    params(("id" = u64, Path, description = "Asset id")),
    request_body = AssetPayload,
    responses(
        (status = 200, description = "Update applied"),
        (status = 400, description = "Invalid body, id or currency"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn update_asset(
    Auth(user): Auth,
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    payload: Result<Json<AssetPayload>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let currency = payload.currency()?;

    let affected = state.store.update(
        &user.username,
        id,
        &payload.label,
        currency,
        payload.amount,
    )?;

    if affected == 0 {
        tracing::debug!(owner = %user.username, asset_id = id, "Update matched no owned asset");
    }

    Ok(StatusCode::OK)
}

/// Remove an owned holding. Missing or foreign ids still return 204.
#[utoipa::path(
    delete,
    path = "/assets/{id}",
    tag = "Assets",
    security(("bearer_auth" = [])),
    params(("id" = u64, Path, description = "Asset id")),
    responses(
        (status = 204, description = "Asset deleted (or nothing to delete)"),
        (status = 400, description = "Invalid asset id"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn delete_asset(
    Auth(user): Auth,
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;

    if state.store.delete(&user.username, id)? == 0 {
        tracing::debug!(owner = %user.username, asset_id = id, "Delete matched no owned asset");
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Sum the USD value of everything the authenticated user owns.
///
/// Rates are fetched once per request, even when the user owns nothing.
#[utoipa::path(
    get,
    path = "/assets/value/total",
    tag = "Assets",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Total USD value", body = TotalValue),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Price service unavailable")
    )
)]
pub async fn total_value(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<TotalValue>, ApiError> {
    let assets = state.store.list(&user.username)?;
    let rates = state.rates.fetch_rates().await?;

    let total_usd = assets
        .iter()
        .map(|asset| rates.usd_value(asset.currency, asset.amount))
        .sum();

    Ok(Json(TotalValue { total_usd }))
}
