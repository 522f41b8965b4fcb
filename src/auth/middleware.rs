// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! Applied to the `/assets` router subtree:
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/assets", get(list_assets))
//!     .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_auth));
//! ```
//!
//! Requests without a valid token are answered with 401 here and never reach
//! the handler.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::extractor::bearer_token;
use crate::state::AppState;

/// Verify the bearer token and attach the [`super::AuthenticatedUser`].
pub async fn require_auth(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let verified = bearer_token(request.headers()).and_then(|token| state.tokens.verify(token));

    match verified {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            tracing::warn!(
                reason = %e,
                code = e.error_code(),
                method = %request.method(),
                path = %request.uri().path(),
                "Unauthorized request"
            );
            e.into_response()
        }
    }
}
