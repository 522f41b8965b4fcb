// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and authenticated user representation.

use serde::{Deserialize, Serialize};

/// Claims carried by a Cryptofolio token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject: the username that owns the token.
    #[serde(default)]
    pub sub: String,

    /// Issuer, always [`super::TOKEN_ISSUER`] for tokens minted here.
    pub iss: String,

    /// Issued at (Unix seconds)
    pub iat: i64,

    /// Expiration (Unix seconds)
    pub exp: i64,
}

/// Caller identity resolved from a verified token.
///
/// Inserted into request extensions by the auth middleware; the username is
/// the owner key for every asset operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,

    /// Token expiration (Unix seconds)
    pub expires_at: i64,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: TokenClaims) -> Self {
        Self {
            username: claims.sub,
            expires_at: claims.exp,
        }
    }
}
