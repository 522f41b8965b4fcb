// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Username/password login and HS256 bearer tokens for the Cryptofolio API.
//!
//! ## Auth Flow
//!
//! 1. Client posts `{username, password}` to `/login`
//! 2. [`CredentialStore`] checks the pair against the static user table
//! 3. [`TokenIssuer`] returns a JWT (`sub` = username, 24h expiry)
//! 4. Client sends `Authorization: Bearer <token>` on every `/assets` call
//! 5. [`middleware::require_auth`] verifies the token and attaches an
//!    [`AuthenticatedUser`] to the request; handlers read it through [`Auth`]
//!
//! ## Security
//!
//! - Only HS256 is accepted; tokens signed with any other algorithm fail
//! - No clock skew leeway: a token is dead the second it expires
//! - Tokens are stateless; there is no revocation or refresh

pub mod claims;
pub mod credentials;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod token;

pub use claims::{AuthenticatedUser, TokenClaims};
pub use credentials::CredentialStore;
pub use error::AuthError;
pub use extractor::Auth;
pub use token::{TokenIssuer, TOKEN_ISSUER, TOKEN_TTL_SECS};
