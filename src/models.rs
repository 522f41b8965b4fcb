// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response types for the REST API, plus the [`Currency`] enum
//! that is the single place where the supported-currency set is defined.
//!
//! ## Model Categories
//!
//! - **Auth**: login request and token response
//! - **Assets**: stored holdings and their create/update payloads
//! - **Valuation**: per-asset and aggregate USD values

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Currency
// =============================================================================

/// A supported crypto currency.
///
/// Both the create and update paths parse incoming currency codes through
/// [`Currency::from_str`], so the allow-list lives here and nowhere else.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub enum Currency {
    #[serde(rename = "BTC")]
    Btc,
    #[serde(rename = "ETH")]
    Eth,
    #[serde(rename = "LTC")]
    Ltc,
}

impl Currency {
    /// Every supported currency, in display order.
    pub const ALL: [Currency; 3] = [Currency::Btc, Currency::Eth, Currency::Ltc];

    /// Ticker code as it appears on the wire.
    pub fn code(self) -> &'static str {
        match self {
            Currency::Btc => "BTC",
            Currency::Eth => "ETH",
            Currency::Ltc => "LTC",
        }
    }

    /// Comma-separated list of supported codes, for error messages.
    pub fn allowed_list() -> String {
        Self::ALL
            .iter()
            .map(|c| c.code())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned when a currency code is not in the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid currency '{code}'. Only {} are supported.", Currency::allowed_list())]
pub struct InvalidCurrency {
    pub code: String,
}

impl FromStr for Currency {
    type Err = InvalidCurrency;

    /// Codes are matched exactly; `btc` is not accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == s)
            .ok_or_else(|| InvalidCurrency {
                code: s.to_string(),
            })
    }
}

// =============================================================================
// Auth Models
// =============================================================================

/// Credentials posted to `/login`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Bearer token issued on successful login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Signed token, valid for 24 hours.
    pub token: String,
}

// =============================================================================
// Asset Models
// =============================================================================

/// A holding as returned by the API.
///
/// The owner is implied by the bearer token and never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Asset {
    pub id: u64,
    #[serde(skip)]
    pub owner: String,
    pub label: String,
    pub currency: Currency,
    pub amount: f64,
}

/// Body of `POST /assets` and `PUT /assets/{id}`.
///
/// `currency` stays a plain string here so an unsupported code produces the
/// currency error message rather than a generic deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssetPayload {
    pub label: String,
    #[schema(example = "BTC")]
    pub currency: String,
    pub amount: f64,
}

impl AssetPayload {
    /// Parse the currency against the supported set.
    pub fn currency(&self) -> Result<Currency, InvalidCurrency> {
        self.currency.parse()
    }
}

/// Response after creating an asset.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedAsset {
    pub id: u64,
}

// =============================================================================
// Valuation Models
// =============================================================================

/// A single asset together with its current USD value.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ValuedAsset {
    pub id: u64,
    pub label: String,
    pub currency: Currency,
    pub amount: f64,
    pub usd_value: f64,
}

/// Aggregate USD value of everything the caller owns.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TotalValue {
    pub total_usd: f64,
}
