// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Spot Price Feed
//!
//! A [`RateProvider`] returns a fresh [`RateSnapshot`] of USD prices for every
//! supported currency. Snapshots are fetched per request and never cached.

pub mod coingecko;

use async_trait::async_trait;
use serde::Serialize;

use crate::models::Currency;

pub use coingecko::CoinGeckoClient;

/// Errors raised while fetching spot prices.
#[derive(Debug, thiserror::Error)]
pub enum RateError {
    #[error("price service request failed: {0}")]
    Request(String),

    #[error("price service timed out")]
    Timeout,

    #[error("price service returned HTTP {0}")]
    Status(u16),

    #[error("price service response was invalid: {0}")]
    InvalidResponse(String),

    #[error("price service response is missing {0}")]
    MissingPrice(&'static str),
}

/// USD spot price per unit for each supported currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateSnapshot {
    pub btc: f64,
    pub eth: f64,
    pub ltc: f64,
}

impl RateSnapshot {
    /// Price of one unit of `currency` in USD.
    pub fn usd_price(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Btc => self.btc,
            Currency::Eth => self.eth,
            Currency::Ltc => self.ltc,
        }
    }

    /// Value of `amount` units of `currency` in USD.
    pub fn usd_value(&self, currency: Currency, amount: f64) -> f64 {
        amount * self.usd_price(currency)
    }
}

/// Source of spot prices.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetch current prices. One outbound call, no retry.
    async fn fetch_rates(&self) -> Result<RateSnapshot, RateError>;
}

/// Provider returning a fixed snapshot, or a fixed failure.
///
/// Used by tests and for running the server offline.
#[derive(Debug, Clone)]
pub struct StaticRates(Option<RateSnapshot>);

impl StaticRates {
    pub fn new(snapshot: RateSnapshot) -> Self {
        Self(Some(snapshot))
    }

    /// A provider whose every fetch fails as if the upstream were down.
    pub fn unavailable() -> Self {
        Self(None)
    }
}

#[async_trait]
impl RateProvider for StaticRates {
    async fn fetch_rates(&self) -> Result<RateSnapshot, RateError> {
        self.0
            .ok_or_else(|| RateError::Request("price service unavailable".to_string()))
    }
}
