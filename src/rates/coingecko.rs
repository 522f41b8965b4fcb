// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! CoinGecko simple-price client.
//!
//! Response shape:
//!
//! ```json
//! {"bitcoin":{"usd":67000.0},"ethereum":{"usd":3500.0},"litecoin":{"usd":80.0}}
//! ```

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{RateError, RateProvider, RateSnapshot};

/// Default price endpoint.
pub const DEFAULT_RATES_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin,ethereum,litecoin&vs_currencies=usd";

/// Upper bound for one price request, connect included.
pub const RATE_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct UsdQuote {
    usd: Option<f64>,
}

type SimplePriceResponse = HashMap<String, UsdQuote>;

/// HTTP client for the CoinGecko simple-price endpoint.
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    url: String,
    http: Client,
}

impl CoinGeckoClient {
    /// Create a client for `url` with the standard 5 second timeout.
    pub fn new(url: impl Into<String>) -> Result<Self, RateError> {
        Self::with_timeout(url, RATE_FETCH_TIMEOUT)
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self, RateError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RateError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            url: url.into(),
            http,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RateProvider for CoinGeckoClient {
    async fn fetch_rates(&self) -> Result<RateSnapshot, RateError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            return Err(RateError::Status(response.status().as_u16()));
        }

        let body: SimplePriceResponse = response
            .json()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RateError::Timeout
                } else {
                    RateError::InvalidResponse(e.to_string())
                }
            })?;

        snapshot_from_response(&body)
    }
}

fn map_transport_error(e: reqwest::Error) -> RateError {
    if e.is_timeout() {
        RateError::Timeout
    } else {
        RateError::Request(e.to_string())
    }
}

fn snapshot_from_response(body: &SimplePriceResponse) -> Result<RateSnapshot, RateError> {
    let price = |coin: &'static str| {
        body.get(coin)
            .and_then(|quote| quote.usd)
            .ok_or(RateError::MissingPrice(coin))
    };

    Ok(RateSnapshot {
        btc: price("bitcoin")?,
        eth: price("ethereum")?,
        ltc: price("litecoin")?,
    })
}
