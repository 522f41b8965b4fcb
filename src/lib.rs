// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Cryptofolio - Personal Crypto Holdings Tracker
//!
//! This crate provides an authenticated HTTP service for recording BTC, ETH
//! and LTC holdings and valuing them in USD from live spot prices.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Login, HS256 bearer tokens, auth middleware
//! - `config` - Environment-driven startup configuration
//! - `rates` - Spot price providers (CoinGecko)
//! - `storage` - Owner-scoped asset store (redb)

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod rates;
pub mod state;
pub mod storage;
