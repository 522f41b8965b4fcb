// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Environment variable names, defaults, and the [`AppConfig`] value that is
//! loaded once at startup and handed to the components that need it.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_SECRET` | HS256 signing secret for bearer tokens | Required |
//! | `STATIC_USERS` | Credential table, `user:password,user2:password2` | empty |
//! | `DATABASE_PATH` | redb database file | `data/cryptofolio.redb` |
//! | `RATES_URL` | Spot price endpoint (CoinGecko simple price) | CoinGecko public API |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;
use std::path::PathBuf;

use url::Url;

use crate::auth::{CredentialStore, TokenIssuer};
use crate::rates::coingecko::DEFAULT_RATES_URL;

pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub const STATIC_USERS_ENV: &str = "STATIC_USERS";
pub const DATABASE_PATH_ENV: &str = "DATABASE_PATH";
pub const RATES_URL_ENV: &str = "RATES_URL";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_DATABASE_PATH: &str = "data/cryptofolio.redb";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Startup configuration errors. All of them are fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JWT_SECRET environment variable is not set")]
    MissingJwtSecret,

    #[error("invalid STATIC_USERS entry '{0}' (expected 'username:password')")]
    InvalidUserEntry(String),

    #[error("invalid RATES_URL '{url}': {reason}")]
    InvalidRatesUrl { url: String, reason: String },

    #[error("invalid bind address '{0}'")]
    InvalidBindAddress(String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Immutable process configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_path: PathBuf,
    pub rates_url: String,
    pub log_format: LogFormat,
    pub tokens: TokenIssuer,
    pub credentials: CredentialStore,
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` to resolve variable names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(JWT_SECRET_ENV).unwrap_or_default();
        let tokens = TokenIssuer::new(secret.as_bytes())?;

        let credentials = match lookup(STATIC_USERS_ENV) {
            Some(entries) => CredentialStore::parse(&entries)?,
            None => CredentialStore::default(),
        };

        let rates_url = lookup(RATES_URL_ENV).unwrap_or_else(|| DEFAULT_RATES_URL.to_string());
        Url::parse(&rates_url).map_err(|e| ConfigError::InvalidRatesUrl {
            url: rates_url.clone(),
            reason: e.to_string(),
        })?;

        let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = lookup(PORT_ENV)
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let bind_addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddress(format!("{host}:{port}")))?;

        let database_path = lookup(DATABASE_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH));

        let log_format = match lookup(LOG_FORMAT_ENV).as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            bind_addr,
            database_path,
            rates_url,
            log_format,
            tokens,
            credentials,
        })
    }
}
