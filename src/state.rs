// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::{
    auth::{CredentialStore, TokenIssuer},
    rates::RateProvider,
    storage::AssetStore,
};

/// Shared, read-only handles passed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<AssetStore>,
    pub rates: Arc<dyn RateProvider>,
    pub tokens: Arc<TokenIssuer>,
    pub credentials: Arc<CredentialStore>,
}

impl AppState {
    pub fn new(
        store: AssetStore,
        rates: impl RateProvider + 'static,
        tokens: TokenIssuer,
        credentials: CredentialStore,
    ) -> Self {
        Self {
            store: Arc::new(store),
            rates: Arc::new(rates),
            tokens: Arc::new(tokens),
            credentials: Arc::new(credentials),
        }
    }
}
