// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Static username → password table used by `/login`.
//!
//! Passwords are compared by plain string equality. There is no hashing and
//! no constant-time comparison; the table is meant for a single-user or
//! small trusted deployment.

use std::collections::HashMap;
use std::fmt;

use crate::config::ConfigError;

/// Fixed credential table loaded at startup.
#[derive(Clone, Default)]
pub struct CredentialStore {
    users: HashMap<String, String>,
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("users", &self.users.len())
            .finish()
    }
}

impl CredentialStore {
    pub fn new(users: HashMap<String, String>) -> Self {
        Self { users }
    }

    /// Parse the `STATIC_USERS` format: `alice:secret,bob:hunter2`.
    ///
    /// Whitespace around entries is ignored. The password is everything after
    /// the first `:`, so it may itself contain colons.
    pub fn parse(entries: &str) -> Result<Self, ConfigError> {
        let mut users = HashMap::new();

        for entry in entries.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (username, password) = entry
                .split_once(':')
                .filter(|(u, p)| !u.is_empty() && !p.is_empty())
                .ok_or_else(|| ConfigError::InvalidUserEntry(entry.to_string()))?;
            users.insert(username.to_string(), password.to_string());
        }

        Ok(Self { users })
    }

    /// True iff `username` exists and `password` matches exactly.
    ///
    /// Unknown users and wrong passwords are indistinguishable to the caller.
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|expected| expected == password)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl<U: Into<String>, P: Into<String>> FromIterator<(U, P)> for CredentialStore {
    fn from_iter<I: IntoIterator<Item = (U, P)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(u, p)| (u.into(), p.into()))
                .collect(),
        )
    }
}
