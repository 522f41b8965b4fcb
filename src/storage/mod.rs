// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Asset Storage
//!
//! Holdings are persisted in an embedded **redb** database (pure Rust, ACID).
//!
//! ## Ownership Isolation
//!
//! Every asset row is keyed by `(owner, id)`. Reads, updates and deletes
//! address rows by that composite key and listings scan only the key range
//! of the caller, so an operation issued for one owner cannot observe or
//! modify another owner's rows even if a handler passes the wrong id.
//!
//! ## Table Layout
//!
//! ```text
//! assets:     (owner, id) → JSON {label, currency, amount}
//! sequences:  name        → next id (u64)
//! ```

pub mod assets;

pub use assets::{AssetStore, StoreError, StoreResult};
