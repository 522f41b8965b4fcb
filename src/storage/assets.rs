// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! redb-backed asset store, scoped per owner.

use std::path::Path;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};

use crate::models::{Asset, Currency};

// =============================================================================
// Table Definitions
// =============================================================================

/// Primary table: (owner, id) → serialized [`AssetRecord`] (JSON bytes).
const ASSETS: TableDefinition<(&str, u64), &[u8]> = TableDefinition::new("assets");

/// Auto-increment counters: sequence name → last issued value.
const SEQUENCES: TableDefinition<&str, u64> = TableDefinition::new("sequences");

const ASSET_ID_SEQUENCE: &str = "assets";

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("redb database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("failed to prepare database directory: {0}")]
    Io(#[from] std::io::Error),

    /// A row failed the amount/currency constraints.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("not found: {0}")]
    NotFound(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Stored Record
// =============================================================================

/// Row value. The owner and id live in the key.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AssetRecord {
    label: String,
    currency: Currency,
    amount: f64,
}

impl AssetRecord {
    /// Build a record, enforcing the `amount >= 0` column constraint.
    fn checked(label: &str, currency: Currency, amount: f64) -> StoreResult<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(StoreError::ConstraintViolation(format!(
                "amount must be a non-negative number, got {amount}"
            )));
        }
        Ok(Self {
            label: label.to_string(),
            currency,
            amount,
        })
    }

    fn into_asset(self, owner: &str, id: u64) -> Asset {
        Asset {
            id,
            owner: owner.to_string(),
            label: self.label,
            currency: self.currency,
            amount: self.amount,
        }
    }
}

// =============================================================================
// AssetStore
// =============================================================================

/// Embedded ACID store for asset records.
pub struct AssetStore {
    db: Database,
}

impl AssetStore {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let db = Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ASSETS)?;
            let _ = write_txn.open_table(SEQUENCES)?;
        }
        write_txn.commit()?;

        tracing::info!(path = %path.display(), "Asset store opened");
        Ok(Self { db })
    }

    /// Insert a new asset for `owner` and return its id.
    pub fn create(
        &self,
        owner: &str,
        label: &str,
        currency: Currency,
        amount: f64,
    ) -> StoreResult<u64> {
        let record = AssetRecord::checked(label, currency, amount)?;
        let json = serde_json::to_vec(&record)?;

        let write_txn = self.db.begin_write()?;
        let id = {
            let mut sequences = write_txn.open_table(SEQUENCES)?;
            let id = sequences
                .get(ASSET_ID_SEQUENCE)?
                .map(|v| v.value())
                .unwrap_or(0)
                + 1;
            sequences.insert(ASSET_ID_SEQUENCE, id)?;

            let mut assets = write_txn.open_table(ASSETS)?;
            assets.insert((owner, id), json.as_slice())?;
            id
        };
        write_txn.commit()?;

        Ok(id)
    }

    /// All assets owned by `owner`. Callers must not rely on the order.
    pub fn list(&self, owner: &str) -> StoreResult<Vec<Asset>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ASSETS)?;

        let mut assets = Vec::new();
        for entry in table.range((owner, 0u64)..=(owner, u64::MAX))? {
            let (key, value) = entry?;
            let (_, id) = key.value();
            let record: AssetRecord = serde_json::from_slice(value.value())?;
            assets.push(record.into_asset(owner, id));
        }

        Ok(assets)
    }

    /// Look up one asset. Ids owned by someone else report `NotFound`.
    pub fn get(&self, owner: &str, id: u64) -> StoreResult<Asset> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ASSETS)?;
        match table.get((owner, id))? {
            Some(value) => {
                let record: AssetRecord = serde_json::from_slice(value.value())?;
                Ok(record.into_asset(owner, id))
            }
            None => Err(StoreError::NotFound(format!("Asset {id}"))),
        }
    }

    /// Replace label, currency and amount of an owned asset.
    ///
    /// Returns the number of rows affected: 0 when the id does not exist for
    /// this owner, which is not an error.
    pub fn update(
        &self,
        owner: &str,
        id: u64,
        label: &str,
        currency: Currency,
        amount: f64,
    ) -> StoreResult<u64> {
        let record = AssetRecord::checked(label, currency, amount)?;
        let json = serde_json::to_vec(&record)?;

        let write_txn = self.db.begin_write()?;
        let affected = {
            let mut table = write_txn.open_table(ASSETS)?;
            let exists = table.get((owner, id))?.is_some();
            if exists {
                table.insert((owner, id), json.as_slice())?;
                1
            } else {
                0
            }
        };
        write_txn.commit()?;

        Ok(affected)
    }

    /// Delete an owned asset. Returns the number of rows removed (0 or 1).
    pub fn delete(&self, owner: &str, id: u64) -> StoreResult<u64> {
        let write_txn = self.db.begin_write()?;
        let affected = {
            let mut table = write_txn.open_table(ASSETS)?;
            let removed = table.remove((owner, id))?.is_some();
            u64::from(removed)
        };
        write_txn.commit()?;

        Ok(affected)
    }

    /// Open a read transaction against the asset table (health probe).
    pub fn check(&self) -> StoreResult<()> {
        let read_txn = self.db.begin_read()?;
        let _ = read_txn.open_table(ASSETS)?;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
