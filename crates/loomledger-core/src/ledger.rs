//! Location-scoped ledger store
//!
//! Holds the raw transaction snapshot for the active location plus the
//! location's category enumerations. Snapshots are replaced wholesale on a
//! successful fetch and left untouched on failure.

use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use crate::error::CoreError;
use crate::filter::{filter, FilterCriteria, LedgerView};
use crate::validate::validate_transaction;
use loomledger_backend::{BackendRef, Transaction, TransactionFields};

/// In-memory ledger snapshot for one location
#[derive(Debug, Default, Clone)]
pub struct LedgerData {
    pub transactions: Vec<Transaction>,
    pub categories: Vec<String>,
    pub sub_categories: Vec<String>,
}

/// Ledger store for the active location
pub struct Ledger {
    backend: BackendRef,
    data: RwLock<LedgerData>,
    location: RwLock<String>,
    generation: AtomicU64,
}

impl Ledger {
    /// Create a ledger bound to an initial location; call [`Ledger::load`]
    /// to populate it
    pub fn new(backend: BackendRef, location: &str) -> Self {
        Self {
            backend,
            data: RwLock::new(LedgerData::default()),
            location: RwLock::new(location.to_string()),
            generation: AtomicU64::new(0),
        }
    }

    /// The location this ledger currently serves
    pub fn active_location(&self) -> String {
        self.location.read().unwrap().clone()
    }

    /// Generation token for the current scope; bumped on every switch
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Install a fetched snapshot if it still belongs to the current scope
    ///
    /// Returns false when the generation no longer matches, meaning the
    /// location changed while the fetch was in flight and the result is
    /// discarded (last-write-wins).
    pub fn install_snapshot(&self, generation: u64, snapshot: LedgerData) -> bool {
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("discarding stale ledger snapshot (generation {})", generation);
            return false;
        }
        let mut data = self.data.write().unwrap();
        *data = snapshot;
        true
    }

    /// Reload the snapshot for the active location
    pub async fn load(&self) -> Result<(), CoreError> {
        let location = self.active_location();
        let generation = self.current_generation();

        let transactions = self.backend.list_transactions(&location).await?;
        let categories = self.backend.list_categories(&location).await?;

        self.install_snapshot(
            generation,
            LedgerData {
                transactions,
                categories: categories.categories,
                sub_categories: categories.sub_categories,
            },
        );
        Ok(())
    }

    /// Switch to another location partition
    ///
    /// The old snapshot is cleared before the new scope is fetched so
    /// records from a different partition are never visible, and the
    /// generation bump makes any still-running reload for the old scope a
    /// no-op when it lands.
    pub async fn switch_location(&self, name: &str) -> Result<(), CoreError> {
        {
            let mut location = self.location.write().unwrap();
            *location = name.to_string();
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
        {
            let mut data = self.data.write().unwrap();
            *data = LedgerData::default();
        }
        self.load().await
    }

    /// Filtered, sorted, capped view over the snapshot plus totals
    pub fn view(&self, criteria: &FilterCriteria) -> LedgerView {
        let data = self.data.read().unwrap();
        filter(&data.transactions, criteria)
    }

    /// All raw transactions in the snapshot
    pub fn transactions(&self) -> Vec<Transaction> {
        self.data.read().unwrap().transactions.clone()
    }

    pub fn transactions_count(&self) -> usize {
        self.data.read().unwrap().transactions.len()
    }

    /// Category enumeration for the active location (read-only to callers)
    pub fn categories(&self) -> Vec<String> {
        self.data.read().unwrap().categories.clone()
    }

    pub fn sub_categories(&self) -> Vec<String> {
        self.data.read().unwrap().sub_categories.clone()
    }

    /// Validate and create a transaction in the active location
    ///
    /// The snapshot is reloaded before this returns, so a rapid second
    /// submission never runs against stale data.
    pub async fn submit(&self, fields: TransactionFields) -> Result<Transaction, CoreError> {
        validate_transaction(&fields)?;
        let location = self.active_location();
        let created = self.backend.create_transaction(&location, fields).await?;
        self.load().await?;
        self.register_categories(&created);
        Ok(created)
    }

    /// Validate and replace the mutable fields of an existing transaction
    pub async fn amend(&self, id: &str, fields: TransactionFields) -> Result<Transaction, CoreError> {
        validate_transaction(&fields)?;
        let location = self.active_location();
        let updated = self.backend.update_transaction(&location, id, fields).await?;
        self.load().await?;
        self.register_categories(&updated);
        Ok(updated)
    }

    // Register-if-absent, run after a successful submission so fresh
    // category values show up without waiting for another full reload.
    fn register_categories(&self, txn: &Transaction) {
        let mut data = self.data.write().unwrap();
        if !data.categories.contains(&txn.category) {
            data.categories.push(txn.category.clone());
        }
        if let Some(sub) = &txn.sub_category {
            if !sub.is_empty() && !data.sub_categories.contains(sub) {
                data.sub_categories.push(sub.clone());
            }
        }
    }
}
