//! Ledger processing for one location at a time
//!
//! The filter engine is a pure function over an in-memory snapshot; the
//! [`Ledger`] store owns that snapshot and talks to the persistence
//! collaborator to refresh it.

pub mod error;
pub mod export;
pub mod filter;
pub mod ledger;
pub mod location;
pub mod validate;

pub use error::CoreError;
pub use export::{tabular_rows, ExportSink, TabularRow};
pub use filter::{filter, DisplayLimit, FilterCriteria, LedgerView, Totals, TypeFilter};
pub use ledger::{Ledger, LedgerData};
pub use location::LocationRegistry;
pub use validate::{validate_transaction, ValidationError};

// The record types flow through from the collaborator boundary unchanged.
pub use loomledger_backend::{Transaction, TransactionFields, TxnType};
