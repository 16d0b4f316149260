//! Persistence collaborator boundary
//!
//! The stores consume persistence through the [`BackendClient`] trait; they
//! never implement storage themselves. [`MemoryBackend`] is the default
//! in-process implementation used by tests and by the binary when no remote
//! endpoint is configured.

pub mod client;
pub mod error;
pub mod fields;
pub mod records;

use std::sync::Arc;

pub use client::{BackendClient, MemoryBackend};
pub use error::BackendError;
pub use fields::{DesignFields, LoomFields, TransactionFields, WeaverFields};
pub use records::{parse_amount, CategorySet, Design, Loom, Transaction, TxnType, Weaver};

/// Shared backend handle
pub type BackendRef = Arc<dyn BackendClient>;
