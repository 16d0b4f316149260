//! Route modules for the API server
//!
//! All routes are organized into modules:
//! - transactions: Ledger list, filters, totals, export, amendments
//! - locations: Partition listing, creation, switching
//! - catalog: Weaver, loom, and design records plus option endpoints

pub mod catalog;
pub mod locations;
pub mod transactions;
