//! Error types for loomledger-catalog

use thiserror::Error;

use loomledger_backend::BackendError;
use loomledger_core::ValidationError;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Child selection no longer valid for the current parent. The cascade
    /// clears the child on every parent change, so this only surfaces when
    /// a submission bypasses the cascade with a mismatched pair.
    #[error("Selection {selected} is not valid for {parent}")]
    StaleSelection { parent: String, selected: String },

    #[error(transparent)]
    Backend(#[from] BackendError),
}
