//! Error types for loomledger-core

use thiserror::Error;

use crate::validate::ValidationError;
use loomledger_backend::BackendError;

#[derive(Error, Debug)]
pub enum CoreError {
    /// Field-level rejection; form state is kept so the user can correct it
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Collaborator failure; the prior snapshot is left untouched
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Unknown location: {name}")]
    UnknownLocation { name: String },

    /// Duplicate partition name, rejected before any reload is attempted
    #[error("Location already exists: {name}")]
    DuplicateLocation { name: String },

    #[error("Admin password check failed")]
    AdminRejected,
}
