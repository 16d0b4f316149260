//! Error types for loomledger-backend

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    /// Network or storage failure; retryable, callers keep their prior snapshot
    #[error("Backend unavailable: {message}")]
    Unavailable { message: String },

    /// The collaborator refused the write
    #[error("Backend rejected the request: {message}")]
    Rejected { message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Location already exists: {name}")]
    DuplicateLocation { name: String },
}
