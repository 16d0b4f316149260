//! Error types for loomledger-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use loomledger_backend::BackendError;
use loomledger_catalog::CatalogError;
use loomledger_core::{CoreError, ValidationError};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("{0}")]
    Unprocessable(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Backend unavailable: {message}")]
    BackendUnavailable { message: String },

    #[error("Internal server error")]
    InternalError,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::BackendUnavailable { .. } => StatusCode::BAD_GATEWAY,
            ApiError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Unprocessable(err.to_string())
    }
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Unavailable { message } => ApiError::BackendUnavailable { message },
            BackendError::Rejected { message } => ApiError::Conflict { message },
            BackendError::NotFound { resource } => ApiError::NotFound { resource },
            BackendError::DuplicateLocation { name } => ApiError::Conflict {
                message: format!("Location already exists: {}", name),
            },
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(inner) => inner.into(),
            CoreError::Backend(inner) => inner.into(),
            CoreError::UnknownLocation { name } => ApiError::NotFound {
                resource: format!("location {}", name),
            },
            CoreError::DuplicateLocation { name } => ApiError::Conflict {
                message: format!("Location already exists: {}", name),
            },
            CoreError::AdminRejected => ApiError::Unauthorized,
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(inner) => inner.into(),
            CatalogError::StaleSelection { .. } => ApiError::Unprocessable(err.to_string()),
            CatalogError::Backend(inner) => inner.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err: ApiError = ValidationError::new("amount", "must be greater than zero").into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let err: ApiError = BackendError::Unavailable {
            message: "connection refused".to_string(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);

        let err: ApiError = CoreError::AdminRejected.into();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);

        let err: ApiError = BackendError::DuplicateLocation {
            name: "Chennai".to_string(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }
}
