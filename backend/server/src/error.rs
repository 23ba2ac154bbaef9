use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog::Status;
use thiserror::Error;

use crate::{database::StoreError, repository::RepositoryError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload")]
    MalformedPayload,

    #[error("Invalid submission: {0}")]
    InvalidSubmission(String),

    #[error("Software not found")]
    NotFound,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Status cannot be set to {0}")]
    UnsettableStatus(Status),

    #[error("Cannot move listing from {from} to {to}")]
    IllegalTransition { from: Status, to: Status },

    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound { .. } => AppError::NotFound,
            other => AppError::Store(other),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound => AppError::NotFound,
            RepositoryError::UnsettableStatus(status) => AppError::UnsettableStatus(status),
            RepositoryError::IllegalTransition { from, to } => {
                AppError::IllegalTransition { from, to }
            }
            RepositoryError::Store(error) => error.into(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(_: JsonRejection) -> Self {
        AppError::MalformedPayload
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MalformedPayload
            | AppError::InvalidSubmission(_)
            | AppError::UnsettableStatus(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::IllegalTransition { .. } => StatusCode::CONFLICT,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_not_found_maps_to_not_found() {
        let error = AppError::from(StoreError::NotFound {
            collection: "software".to_string(),
            id: "abc".to_string(),
        });

        assert!(matches!(error, AppError::NotFound));
    }

    #[test]
    fn test_repository_errors_keep_their_meaning() {
        assert!(matches!(
            AppError::from(RepositoryError::NotFound),
            AppError::NotFound
        ));
        assert!(matches!(
            AppError::from(RepositoryError::Store(StoreError::NotFound {
                collection: "software".to_string(),
                id: "abc".to_string(),
            })),
            AppError::NotFound
        ));
        assert!(matches!(
            AppError::from(RepositoryError::UnsettableStatus(Status::Pending)),
            AppError::UnsettableStatus(Status::Pending)
        ));
        assert!(matches!(
            AppError::from(RepositoryError::Store(StoreError::UnsupportedUrl(
                "x".to_string()
            ))),
            AppError::Store(_)
        ));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::MalformedPayload, StatusCode::BAD_REQUEST),
            (
                AppError::InvalidSubmission("email".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (AppError::NotFound, StatusCode::NOT_FOUND),
            (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
            (
                AppError::UnsettableStatus(Status::Pending),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::IllegalTransition {
                    from: Status::Disabled,
                    to: Status::Approved,
                },
                StatusCode::CONFLICT,
            ),
            (
                AppError::Store(StoreError::UnsupportedUrl("x".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_transition_message() {
        let error = AppError::IllegalTransition {
            from: Status::Disabled,
            to: Status::Approved,
        };

        assert_eq!(error.to_string(), "Cannot move listing from disabled to approved");
    }
}
