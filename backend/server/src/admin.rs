//! # Admin Controller
//!
//! Moderation actions from the dashboard. Each one writes a single field and then reloads the
//! whole collection. No local patching, no retry. A write from someone else between the mutation
//! and the reload shows up in the returned list.
use axum::response::{IntoResponse, Response};
use catalog::{Listing, Status};
use thiserror::Error;
use tracing::warn;

use crate::{error::AppError, repository::Repository};

#[derive(Debug, Error)]
#[error("{context}: {source}")]
pub struct AdminError {
    pub context: &'static str,
    #[source]
    pub source: AppError,
}

impl AdminError {
    fn wrap<E: Into<AppError>>(context: &'static str) -> impl FnOnce(E) -> Self {
        move |error| {
            let source = error.into();
            warn!("{context}: {source}");
            Self { context, source }
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        (self.source.status_code(), self.to_string()).into_response()
    }
}

pub async fn update_status(
    repository: &Repository,
    id: &str,
    status: Status,
) -> Result<Vec<Listing>, AdminError> {
    const CONTEXT: &str = "Error updating submission status";

    repository
        .set_status(id, status)
        .await
        .map_err(AdminError::wrap(CONTEXT))?;

    refresh(repository, CONTEXT).await
}

pub async fn toggle_featured(
    repository: &Repository,
    id: &str,
    featured: bool,
) -> Result<Vec<Listing>, AdminError> {
    const CONTEXT: &str = "Error updating featured status";

    repository
        .set_featured(id, featured)
        .await
        .map_err(AdminError::wrap(CONTEXT))?;

    refresh(repository, CONTEXT).await
}

pub async fn add_test_data(repository: &Repository) -> Result<Vec<Listing>, AdminError> {
    const CONTEXT: &str = "Error adding test entries";

    repository
        .seed_fixtures()
        .await
        .map_err(AdminError::wrap(CONTEXT))?;

    refresh(repository, CONTEXT).await
}

pub async fn list(repository: &Repository) -> Result<Vec<Listing>, AdminError> {
    refresh(repository, "Error fetching submissions").await
}

async fn refresh(
    repository: &Repository,
    context: &'static str,
) -> Result<Vec<Listing>, AdminError> {
    repository
        .fetch_all()
        .await
        .map_err(AdminError::wrap(context))
}
