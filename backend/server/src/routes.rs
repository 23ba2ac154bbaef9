use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog::{CATEGORIES, Category, Listing, Status};
use serde::Deserialize;
use tracing::info;

use crate::{
    admin::{self, AdminError},
    error::AppError,
    identity::Admin,
    search::Browse,
    state::AppState,
    submission::{SubmissionForm, SubmitResponse},
};

#[derive(Deserialize)]
pub struct BrowseParams {
    q: Option<String>,
}

#[derive(Deserialize)]
pub struct StatusUpdate {
    status: Status,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedUpdate {
    is_featured: bool,
}

pub async fn browse_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BrowseParams>,
) -> Json<Browse> {
    let browse = Browse::load(
        &state.repository,
        state.config.featured_limit,
        state.config.regular_limit,
    )
    .await;

    match params.q {
        Some(query) => Json(browse.search(&query)),
        None => Json(browse),
    }
}

pub async fn listing_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Listing>, AppError> {
    state
        .repository
        .get_public(&id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

pub async fn submit_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SubmissionForm>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitResponse>), AppError> {
    let Json(form) = payload?;
    let (submission, plan) = form.into_submission()?;

    let outcome = state.repository.submit(submission).await;

    match outcome.id {
        Some(id) if outcome.success => {
            info!("Accepted submission {id} on the {plan:?} plan");
            Ok((
                StatusCode::CREATED,
                Json(SubmitResponse {
                    success: true,
                    next: Some(plan.next_step(&id)),
                    id: Some(id),
                    error: None,
                }),
            ))
        }
        _ => Ok((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(SubmitResponse {
                success: false,
                id: None,
                next: None,
                error: Some(outcome.error.unwrap_or_else(|| {
                    "Failed to submit software. Please try again.".to_string()
                })),
            }),
        )),
    }
}

pub async fn categories_handler() -> Json<[Category; 10]> {
    Json(CATEGORIES)
}

pub async fn category_listings_handler(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Json<Vec<Listing>> {
    Json(state.repository.fetch_by_category(&category).await)
}

pub async fn admin_list_handler(
    _: Admin,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Listing>>, AdminError> {
    admin::list(&state.repository).await.map(Json)
}

pub async fn admin_listing_handler(
    _: Admin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Listing>, AppError> {
    state
        .repository
        .get(&id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

pub async fn admin_status_handler(
    _: Admin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<StatusUpdate>, JsonRejection>,
) -> Result<Json<Vec<Listing>>, Response> {
    let Json(update) = payload.map_err(|e| AppError::from(e).into_response())?;

    admin::update_status(&state.repository, &id, update.status)
        .await
        .map(Json)
        .map_err(IntoResponse::into_response)
}

pub async fn admin_featured_handler(
    _: Admin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<FeaturedUpdate>, JsonRejection>,
) -> Result<Json<Vec<Listing>>, Response> {
    let Json(update) = payload.map_err(|e| AppError::from(e).into_response())?;

    admin::toggle_featured(&state.repository, &id, update.is_featured)
        .await
        .map(Json)
        .map_err(IntoResponse::into_response)
}

pub async fn admin_fixtures_handler(
    _: Admin,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Listing>>, AdminError> {
    admin::add_test_data(&state.repository).await.map(Json)
}
