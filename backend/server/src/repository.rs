//! # Listing Repository
//!
//! Data access between handlers and the store.
//!
//! ## Reads
//! - `fetch_approved` filters on status and featured only, then sorts and truncates in process.
//!   Keeps the store free of a status + featured + createdAt index at the cost of loading every
//!   match. Fine while the directory is small.
//! - `fetch_by_category` lets the store order by `createdAt`. Preferred shape once the dataset grows.
//! - Public reads degrade to an empty list on failure, admin reads surface the error.
//!
//! ## Writes
//! - Submissions always land as pending and not featured.
//! - Status changes follow the transition table in [`Status::next`]. The check reads then writes,
//!   so two admins racing on one listing end up with whichever write lands last.
//! - Nothing moves a listing back to pending, not even a repeat of its current status.
use std::sync::Arc;

use catalog::{
    Listing, ListingRecord, SOFTWARE_COLLECTION, Status, Submission, fixtures::fixtures,
    listing::fields,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::database::{Direction, Document, Fields, Query, Store, StoreError};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Software not found")]
    NotFound,

    #[error("Status cannot be set to {0}")]
    UnsettableStatus(Status),

    #[error("Cannot move listing from {from} to {to}")]
    IllegalTransition { from: Status, to: Status },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of a submission. Never an `Err`: failures carry a message for the submitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmitOutcome {
    fn created(id: String) -> Self {
        Self {
            success: true,
            id: Some(id),
            error: None,
        }
    }

    fn failed(error: String) -> Self {
        Self {
            success: false,
            id: None,
            error: Some(error),
        }
    }
}

#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn Store>,
}

impl Repository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn submit(&self, submission: Submission) -> SubmitOutcome {
        let record = submission.into_record(Utc::now());
        debug!("Prepared submission: {record:?}");

        match self.insert(&record).await {
            Ok(id) => {
                info!("Submission stored as {id}");
                SubmitOutcome::created(id)
            }
            Err(e) => {
                error!("Submission write failed: {e}");
                SubmitOutcome::failed(format!(
                    "Database error: {e}. Please try again or contact support if the problem persists."
                ))
            }
        }
    }

    pub async fn insert(&self, record: &ListingRecord) -> Result<String, StoreError> {
        let fields: Fields = serde_json::from_value(serde_json::to_value(record)?)?;

        self.store.create(SOFTWARE_COLLECTION, fields).await
    }

    /// Newest approved listings with the given featured flag.
    pub async fn fetch_approved(&self, featured: bool, limit: usize) -> Vec<Listing> {
        let query = Query::new()
            .eq(fields::STATUS, Status::Approved.as_str())
            .eq(fields::IS_FEATURED, featured);

        match self.load(&query).await {
            Ok(mut listings) => {
                listings.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
                listings.truncate(limit);

                debug!("Found {} approved listings (featured: {featured})", listings.len());
                listings
            }
            Err(e) => {
                warn!("Failed to fetch approved listings: {e}");
                Vec::new()
            }
        }
    }

    pub async fn fetch_by_category(&self, category: &str) -> Vec<Listing> {
        let query = Query::new()
            .eq(fields::STATUS, Status::Approved.as_str())
            .eq(fields::CATEGORY, category)
            .order_by(fields::CREATED_AT, Direction::Descending);

        self.load(&query).await.unwrap_or_else(|e| {
            warn!("Failed to fetch listings for category {category}: {e}");
            Vec::new()
        })
    }

    /// Every listing, newest first.
    pub async fn fetch_all(&self) -> Result<Vec<Listing>, StoreError> {
        self.load(&Query::new().order_by(fields::CREATED_AT, Direction::Descending))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Listing>, StoreError> {
        Ok(self
            .store
            .get(SOFTWARE_COLLECTION, id)
            .await?
            .and_then(decode))
    }

    /// Listing as the public sees it: absent unless approved.
    pub async fn get_public(&self, id: &str) -> Result<Option<Listing>, StoreError> {
        Ok(self
            .get(id)
            .await?
            .filter(|listing| listing.status().is_public()))
    }

    pub async fn set_status(&self, id: &str, status: Status) -> Result<(), RepositoryError> {
        if status == Status::Pending {
            warn!("Rejected request to set {id} back to {status}");
            return Err(RepositoryError::UnsettableStatus(status));
        }

        let current = self
            .get(id)
            .await?
            .ok_or(RepositoryError::NotFound)?
            .status();

        if current == status {
            debug!("Listing {id} already {status}");
            return Ok(());
        }

        if !current.can_transition_to(status) {
            warn!("Rejected transition of {id} from {current} to {status}");
            return Err(RepositoryError::IllegalTransition {
                from: current,
                to: status,
            });
        }

        self.patch(id, fields::STATUS, Value::from(status.as_str()))
            .await?;
        info!("Listing {id} moved from {current} to {status}");

        Ok(())
    }

    pub async fn set_featured(&self, id: &str, featured: bool) -> Result<(), RepositoryError> {
        self.patch(id, fields::IS_FEATURED, Value::Bool(featured))
            .await?;
        info!("Listing {id} featured: {featured}");

        Ok(())
    }

    /// Inserts the demonstration listings. Running it twice inserts them twice.
    pub async fn seed_fixtures(&self) -> Result<usize, StoreError> {
        let records = fixtures(Utc::now());

        for record in &records {
            self.insert(record).await?;
        }

        info!("Seeded {} fixture listings", records.len());
        Ok(records.len())
    }

    pub async fn has_test_data(&self) -> Result<bool, StoreError> {
        let query = Query::new().eq(fields::IS_TEST_DATA, true);

        Ok(!self
            .store
            .query(SOFTWARE_COLLECTION, &query)
            .await?
            .is_empty())
    }

    async fn patch(&self, id: &str, field: &str, value: Value) -> Result<(), StoreError> {
        let mut patch = Fields::new();
        patch.insert(field.to_string(), value);

        self.store.update(SOFTWARE_COLLECTION, id, patch).await
    }

    async fn load(&self, query: &Query) -> Result<Vec<Listing>, StoreError> {
        Ok(self
            .store
            .query(SOFTWARE_COLLECTION, query)
            .await?
            .into_iter()
            .filter_map(decode)
            .collect())
    }
}

fn decode(document: Document) -> Option<Listing> {
    let id = document.id.clone();

    serde_json::from_value(document.into_value())
        .map_err(|e| warn!("Skipping undecodable listing {id}: {e}"))
        .ok()
}
