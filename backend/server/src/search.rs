//! # Browse & Search
//!
//! Front page listings and the search box over them.
//!
//! ## Loading
//! - Up to `featured_limit` featured + approved listings, newest first
//! - Up to `regular_limit` non-featured + approved listings, newest first
//!
//! ## Search
//! - Runs over the loaded set only, never goes back to the store
//! - Case-insensitive substring on name, description and category, any field may match
//! - The whole query is one substring, no splitting into terms
//! - Blank query gives back the loaded set untouched
//!
//! Listings past the load limits can not be found through search.
use catalog::Listing;
use serde::Serialize;

use crate::repository::Repository;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Browse {
    pub featured: Vec<Listing>,
    pub regular: Vec<Listing>,
}

impl Browse {
    pub async fn load(repository: &Repository, featured_limit: usize, regular_limit: usize) -> Self {
        Self {
            featured: repository.fetch_approved(true, featured_limit).await,
            regular: repository.fetch_approved(false, regular_limit).await,
        }
    }

    pub fn search(&self, query: &str) -> Self {
        Self {
            featured: filter(&self.featured, query),
            regular: filter(&self.regular, query),
        }
    }
}

pub fn filter(listings: &[Listing], query: &str) -> Vec<Listing> {
    if query.trim().is_empty() {
        return listings.to_vec();
    }

    let needle = query.to_lowercase();

    listings
        .iter()
        .filter(|listing| listing.record.matches(&needle))
        .cloned()
        .collect()
}
