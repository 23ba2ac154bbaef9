//! # Catalog
//!
//! Shared vocabulary of the software directory.
//!
//! ## Overall Data Structures
//!
//! - Listing (**record**): one self-hosted software entry. Stored as a single document in the
//!   `software` collection. Field names are camelCase on the wire and in the store.
//!
//! - Status (**enum**): pending, approved, rejected, disabled. Only approved listings are public.
//!
//! - Featured (**bool**): placement flag, independent of status. Never cleared automatically.
//!
//! - Categories (**fixed list**): id, name, description, display count. The count is metadata,
//!   never recomputed from the store.
//!
//! ## Lifecycle
//! 1. Submission creates the listing as pending, not featured.
//!
//! 2. Admin approves or rejects a pending listing.
//!
//! 3. Admin disables an approved listing.
//!
//! 4. Rejected and disabled are terminal.

pub mod categories;
pub mod fixtures;
pub mod listing;
pub mod timestamp;

pub use categories::{CATEGORIES, Category};
pub use listing::{Listing, ListingRecord, PRICING_OPTIONS, Status, Submission};

/// Collection every listing document lives in.
pub const SOFTWARE_COLLECTION: &str = "software";
