use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Document field names shared by queries and partial updates.
pub mod fields {
    pub const ID: &str = "id";
    pub const STATUS: &str = "status";
    pub const IS_FEATURED: &str = "isFeatured";
    pub const CATEGORY: &str = "category";
    pub const CREATED_AT: &str = "createdAt";
    pub const IS_TEST_DATA: &str = "isTestData";
}

pub const PRICING_OPTIONS: [&str; 5] = [
    "Free",
    "Free / Open Source",
    "Free / Enterprise",
    "Paid",
    "Contact for Pricing",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Approved,
    Rejected,
    Disabled,
}

impl Status {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Disabled => "disabled",
        }
    }

    /// Moves an admin may make from this status.
    pub const fn next(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Approved, Self::Rejected],
            Self::Approved => &[Self::Disabled],
            Self::Rejected | Self::Disabled => &[],
        }
    }

    pub fn can_transition_to(self, target: Self) -> bool {
        self.next().contains(&target)
    }

    pub const fn is_public(self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six fields a submitter provides. Website is expected already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    pub description: String,
    pub category: String,
    pub website: String,
    pub pricing: String,
    pub email: String,
}

impl Submission {
    /// Applies creation defaults: pending, not featured, created now.
    pub fn into_record(self, now: DateTime<Utc>) -> ListingRecord {
        ListingRecord {
            name: self.name,
            description: self.description,
            category: self.category,
            website: self.website,
            pricing: self.pricing,
            email: self.email,
            status: Status::Pending,
            is_featured: false,
            created_at: now,
            features: None,
            requirements: None,
            documentation: None,
            github: None,
            demo: None,
            screenshots: None,
            is_test_data: None,
        }
    }
}

/// Stored listing fields, everything except the store-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    pub name: String,
    pub description: String,
    pub category: String,
    pub website: String,
    pub pricing: String,
    pub email: String,
    pub status: Status,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshots: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_test_data: Option<bool>,
}

impl ListingRecord {
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    #[serde(flatten)]
    pub record: ListingRecord,
}

impl Listing {
    pub fn status(&self) -> Status {
        self.record.status
    }

    pub fn is_featured(&self) -> bool {
        self.record.is_featured
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.record.created_at
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn submission() -> Submission {
        Submission {
            name: "Foo".to_string(),
            description: "x".to_string(),
            category: "cms".to_string(),
            website: "https://foo.com".to_string(),
            pricing: "Free".to_string(),
            email: "a@b.com".to_string(),
        }
    }

    #[test]
    fn test_transition_table() {
        assert!(Status::Pending.can_transition_to(Status::Approved));
        assert!(Status::Pending.can_transition_to(Status::Rejected));
        assert!(Status::Approved.can_transition_to(Status::Disabled));

        assert!(!Status::Pending.can_transition_to(Status::Disabled));
        assert!(!Status::Approved.can_transition_to(Status::Rejected));
        assert!(!Status::Disabled.can_transition_to(Status::Approved));
        assert!(!Status::Rejected.can_transition_to(Status::Approved));

        for status in [
            Status::Pending,
            Status::Approved,
            Status::Rejected,
            Status::Disabled,
        ] {
            assert!(!status.can_transition_to(Status::Pending));
        }
    }

    #[test]
    fn test_status_text() {
        assert_eq!(Status::Disabled.to_string(), "disabled");
        assert!(serde_json::from_value::<Status>(json!("Approved")).is_err());
        assert_eq!(
            serde_json::to_value(Status::Rejected).unwrap(),
            json!("rejected")
        );
    }

    #[test]
    fn test_record_defaults() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let record = submission().into_record(now);

        assert_eq!(record.status, Status::Pending);
        assert!(!record.is_featured);
        assert_eq!(record.created_at, now);
        assert_eq!(record.is_test_data, None);
    }

    #[test]
    fn test_record_wire_shape() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let value = serde_json::to_value(submission().into_record(now)).unwrap();

        assert_eq!(
            value,
            json!({
                "name": "Foo",
                "description": "x",
                "category": "cms",
                "website": "https://foo.com",
                "pricing": "Free",
                "email": "a@b.com",
                "status": "pending",
                "isFeatured": false,
                "createdAt": now.timestamp_millis(),
            })
        );
    }

    #[test]
    fn test_listing_from_document() {
        let listing: Listing = serde_json::from_value(json!({
            "id": "abc",
            "name": "Gitea",
            "description": "Git service",
            "category": "development",
            "website": "https://gitea.io",
            "pricing": "Free / Open Source",
            "email": "test@example.com",
            "status": "approved",
            "isFeatured": true,
            "createdAt": "2025-01-02T03:04:05Z",
            "isTestData": true,
            "features": ["Issues", "Pull requests"],
        }))
        .unwrap();

        assert_eq!(listing.id, "abc");
        assert_eq!(listing.status(), Status::Approved);
        assert!(listing.is_featured());
        assert_eq!(listing.record.is_test_data, Some(true));
        assert_eq!(listing.record.features.as_ref().map(Vec::len), Some(2));
        assert_eq!(listing.record.github, None);
    }

    #[test]
    fn test_matches_any_field() {
        let record = submission().into_record(Utc::now());

        assert!(record.matches("foo"));
        assert!(record.matches("cm"));
        assert!(!record.matches("bar"));
    }
}
