//! # Demonstration Listings
//!
//! Spans every status and featured combination so the browse view, the category view and the
//! admin dashboard all have something to show.
//!
//! - 3 featured + approved
//! - 6 regular + approved
//! - 1 pending, 1 rejected, 1 disabled
//!
//! Each row is dated relative to the seeding time so ordering by `createdAt` is exercised.
//! Rows carry `isTestData` so they can be told apart from real submissions.
use chrono::{DateTime, Duration, Utc};

use crate::listing::{ListingRecord, Status};

pub const FIXTURE_EMAIL: &str = "test@example.com";

struct Fixture {
    name: &'static str,
    description: &'static str,
    category: &'static str,
    website: &'static str,
    pricing: &'static str,
    status: Status,
    is_featured: bool,
    days_ago: i64,
}

const FIXTURES: [Fixture; 12] = [
    Fixture {
        name: "Gitea",
        description: "A painless self-hosted Git service written in Go. Perfect for teams who want to host their own GitHub-like service.",
        category: "development",
        website: "https://gitea.io",
        pricing: "Free / Open Source",
        status: Status::Approved,
        is_featured: true,
        days_ago: 2,
    },
    Fixture {
        name: "Nextcloud",
        description: "Safe home for all your data - community-driven, free & open source. A self-hosted productivity platform with file sharing, collaboration tools, and more.",
        category: "backup",
        website: "https://nextcloud.com",
        pricing: "Free / Enterprise",
        status: Status::Approved,
        is_featured: true,
        days_ago: 3,
    },
    Fixture {
        name: "Grafana",
        description: "The open and composable observability and data visualization platform. Visualize metrics, logs, and traces from multiple sources.",
        category: "monitoring",
        website: "https://grafana.com",
        pricing: "Free / Cloud",
        status: Status::Approved,
        is_featured: true,
        days_ago: 4,
    },
    Fixture {
        name: "WordPress",
        description: "The world's most popular website builder and CMS. Create any type of website with a rich plugin ecosystem.",
        category: "cms",
        website: "https://wordpress.org",
        pricing: "Free",
        status: Status::Approved,
        is_featured: false,
        days_ago: 1,
    },
    Fixture {
        name: "PostgreSQL",
        description: "The world's most advanced open source database. Powerful, reliable, and feature-rich relational database.",
        category: "database",
        website: "https://postgresql.org",
        pricing: "Free",
        status: Status::Approved,
        is_featured: false,
        days_ago: 5,
    },
    Fixture {
        name: "Mattermost",
        description: "Open source platform for secure collaboration. A self-hosted alternative to Slack with enterprise features.",
        category: "communication",
        website: "https://mattermost.com",
        pricing: "Free / Enterprise",
        status: Status::Approved,
        is_featured: false,
        days_ago: 6,
    },
    Fixture {
        name: "Prometheus",
        description: "An open-source monitoring system with a dimensional data model, flexible query language, and alerting.",
        category: "monitoring",
        website: "https://prometheus.io",
        pricing: "Free / Open Source",
        status: Status::Approved,
        is_featured: false,
        days_ago: 7,
    },
    Fixture {
        name: "Jitsi",
        description: "Multi-platform open-source video conferencing. Secure, flexible, and scalable video conferencing solution.",
        category: "communication",
        website: "https://jitsi.org",
        pricing: "Free / Open Source",
        status: Status::Approved,
        is_featured: false,
        days_ago: 8,
    },
    Fixture {
        name: "Drupal",
        description: "Enterprise-grade CMS for ambitious digital experiences. Build complex websites and applications.",
        category: "cms",
        website: "https://drupal.org",
        pricing: "Free / Open Source",
        status: Status::Approved,
        is_featured: false,
        days_ago: 9,
    },
    Fixture {
        name: "Ghost",
        description: "Professional publishing platform. Modern, open source publishing for journalism & blogging.",
        category: "cms",
        website: "https://ghost.org",
        pricing: "Free / Open Source",
        status: Status::Pending,
        is_featured: false,
        days_ago: 0,
    },
    Fixture {
        name: "TestApp",
        description: "A test application submission that was rejected.",
        category: "development",
        website: "https://test.com",
        pricing: "Free",
        status: Status::Rejected,
        is_featured: false,
        days_ago: 10,
    },
    Fixture {
        name: "OldApp",
        description: "A previously approved application that has been disabled.",
        category: "development",
        website: "https://old.com",
        pricing: "Free",
        status: Status::Disabled,
        is_featured: false,
        days_ago: 15,
    },
];

/// Builds the fixture rows dated against `now`.
pub fn fixtures(now: DateTime<Utc>) -> Vec<ListingRecord> {
    FIXTURES
        .iter()
        .map(|fixture| ListingRecord {
            name: fixture.name.to_string(),
            description: fixture.description.to_string(),
            category: fixture.category.to_string(),
            website: fixture.website.to_string(),
            pricing: fixture.pricing.to_string(),
            email: FIXTURE_EMAIL.to_string(),
            status: fixture.status,
            is_featured: fixture.is_featured,
            created_at: now - Duration::days(fixture.days_ago),
            features: None,
            requirements: None,
            documentation: None,
            github: None,
            demo: None,
            screenshots: None,
            is_test_data: Some(true),
        })
        .collect()
}
