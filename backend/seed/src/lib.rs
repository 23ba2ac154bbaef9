//! # Fixture Seeding
//!
//! Loads the demonstration listings into a store so the directory has something to show.
//!
//! ## Steps
//! 1. Connect to the store named by the url, `memory` or `redis://...`.
//!
//! 2. With `--if-empty`, stop when rows marked `isTestData` already exist.
//!
//! 3. Build the fixture rows dated against now, so ordering by `createdAt` is exercised.
//!
//! 4. Insert them one by one. A failed insert stops the run; rows already written stay.
//!
//! ## Notes
//! - Without `--if-empty` every run adds another full set of rows.
use catalog::fixtures::fixtures;
use chrono::Utc;
use directory::{database::connect, repository::Repository};
use indicatif::{ProgressBar, ProgressStyle};

pub async fn seed(store_url: &str, if_empty: bool) -> anyhow::Result<usize> {
    let repository = Repository::new(connect(store_url).await?);

    if if_empty && repository.has_test_data().await? {
        println!("Test data already present. Exiting.");
        return Ok(0);
    }

    insert_fixtures(&repository).await
}

pub async fn insert_fixtures(repository: &Repository) -> anyhow::Result<usize> {
    let records = fixtures(Utc::now());

    let pb = ProgressBar::new(records.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )?
        .progress_chars("=> "),
    );

    let mut inserted = 0;

    for record in &records {
        let id = repository.insert(record).await?;
        pb.set_message(format!("{} -> {id}", record.name));

        inserted += 1;
        pb.inc(1);
    }

    pb.finish_with_message("Done");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use directory::database::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_insert_fixtures() {
        let repository = Repository::new(Arc::new(MemoryStore::new()));

        assert_eq!(insert_fixtures(&repository).await.unwrap(), 12);
        assert!(repository.has_test_data().await.unwrap());
        assert_eq!(repository.fetch_approved(true, 3).await.len(), 3);
    }

    #[tokio::test]
    async fn test_seed_memory_store() {
        assert_eq!(seed("memory", false).await.unwrap(), 12);
        // fresh store per connect, so if_empty still seeds
        assert_eq!(seed("memory", true).await.unwrap(), 12);
    }

    #[tokio::test]
    async fn test_seed_unknown_store() {
        assert!(seed("mysql://localhost", false).await.is_err());
    }
}
