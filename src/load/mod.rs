pub mod business;
pub mod checkin;
pub mod review;
pub mod user;

use crate::dataset::{Dataset, DatasetSource};
use crate::error::LoadError;
use crate::storage::schema;
use log::info;
use sea_orm::{DatabaseConnection, TransactionTrait};
use std::fmt;

/// Records read per dataset and rows written per table during one run.
#[derive(Debug, Clone, Default)]
pub struct LoadSummary {
    records: Vec<(Dataset, usize)>,
    tables: Vec<(String, u64)>,
}

impl LoadSummary {
    pub fn record_dataset(&mut self, dataset: Dataset, records: usize) {
        self.records.push((dataset, records));
    }

    pub fn record_table(&mut self, table: &str, rows: u64) {
        self.tables.push((table.to_owned(), rows));
    }

    pub fn records(&self, dataset: Dataset) -> usize {
        self.records
            .iter()
            .filter(|(d, _)| *d == dataset)
            .map(|(_, n)| n)
            .sum()
    }

    pub fn rows(&self, table: &str) -> u64 {
        self.tables
            .iter()
            .filter(|(t, _)| *t == table)
            .map(|(_, n)| n)
            .sum()
    }
}

impl fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let records: Vec<String> = self
            .records
            .iter()
            .map(|(d, n)| format!("{d}={n}"))
            .collect();
        let tables: Vec<String> = self
            .tables
            .iter()
            .map(|(t, n)| format!("{t}={n}"))
            .collect();
        write!(
            f,
            "records read: {}; rows written: {}",
            records.join(", "),
            tables.join(", ")
        )
    }
}

/// Creates the schema and runs the four loaders inside a single transaction.
///
/// The transaction is committed once, after the last pass. Any error drops it
/// uncommitted, which rolls back every table and row staged so far.
pub async fn run(
    db: &DatabaseConnection,
    source: &dyn DatasetSource,
    batch_size: usize,
) -> Result<LoadSummary, LoadError> {
    let txn = db.begin().await?;
    let mut summary = LoadSummary::default();

    schema::create_tables(&txn).await?;

    info!("Populating businesses, neighborhoods, and categories tables.");
    let input = source.open(Dataset::Business).await?;
    business::load(&txn, input, batch_size, &mut summary).await?;

    info!("Populating reviews table.");
    let input = source.open(Dataset::Review).await?;
    review::load(&txn, input, batch_size, &mut summary).await?;

    info!("Populating users and friends tables.");
    let input = source.open(Dataset::User).await?;
    user::load(&txn, input, batch_size, &mut summary).await?;

    info!("Populating checkins table.");
    let input = source.open(Dataset::Checkin).await?;
    checkin::load(&txn, input, batch_size, &mut summary).await?;

    info!("Committing database changes.");
    txn.commit().await?;

    Ok(summary)
}
