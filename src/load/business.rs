use super::LoadSummary;
use crate::dataset::{BusinessRecord, Dataset, RecordReader};
use crate::error::LoadError;
use crate::storage::entity::{business, category, neighborhood};
use crate::storage::RowBatch;
use sea_orm::{ConnectionTrait, Set};
use tokio::io::AsyncBufRead;

/// Loads businesses together with their neighborhood and category tags.
/// Duplicate ids fail the load; nothing here replaces existing rows.
pub async fn load<C, R>(
    db: &C,
    input: R,
    batch_size: usize,
    summary: &mut LoadSummary,
) -> Result<(), LoadError>
where
    C: ConnectionTrait,
    R: AsyncBufRead + Unpin,
{
    let mut reader = RecordReader::new(Dataset::Business, input);
    let mut businesses = RowBatch::new(batch_size);
    let mut neighborhoods = RowBatch::new(batch_size);
    let mut categories = RowBatch::new(batch_size);
    let mut records = 0usize;

    while let Some(record) = reader.next_record::<BusinessRecord>().await? {
        records += 1;
        for name in record.neighborhoods() {
            let row = neighborhood::ActiveModel {
                business_id: Set(record.business_id.clone()),
                neighborhood: Set(name.clone()),
            };
            neighborhoods.push(db, row).await?;
        }
        for name in record.categories() {
            let row = category::ActiveModel {
                business_id: Set(record.business_id.clone()),
                category_name: Set(name.clone()),
            };
            categories.push(db, row).await?;
        }
        businesses.push(db, business_row(record)).await?;
    }

    businesses.flush(db).await?;
    neighborhoods.flush(db).await?;
    categories.flush(db).await?;

    summary.record_dataset(Dataset::Business, records);
    summary.record_table(businesses.table(), businesses.written());
    summary.record_table(neighborhoods.table(), neighborhoods.written());
    summary.record_table(categories.table(), categories.written());
    Ok(())
}

fn business_row(record: BusinessRecord) -> business::ActiveModel {
    business::ActiveModel {
        business_id: Set(record.business_id),
        name: Set(record.name),
        full_address: Set(record.full_address),
        city: Set(record.city),
        state: Set(record.state),
        latitude: Set(record.latitude),
        longitude: Set(record.longitude),
        stars: Set(record.stars),
        review_count: Set(record.review_count),
        open: Set(record.open),
    }
}
