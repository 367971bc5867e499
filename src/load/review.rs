use super::LoadSummary;
use crate::dataset::{Dataset, RecordReader, ReviewRecord};
use crate::error::LoadError;
use crate::storage::entity::review;
use crate::storage::RowBatch;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, Set};
use tokio::io::AsyncBufRead;

/// Loads reviews. A later record with the same (business, user, date) key
/// replaces the stars of the earlier one.
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
    let mut reader = RecordReader::new(Dataset::Review, input);
    let mut reviews = RowBatch::new(batch_size).on_conflict(replace_on_key());
    let mut records = 0usize;

    while let Some(record) = reader.next_record::<ReviewRecord>().await? {
        records += 1;
        let row = review::ActiveModel {
            business_id: Set(record.business_id),
            user_id: Set(record.user_id),
            stars: Set(record.stars),
            date: Set(record.date),
        };
        reviews.push(db, row).await?;
    }
    reviews.flush(db).await?;

    summary.record_dataset(Dataset::Review, records);
    summary.record_table(reviews.table(), reviews.written());
    Ok(())
}

fn replace_on_key() -> OnConflict {
    OnConflict::columns([
        review::Column::BusinessId,
        review::Column::UserId,
        review::Column::Date,
    ])
    .update_column(review::Column::Stars)
    .to_owned()
}
