use super::LoadSummary;
use crate::dataset::{Dataset, RecordReader, UserRecord};
use crate::error::LoadError;
use crate::storage::entity::{friend, user};
use crate::storage::RowBatch;
use sea_orm::{ConnectionTrait, Set};
use tokio::io::AsyncBufRead;

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
    let mut reader = RecordReader::new(Dataset::User, input);
    let mut users = RowBatch::new(batch_size);
    let mut friends = RowBatch::new(batch_size);
    let mut records = 0usize;

    while let Some(record) = reader.next_record::<UserRecord>().await? {
        records += 1;
        // 每个好友一条有向边，不补反向边
        for friend_id in record.friends() {
            let row = friend::ActiveModel {
                user1_id: Set(record.user_id.clone()),
                user2_id: Set(friend_id.clone()),
            };
            friends.push(db, row).await?;
        }
        let row = user::ActiveModel {
            user_id: Set(record.user_id),
            name: Set(record.name),
            review_count: Set(record.review_count),
            average_stars: Set(record.average_stars),
            yelping_since: Set(record.yelping_since),
            fans: Set(record.fans),
        };
        users.push(db, row).await?;
    }

    users.flush(db).await?;
    friends.flush(db).await?;

    summary.record_dataset(Dataset::User, records);
    summary.record_table(users.table(), users.written());
    summary.record_table(friends.table(), friends.written());
    Ok(())
}
