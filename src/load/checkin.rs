use super::LoadSummary;
use crate::dataset::{CheckinRecord, Dataset, RecordReader};
use crate::error::LoadError;
use crate::storage::entity::checkin;
use crate::storage::RowBatch;
use sea_orm::{ConnectionTrait, Set};
use tokio::io::AsyncBufRead;

/// Loads check-ins as one row per (business, day) with the summed count.
/// The table has no key, so loading the same data twice doubles the rows.
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
    let mut reader = RecordReader::new(Dataset::Checkin, input);
    let mut checkins = RowBatch::new(batch_size);
    let mut records = 0usize;

    while let Some(record) = reader.next_record::<CheckinRecord>().await? {
        records += 1;
        let line = reader.line();
        let totals = counts_by_day(record.buckets()).map_err(|err| match err {
            BucketError::EmptyLabel => LoadError::EmptyCheckinLabel {
                dataset: Dataset::Checkin,
                line,
            },
            BucketError::Overflow(label) => LoadError::CheckinOverflow {
                dataset: Dataset::Checkin,
                line,
                label: label.to_string(),
            },
        })?;
        for (day, total) in totals {
            let row = checkin::ActiveModel {
                business_id: Set(record.business_id.clone()),
                day: Set(day),
                num_checkins: Set(total),
            };
            checkins.push(db, row).await?;
        }
    }
    checkins.flush(db).await?;

    summary.record_dataset(Dataset::Checkin, records);
    summary.record_table(checkins.table(), checkins.written());
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketError<'a> {
    EmptyLabel,
    /// The running total for this label's day no longer fits in an `i64`.
    Overflow(&'a str),
}

/// Sums bucket counts by the character that ends each label ("13-4" counts
/// toward day "4"). Days appear in the order they are first seen.
pub fn counts_by_day<'a, I>(buckets: I) -> Result<Vec<(String, i64)>, BucketError<'a>>
where
    I: IntoIterator<Item = (&'a str, i64)>,
{
    let mut totals: Vec<(char, i64)> = Vec::new();
    for (label, count) in buckets {
        let day = label.chars().last().ok_or(BucketError::EmptyLabel)?;
        match totals.iter_mut().find(|(d, _)| *d == day) {
            Some((_, total)) => {
                *total = total
                    .checked_add(count)
                    .ok_or(BucketError::Overflow(label))?;
            }
            None => totals.push((day, count)),
        }
    }
    Ok(totals
        .into_iter()
        .map(|(day, total)| (day.to_string(), total))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::entity::Checkin;
    use crate::storage::{establish_connection, schema};
    use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder};

    async fn setup() -> DatabaseConnection {
        let db = establish_connection("sqlite::memory:").await.unwrap();
        schema::create_tables(&db).await.unwrap();
        db
    }

    fn days(expected: &[(&str, i64)]) -> Vec<(String, i64)> {
        expected.iter().map(|(d, n)| (d.to_string(), *n)).collect()
    }

    #[test]
    fn sums_by_trailing_day() {
        let totals = counts_by_day([("8-0", 3), ("12-0", 2), ("9-3", 1)]).unwrap();
        assert_eq!(totals, days(&[("0", 5), ("3", 1)]));
    }

    #[test]
    fn keeps_first_seen_order() {
        let totals = counts_by_day([("1-6", 1), ("2-2", 4), ("3-6", 2)]).unwrap();
        assert_eq!(totals, days(&[("6", 3), ("2", 4)]));
    }

    #[test]
    fn follows_label_order_of_the_line() {
        let record: CheckinRecord =
            serde_json::from_str(r#"{"business_id":"b","checkin_info":{"9-3":1,"8-0":3}}"#)
                .unwrap();
        let totals = counts_by_day(record.buckets()).unwrap();
        assert_eq!(totals, days(&[("3", 1), ("0", 3)]));
    }

    #[test]
    fn empty_input_has_no_days() {
        assert!(counts_by_day(Vec::<(&str, i64)>::new()).unwrap().is_empty());
    }

    #[test]
    fn any_trailing_character_is_a_day() {
        let totals = counts_by_day([("8-0", 1), ("noon-x", 2), ("9-x", 4)]).unwrap();
        assert_eq!(totals, days(&[("0", 1), ("x", 6)]));
    }

    #[test]
    fn empty_label_is_rejected() {
        assert_eq!(
            counts_by_day([("8-0", 1), ("", 2)]),
            Err(BucketError::EmptyLabel)
        );
    }

    #[test]
    fn overflowing_total_is_rejected() {
        assert_eq!(
            counts_by_day([("8-0", i64::MAX), ("9-0", 1)]),
            Err(BucketError::Overflow("9-0"))
        );
        let totals = counts_by_day([("8-0", i64::MAX), ("9-1", 1)]).unwrap();
        assert_eq!(totals, days(&[("0", i64::MAX), ("1", 1)]));
    }

    async fn stored_rows(db: &DatabaseConnection) -> Vec<(String, String, i64)> {
        Checkin::find()
            .order_by_asc(checkin::Column::Day)
            .all(db)
            .await
            .unwrap()
            .into_iter()
            .map(|c| (c.business_id, c.day, c.num_checkins))
            .collect()
    }

    #[tokio::test]
    async fn writes_one_row_per_day() {
        let db = setup().await;
        let input = concat!(
            r#"{"business_id":"b1","checkin_info":{"8-0":3,"12-0":2,"9-3":1},"type":"checkin"}"#,
            "\n",
            r#"{"business_id":"b2","checkin_info":{}}"#,
            "\n",
            r#"{"business_id":"b3"}"#,
            "\n",
        );
        let mut summary = LoadSummary::default();
        load(&db, input.as_bytes(), 10, &mut summary).await.unwrap();

        assert_eq!(
            stored_rows(&db).await,
            vec![
                ("b1".to_string(), "0".to_string(), 5),
                ("b1".to_string(), "3".to_string(), 1),
            ]
        );
        assert_eq!(summary.records(Dataset::Checkin), 3);
        assert_eq!(summary.rows("checkins"), 2);
    }

    #[tokio::test]
    async fn non_digit_day_is_stored_as_text() {
        let db = setup().await;
        let input = r#"{"business_id":"b1","checkin_info":{"8-0":3,"9-x":1}}"#;
        load(&db, input.as_bytes(), 10, &mut LoadSummary::default())
            .await
            .unwrap();

        assert_eq!(
            stored_rows(&db).await,
            vec![
                ("b1".to_string(), "0".to_string(), 3),
                ("b1".to_string(), "x".to_string(), 1),
            ]
        );
    }

    #[tokio::test]
    async fn empty_label_reports_line() {
        let db = setup().await;
        let input = concat!(
            r#"{"business_id":"b1","checkin_info":{"8-0":3}}"#,
            "\n",
            r#"{"business_id":"b2","checkin_info":{"":3}}"#,
            "\n",
        );
        let err = load(&db, input.as_bytes(), 10, &mut LoadSummary::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::EmptyCheckinLabel {
                dataset: Dataset::Checkin,
                line: 2
            }
        ));
    }

    #[tokio::test]
    async fn overflow_reports_label_and_line() {
        let db = setup().await;
        let input = format!(
            r#"{{"business_id":"b1","checkin_info":{{"8-0":{},"9-0":1}}}}"#,
            i64::MAX
        );
        let err = load(&db, input.as_bytes(), 10, &mut LoadSummary::default())
            .await
            .unwrap_err();
        match err {
            LoadError::CheckinOverflow { line, label, .. } => {
                assert_eq!(line, 1);
                assert_eq!(label, "9-0");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    // 表没有主键，重复导入会追加而不是合并
    #[tokio::test]
    async fn reloading_duplicates_rows() {
        let db = setup().await;
        let input = r#"{"business_id":"b1","checkin_info":{"8-0":3,"9-3":1}}"#;

        load(&db, input.as_bytes(), 10, &mut LoadSummary::default())
            .await
            .unwrap();
        load(&db, input.as_bytes(), 10, &mut LoadSummary::default())
            .await
            .unwrap();

        assert_eq!(Checkin::find().count(&db).await.unwrap(), 4);
    }
}
