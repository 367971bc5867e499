use crate::error::LoadError;
use log::debug;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityName, EntityTrait, IntoActiveModel};

/// Buffers rows for one table and writes them with multi-row inserts.
pub struct RowBatch<A: ActiveModelTrait> {
    table: String,
    rows: Vec<A>,
    capacity: usize,
    on_conflict: Option<OnConflict>,
    written: u64,
}

impl<A> RowBatch<A>
where
    A: ActiveModelTrait + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
{
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            table: <A::Entity as Default>::default().table_name().to_owned(),
            rows: Vec::with_capacity(capacity),
            capacity,
            on_conflict: None,
            written: 0,
        }
    }

    /// Resolve key collisions with this clause instead of failing.
    pub fn on_conflict(mut self, on_conflict: OnConflict) -> Self {
        self.on_conflict = Some(on_conflict);
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Rows affected so far by flushed inserts.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub async fn push<C: ConnectionTrait>(&mut self, db: &C, row: A) -> Result<(), LoadError> {
        self.rows.push(row);
        if self.rows.len() >= self.capacity {
            self.flush(db).await?;
        }
        Ok(())
    }

    pub async fn flush<C: ConnectionTrait>(&mut self, db: &C) -> Result<(), LoadError> {
        if self.rows.is_empty() {
            return Ok(());
        }
        let rows = std::mem::replace(&mut self.rows, Vec::with_capacity(self.capacity));
        let count = rows.len();

        let mut insert = <A::Entity as EntityTrait>::insert_many(rows);
        if let Some(on_conflict) = &self.on_conflict {
            insert = insert.on_conflict(on_conflict.clone());
        }
        let affected = insert
            .exec_without_returning(db)
            .await
            .map_err(|e| LoadError::from_write(self.table(), e))?;

        debug!("{}: flushed {} rows", self.table(), count);
        self.written += affected;
        Ok(())
    }
}
