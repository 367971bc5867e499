use crate::storage::entity::{
    checkin, Business, Category, Checkin, Friend, Neighborhood, Review, User,
};
use log::info;
use sea_orm::sea_query::{ColumnDef, Table, TableCreateStatement};
use sea_orm::{ConnectionTrait, DbErr, EntityName, EntityTrait, Schema};

/// Creates the seven tables. Fails if any of them already exists.
pub async fn create_tables<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let schema = Schema::new(db.get_database_backend());

    create_from_entity(db, &schema, Business).await?;
    create_from_entity(db, &schema, Neighborhood).await?;
    create_from_entity(db, &schema, Category).await?;
    create_from_entity(db, &schema, Review).await?;
    create_from_entity(db, &schema, User).await?;
    create_from_entity(db, &schema, Friend).await?;

    info!("Creating {} table.", Checkin.table_name());
    let builder = db.get_database_backend();
    db.execute(builder.build(&create_checkins_table())).await?;

    Ok(())
}

async fn create_from_entity<C, E>(db: &C, schema: &Schema, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    info!("Creating {} table.", entity.table_name());
    let builder = db.get_database_backend();
    let stmt = builder.build(&schema.create_table_from_entity(entity));
    db.execute(stmt).await?;
    Ok(())
}

// 该表没有主键，需手动建表
fn create_checkins_table() -> TableCreateStatement {
    Table::create()
        .table(Checkin)
        .col(
            ColumnDef::new(checkin::Column::BusinessId)
                .string()
                .not_null(),
        )
        .col(ColumnDef::new(checkin::Column::Day).string().not_null())
        .col(
            ColumnDef::new(checkin::Column::NumCheckins)
                .big_integer()
                .not_null(),
        )
        .to_owned()
}
