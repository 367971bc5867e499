use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Directed edge: `user1_id` lists `user2_id` as a friend.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "friends")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user1_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user2_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
