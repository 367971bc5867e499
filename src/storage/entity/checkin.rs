use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

// 主键仅供 sea-orm 使用；实际建表不带主键 (见 `schema::create_checkins_table`)，重复导入会追加行
// day 为标签的最后一个字符，按文本存储
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "checkins")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub business_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub day: String,
    pub num_checkins: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
