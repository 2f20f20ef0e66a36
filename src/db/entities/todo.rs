use sea_orm::entity::prelude::*;

/// One row of the `todo` table. Serializes as the raw row, `due_date` included.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "todo")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub todo: String,
    pub priority: String,
    pub status: String,
    pub category: String,
    pub due_date: String,
}

impl ActiveModelBehavior for ActiveModel {}
