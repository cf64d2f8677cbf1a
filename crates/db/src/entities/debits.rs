//! `SeaORM` Entity for debits table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "debits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub tenant_id: i64,
    pub financial_year: String,
    pub document_number: Option<String>,
    pub loose_minute_number: Option<String>,
    pub receipt_number: Option<String>,
    pub date_paid: Date,
    pub month: String,
    pub item_id: String,
    pub sub_item_description: String,
    pub code: String,
    pub description: String,
    /// Decimal as text.
    pub amount: String,
    pub supplier_name: String,
    pub position: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tenants::Entity",
        from = "Column::TenantId",
        to = "super::tenants::Column::Id",
        on_delete = "Cascade"
    )]
    Tenants,
}

impl Related<super::tenants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
