//! `SeaORM` Entity for tenants table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tenants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub school_name: String,
    #[sea_orm(unique)]
    pub username: String,
    pub is_active: bool,
    pub is_locked: bool,
    pub subscription_status: String,
    pub subscription_start: Option<Date>,
    pub subscription_end: Option<Date>,
    pub last_access_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::budget_lines::Entity")]
    BudgetLines,
    #[sea_orm(has_many = "super::credits::Entity")]
    Credits,
    #[sea_orm(has_many = "super::debits::Entity")]
    Debits,
}

impl Related<super::budget_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BudgetLines.def()
    }
}

impl Related<super::credits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Credits.def()
    }
}

impl Related<super::debits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Debits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
