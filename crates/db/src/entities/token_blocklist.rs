//! `SeaORM` Entity for token_blocklist table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "token_blocklist")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Hyphenated token id.
    #[sea_orm(unique)]
    pub jti: String,
    pub revoked_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
