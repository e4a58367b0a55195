//! `SeaORM` Entity for transactions table.
//!
//! Rows are append-only. Deposits and withdrawals store the same account
//! on both sides.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// `DEPOSIT`, `WITHDRAW` or `TRANSFER`.
    #[sea_orm(column_name = "type")]
    pub kind: String,
    pub sender_id: i64,
    pub receiver_id: i64,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount: Decimal,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::SenderId",
        to = "super::accounts::Column::Id"
    )]
    Sender,
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::ReceiverId",
        to = "super::accounts::Column::Id"
    )]
    Receiver,
}

impl ActiveModelBehavior for ActiveModel {}
