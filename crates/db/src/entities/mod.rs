//! `SeaORM` entity definitions.

pub mod accounts;
pub mod token_blocklist;
pub mod transactions;
pub mod users;

pub mod prelude {
    //! Entity aliases.
    pub use super::accounts::Entity as Accounts;
    pub use super::token_blocklist::Entity as TokenBlocklist;
    pub use super::transactions::Entity as Transactions;
    pub use super::users::Entity as Users;
}
