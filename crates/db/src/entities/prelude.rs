//! Entity re-exports.

pub use super::token_blocklist::Entity as TokenBlocklist;
pub use super::transactions::Entity as Transactions;
pub use super::users::Entity as Users;
