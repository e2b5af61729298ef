//! `SeaORM` entity definitions.

pub mod prelude;

pub mod sea_orm_active_enums;
pub mod token_blocklist;
pub mod transactions;
pub mod users;
