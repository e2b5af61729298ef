//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod report;
pub mod token_blocklist;
pub mod transaction;
pub mod user;

pub use report::{ReportError, ReportRepository};
pub use token_blocklist::TokenBlocklistRepository;
pub use transaction::{
    CreateTransactionInput, TransactionError, TransactionFilter, TransactionRepository,
    UpdateTransactionInput,
};
pub use user::{UserError, UserRepository};
