//! SQLite backend for the padron registry.
//!
//! [`SqliteAdapter`] implements [`padron_core::sql::SqlAdapter`] over
//! a single SQLite file. Unlike the store the registry was originally
//! written against, SQLite has real transactions, so multi-statement
//! writes executed through [`SqlAdapter::run_transaction`] are atomic.
//!
//! [`SqlAdapter::run_transaction`]: padron_core::sql::SqlAdapter::run_transaction

mod adapter;
mod error;
pub mod schema;

#[cfg(test)]
mod tests;

pub use adapter::SqliteAdapter;
pub use error::{Error, Result};
