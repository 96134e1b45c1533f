//! Person write/read orchestration over a generic [`SqlAdapter`].
//!
//! The registry sequences the coordinated writes a person record
//! needs (person row, domicile row, phone row, geography resolution)
//! on top of a store that only executes one statement at a time.
//! Writes are planned up front (all surrogate keys are generated
//! before the first statement runs) and executed atomically when the
//! adapter has transactions, or step by step with explicit
//! partial-write reporting when it does not.
//!
//! [`SqlAdapter`]: padron_core::sql::SqlAdapter

mod geography;
mod identity;
mod read;
mod write;


use padron_core::sql::SqlAdapter;

/// The record-management layer: create, update, deactivate, and read
/// person records through any [`SqlAdapter`] backend.
#[derive(Clone)]
pub struct PersonRegistry<S> {
  adapter: S,
}

impl<S: SqlAdapter> PersonRegistry<S> {
  pub fn new(adapter: S) -> Self { Self { adapter } }
}
