//! Geography reference data types.
//!
//! Country 1-* Province 1-* Canton. The hierarchy is immutable
//! reference data; the registry only ever reads it.

use serde::{Deserialize, Serialize};

/// Nationality assigned to a person when the caller supplies none.
pub const DEFAULT_NATIONALITY: i64 = 1;

/// An `{id, name}` pair from one of the geography tables, as served
/// by the lookup endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
  pub id:   i64,
  pub name: String,
}
