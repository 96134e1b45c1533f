//! Error taxonomy for the padron registry.
//!
//! The first two variants are rejected before any mutation is issued.
//! [`Error::PartialWrite`] is the severe class: it can only occur on a
//! backend without transactions, after at least one statement of a
//! multi-statement write sequence has already committed.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid {field}: {reason}")]
  Validation {
    field:  &'static str,
    reason: String,
  },

  #[error("identification number {0} is already registered")]
  DuplicateIdentification(String),

  #[error("person not found: {0}")]
  NotFound(Uuid),

  /// Geography reference data is unusable even for the fallback
  /// (no country registered at all). Broken canton chains are not an
  /// error; they resolve to the default country and are logged.
  #[error("geography reference data unavailable: {0}")]
  Geography(String),

  /// A stored value could not be decoded into its domain type.
  #[error("malformed stored value in column {column}: {reason}")]
  Decode {
    column: String,
    reason: String,
  },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// A write sequence failed after its first statement committed on a
  /// non-transactional backend. `step` names the statement that
  /// failed so the inconsistent rows can be reconciled by hand.
  #[error("write sequence failed at step {step:?}, earlier steps already committed: {source}")]
  PartialWrite {
    step:   &'static str,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
}

impl Error {
  pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
    Self::Validation { field, reason: reason.into() }
  }

  /// Wrap an adapter-level failure.
  pub fn store<E>(source: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(source))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
