//! Identity uniqueness guard.
//!
//! The first gate of every write: no mutation is issued while another
//! record holds the same identification number. Inactive records
//! count too: a deactivated person keeps their number reserved.

use padron_core::{
  Error, Result,
  sql::{SqlAdapter, Statement},
};
use uuid::Uuid;

use crate::PersonRegistry;

impl<S: SqlAdapter> PersonRegistry<S> {
  /// True when any record *other* than `exclude` holds `number`,
  /// regardless of status. On create `exclude` is `None`; on update
  /// it is the record being edited, so a person can keep their own
  /// number.
  pub(crate) async fn identification_taken(
    &self,
    number: &str,
    exclude: Option<Uuid>,
  ) -> Result<bool> {
    let statement = match exclude {
      Some(id) => Statement::new(
        "SELECT id FROM person
         WHERE identification_number = ?1 AND id <> ?2
         LIMIT 1",
        vec![number.into(), id.into()],
      ),
      None => Statement::new(
        "SELECT id FROM person WHERE identification_number = ?1 LIMIT 1",
        vec![number.into()],
      ),
    };

    let rows = self.adapter.run_query(statement).await.map_err(Error::store)?;
    Ok(!rows.is_empty())
  }
}
