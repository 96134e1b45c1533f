//! Geography resolver and reference-data lookups.

use padron_core::{
  Error, Result,
  geography::NamedRef,
  sql::{Row, SqlAdapter, Statement},
};

use crate::PersonRegistry;

impl<S: SqlAdapter> PersonRegistry<S> {
  /// Resolve the owning country of `canton_id` through the
  /// canton → province → country chain.
  ///
  /// A canton that does not resolve is bad reference data, not a
  /// reason to fail the write: the first-registered country is used
  /// instead and a data-integrity warning is logged. Only a store
  /// with no countries at all is unrecoverable.
  pub(crate) async fn resolve_country(&self, canton_id: i64) -> Result<i64> {
    let rows = self
      .adapter
      .run_query(Statement::new(
        "SELECT p.country_id FROM canton c
         JOIN province p ON p.id = c.province_id
         WHERE c.id = ?1",
        vec![canton_id.into()],
      ))
      .await
      .map_err(Error::store)?;

    if let Some(country_id) = rows.first().and_then(|r| r.integer("country_id")) {
      return Ok(country_id);
    }

    tracing::warn!(
      canton_id,
      "canton does not resolve to a country; falling back to the first registered country"
    );

    let rows = self
      .adapter
      .run_query(Statement::new(
        "SELECT id FROM country ORDER BY id ASC LIMIT 1",
        vec![],
      ))
      .await
      .map_err(Error::store)?;

    rows
      .first()
      .and_then(|r| r.integer("id"))
      .ok_or_else(|| Error::Geography("no country registered".into()))
  }

  // ── Lookups ─────────────────────────────────────────────────────────────

  /// All countries, ordered by name.
  pub async fn list_countries(&self) -> Result<Vec<NamedRef>> {
    self
      .named_refs(Statement::new(
        "SELECT id, name FROM country ORDER BY name",
        vec![],
      ))
      .await
  }

  /// Provinces of one country, ordered by name.
  pub async fn list_provinces(&self, country_id: i64) -> Result<Vec<NamedRef>> {
    self
      .named_refs(Statement::new(
        "SELECT id, name FROM province WHERE country_id = ?1 ORDER BY name",
        vec![country_id.into()],
      ))
      .await
  }

  /// Cantons of one province, ordered by name.
  pub async fn list_cantons(&self, province_id: i64) -> Result<Vec<NamedRef>> {
    self
      .named_refs(Statement::new(
        "SELECT id, name FROM canton WHERE province_id = ?1 ORDER BY name",
        vec![province_id.into()],
      ))
      .await
  }

  async fn named_refs(&self, statement: Statement) -> Result<Vec<NamedRef>> {
    let rows = self.adapter.run_query(statement).await.map_err(Error::store)?;
    rows.iter().map(decode_named_ref).collect()
  }
}

fn decode_named_ref(row: &Row) -> Result<NamedRef> {
  let id = row.integer("id").ok_or_else(|| Error::Decode {
    column: "id".into(),
    reason: "expected an integer identifier".into(),
  })?;
  Ok(NamedRef { id, name: row.text_or_empty("name") })
}
