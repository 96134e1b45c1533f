//! Person read composer.
//!
//! Joins person, phone, domicile, canton, province, and country into
//! the denormalized [`PersonView`]. Left joins throughout: a person
//! without an address or phone still appears, with those fields
//! rendered empty.

use padron_core::{
  Error, Result,
  person::{IdentificationType, PersonStatus, PersonView},
  sql::{Row, SqlAdapter, Statement},
};
use uuid::Uuid;

use crate::PersonRegistry;

/// Rows returned by `list_persons` when the caller gives no limit.
pub const DEFAULT_LIST_LIMIT: u32 = 10;

const VIEW_COLUMNS: &str = "
  p.id, p.given_names, p.family_names, p.email,
  p.identification_type, p.identification_number, p.status,
  p.has_disability, p.family_disability, p.nationality_id,
  p.version, p.domicile_id,
  t.id    AS phone_id,
  t.number AS phone_number,
  d.address,
  ca.name AS canton_name,
  pr.name AS province_name,
  co.name AS country_name";

const VIEW_JOINS: &str = "
  FROM person p
  LEFT JOIN phone    t  ON t.person_id = p.id
  LEFT JOIN domicile d  ON d.id  = p.domicile_id
  LEFT JOIN canton   ca ON ca.id = d.canton_id
  LEFT JOIN province pr ON pr.id = ca.province_id
  LEFT JOIN country  co ON co.id = d.country_id";

impl<S: SqlAdapter> PersonRegistry<S> {
  /// The composed view of one person, or [`Error::NotFound`].
  pub async fn get_person(&self, id: Uuid) -> Result<PersonView> {
    let rows = self
      .adapter
      .run_query(Statement::new(
        format!("SELECT {VIEW_COLUMNS} {VIEW_JOINS} WHERE p.id = ?1"),
        vec![id.into()],
      ))
      .await
      .map_err(Error::store)?;

    match rows.first() {
      Some(row) => compose(row),
      None => Err(Error::NotFound(id)),
    }
  }

  /// The most recently created persons, newest first, capped at
  /// `limit` (default 10). Person ids are time-ordered, so descending
  /// id order is creation order. Records without a family name are
  /// never listed.
  pub async fn list_persons(&self, limit: Option<u32>) -> Result<Vec<PersonView>> {
    let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT);
    let rows = self
      .adapter
      .run_query(Statement::new(
        format!(
          "SELECT {VIEW_COLUMNS} {VIEW_JOINS}
           WHERE p.family_names <> ''
           ORDER BY p.id DESC
           LIMIT ?1"
        ),
        vec![i64::from(limit).into()],
      ))
      .await
      .map_err(Error::store)?;

    rows.iter().map(compose).collect()
  }
}

// ─── Row decoding ────────────────────────────────────────────────────────────

fn compose(row: &Row) -> Result<PersonView> {
  let given_names = row.text_or_empty("given_names");
  let family_names = row.text_or_empty("family_names");

  Ok(PersonView {
    id:                    required_uuid(row, "id")?,
    display_name:          format!("{family_names}, {given_names}"),
    given_names,
    family_names,
    email:                 row.text_or_empty("email"),
    phone_number:          row.text_or_empty("phone_number"),
    country:               row.text_or_empty("country_name"),
    province:              row.text_or_empty("province_name"),
    canton:                row.text_or_empty("canton_name"),
    address:               row.text_or_empty("address"),
    identification_type:   decode_identification_type(row)?,
    identification_number: row.text_or_empty("identification_number"),
    status:                decode_status(row)?,
    has_disability:        row.integer("has_disability").unwrap_or(0) != 0,
    family_disability:     row.integer("family_disability").unwrap_or(0) != 0,
    nationality_id:        row.integer("nationality_id").unwrap_or(0),
    version:               row.integer("version").unwrap_or(0),
    domicile_id:           optional_uuid(row, "domicile_id")?,
    phone_id:              optional_uuid(row, "phone_id")?,
  })
}

fn decode_identification_type(row: &Row) -> Result<IdentificationType> {
  let raw = row.text_or_empty("identification_type");
  IdentificationType::parse(&raw).ok_or_else(|| Error::Decode {
    column: "identification_type".into(),
    reason: format!("unknown identification type {raw:?}"),
  })
}

fn decode_status(row: &Row) -> Result<PersonStatus> {
  let raw = row.text_or_empty("status");
  PersonStatus::parse(&raw).ok_or_else(|| Error::Decode {
    column: "status".into(),
    reason: format!("unknown status {raw:?}"),
  })
}

fn required_uuid(row: &Row, column: &str) -> Result<Uuid> {
  match row.text(column) {
    Some(s) => Uuid::parse_str(s).map_err(|e| Error::Decode {
      column: column.into(),
      reason: e.to_string(),
    }),
    None => Err(Error::Decode {
      column: column.into(),
      reason: "expected a uuid, found NULL".into(),
    }),
  }
}

fn optional_uuid(row: &Row, column: &str) -> Result<Option<Uuid>> {
  match row.text(column) {
    Some(s) => Uuid::parse_str(s).map(Some).map_err(|e| Error::Decode {
      column: column.into(),
      reason: e.to_string(),
    }),
    None => Ok(None),
  }
}
