//! Integration tests for `SqliteAdapter` against an in-memory database.

use padron_core::sql::{SqlAdapter, SqlValue, Statement};
use uuid::Uuid;

use crate::SqliteAdapter;

async fn adapter() -> SqliteAdapter {
  SqliteAdapter::open_in_memory()
    .await
    .expect("in-memory adapter")
}

fn insert_country(id: i64, name: &str) -> Statement {
  Statement::new(
    "INSERT INTO country (id, name) VALUES (?1, ?2)",
    vec![id.into(), name.into()],
  )
}

// ─── Statements and queries ──────────────────────────────────────────────────

#[tokio::test]
async fn statement_and_query_round_trip() {
  let a = adapter().await;

  let affected = a
    .run_statement(insert_country(1, "Ecuador"))
    .await
    .unwrap();
  assert_eq!(affected, 1);

  let rows = a
    .run_query(Statement::new(
      "SELECT id, name FROM country WHERE id = ?1",
      vec![1i64.into()],
    ))
    .await
    .unwrap();

  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].integer("id"), Some(1));
  assert_eq!(rows[0].text("name"), Some("Ecuador"));
}

#[tokio::test]
async fn column_lookup_survives_uppercase_aliases() {
  let a = adapter().await;
  a.run_statement(insert_country(1, "Ecuador")).await.unwrap();

  let rows = a
    .run_query(Statement::new(
      "SELECT id AS ID, name AS NAME FROM country",
      vec![],
    ))
    .await
    .unwrap();

  // The registry reads lowercase names regardless of driver casing.
  assert_eq!(rows[0].integer("id"), Some(1));
  assert_eq!(rows[0].text("name"), Some("Ecuador"));
}

#[tokio::test]
async fn null_columns_decode_as_null() {
  let a = adapter().await;

  let person_id = Uuid::now_v7();
  a.run_statement(Statement::new(
    "INSERT INTO person (id, given_names, family_names, email,
                         identification_type, identification_number,
                         status, nationality_id, created_at, updated_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    vec![
      person_id.into(),
      "Ana".into(),
      "Mora".into(),
      SqlValue::Null,
      "passport".into(),
      "XY12345".into(),
      "active".into(),
      1i64.into(),
      "2026-01-01T00:00:00Z".into(),
      "2026-01-01T00:00:00Z".into(),
    ],
  ))
  .await
  .unwrap();

  let rows = a
    .run_query(Statement::new(
      "SELECT email, domicile_id FROM person WHERE id = ?1",
      vec![person_id.into()],
    ))
    .await
    .unwrap();

  assert!(rows[0].get("email").unwrap().is_null());
  assert_eq!(rows[0].text_or_empty("email"), "");
  assert!(rows[0].get("domicile_id").unwrap().is_null());
}

#[tokio::test]
async fn query_with_no_matches_returns_empty() {
  let a = adapter().await;
  let rows = a
    .run_query(Statement::new(
      "SELECT id, name FROM country WHERE id = ?1",
      vec![42i64.into()],
    ))
    .await
    .unwrap();
  assert!(rows.is_empty());
}

// ─── Transactions ────────────────────────────────────────────────────────────

#[tokio::test]
async fn transaction_commits_all_statements() {
  let a = adapter().await;

  let affected = a
    .run_transaction(vec![
      insert_country(1, "Ecuador"),
      insert_country(2, "Colombia"),
    ])
    .await
    .unwrap();
  assert_eq!(affected, 2);

  let rows = a
    .run_query(Statement::new("SELECT id FROM country", vec![]))
    .await
    .unwrap();
  assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn failed_transaction_leaves_no_rows() {
  let a = adapter().await;

  // Second statement violates the primary key; the first must roll
  // back with it.
  let result = a
    .run_transaction(vec![
      insert_country(1, "Ecuador"),
      insert_country(1, "Duplicate"),
    ])
    .await;
  assert!(result.is_err());

  let rows = a
    .run_query(Statement::new("SELECT id FROM country", vec![]))
    .await
    .unwrap();
  assert!(rows.is_empty());
}

#[tokio::test]
async fn adapter_reports_transaction_support() {
  let a = adapter().await;
  assert!(a.supports_transactions());
}
