//! [`SqliteAdapter`], the SQLite implementation of [`SqlAdapter`].

use std::path::Path;

use padron_core::sql::{Row, SqlAdapter, SqlValue, Statement};
use rusqlite::{params_from_iter, types::Value};

use crate::{Error, Result, schema::SCHEMA};

// ─── Value conversion ────────────────────────────────────────────────────────

fn encode_value(v: &SqlValue) -> Value {
  match v {
    SqlValue::Null => Value::Null,
    SqlValue::Integer(i) => Value::Integer(*i),
    SqlValue::Real(f) => Value::Real(*f),
    SqlValue::Text(s) => Value::Text(s.clone()),
  }
}

fn decode_value(v: Value) -> SqlValue {
  match v {
    Value::Null => SqlValue::Null,
    Value::Integer(i) => SqlValue::Integer(i),
    Value::Real(f) => SqlValue::Real(f),
    Value::Text(s) => SqlValue::Text(s),
    Value::Blob(b) => SqlValue::Text(String::from_utf8_lossy(&b).into_owned()),
  }
}

// ─── Adapter ─────────────────────────────────────────────────────────────────

/// A padron store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteAdapter {
  conn: tokio_rusqlite::Connection,
}

impl SqliteAdapter {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let adapter = Self { conn };
    adapter.init_schema().await?;
    Ok(adapter)
  }

  /// Open an in-memory store for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let adapter = Self { conn };
    adapter.init_schema().await?;
    Ok(adapter)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── SqlAdapter impl ─────────────────────────────────────────────────────────

impl SqlAdapter for SqliteAdapter {
  type Error = Error;

  async fn run_query(&self, statement: Statement) -> Result<Vec<Row>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&statement.sql)?;
        let names: Vec<String> =
          stmt.column_names().iter().map(|n| n.to_string()).collect();

        let rows = stmt
          .query_map(
            params_from_iter(statement.params.iter().map(encode_value)),
            |row| {
              let mut columns = Vec::with_capacity(names.len());
              for (i, name) in names.iter().enumerate() {
                let value: Value = row.get(i)?;
                columns.push((name.clone(), decode_value(value)));
              }
              Ok(Row::new(columns))
            },
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    Ok(rows)
  }

  async fn run_statement(&self, statement: Statement) -> Result<u64> {
    let affected = self
      .conn
      .call(move |conn| {
        let affected = conn.execute(
          &statement.sql,
          params_from_iter(statement.params.iter().map(encode_value)),
        )?;
        Ok(affected as u64)
      })
      .await?;

    Ok(affected)
  }

  async fn run_transaction(&self, statements: Vec<Statement>) -> Result<u64> {
    let affected = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut affected = 0u64;
        for statement in &statements {
          affected += tx.execute(
            &statement.sql,
            params_from_iter(statement.params.iter().map(encode_value)),
          )? as u64;
        }
        tx.commit()?;
        Ok(affected)
      })
      .await?;

    Ok(affected)
  }

  fn supports_transactions(&self) -> bool { true }
}
