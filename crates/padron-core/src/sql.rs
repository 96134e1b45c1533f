//! The [`SqlAdapter`] trait and the value/row types that cross it.
//!
//! The adapter is the registry's only window onto the relational
//! store: parameterized single statements in, rows or affected-row
//! counts out. Backends that have real transactions expose them
//! through [`SqlAdapter::run_transaction`]; the registry's write
//! orchestrator prefers that path whenever it is available.

use std::future::Future;

use uuid::Uuid;

// ─── Values ──────────────────────────────────────────────────────────────────

/// A value bound to (or read from) a statement parameter slot.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
  Null,
  Integer(i64),
  Real(f64),
  Text(String),
}

impl SqlValue {
  pub fn as_integer(&self) -> Option<i64> {
    match self {
      Self::Integer(i) => Some(*i),
      _ => None,
    }
  }

  pub fn as_text(&self) -> Option<&str> {
    match self {
      Self::Text(s) => Some(s),
      _ => None,
    }
  }

  pub fn is_null(&self) -> bool { matches!(self, Self::Null) }
}

impl From<i64> for SqlValue {
  fn from(v: i64) -> Self { Self::Integer(v) }
}

impl From<bool> for SqlValue {
  fn from(v: bool) -> Self { Self::Integer(v as i64) }
}

impl From<f64> for SqlValue {
  fn from(v: f64) -> Self { Self::Real(v) }
}

impl From<String> for SqlValue {
  fn from(v: String) -> Self { Self::Text(v) }
}

impl From<&str> for SqlValue {
  fn from(v: &str) -> Self { Self::Text(v.to_owned()) }
}

/// UUIDs are stored as their hyphenated text form.
impl From<Uuid> for SqlValue {
  fn from(v: Uuid) -> Self { Self::Text(v.to_string()) }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
  fn from(v: Option<T>) -> Self {
    match v {
      Some(inner) => inner.into(),
      None => Self::Null,
    }
  }
}

// ─── Statements ──────────────────────────────────────────────────────────────

/// One parameterized SQL statement with positional bindings.
#[derive(Debug, Clone)]
pub struct Statement {
  pub sql:    String,
  pub params: Vec<SqlValue>,
}

impl Statement {
  pub fn new(sql: impl Into<String>, params: Vec<SqlValue>) -> Self {
    Self { sql: sql.into(), params }
  }
}

// ─── Rows ────────────────────────────────────────────────────────────────────

/// One result row: ordered `(column name, value)` pairs.
///
/// Column lookup is ASCII-case-insensitive. Different drivers report
/// field names in different casings (the DB2 driver the registry was
/// written against uppercases everything); normalising here means no
/// caller ever has to.
#[derive(Debug, Clone, Default)]
pub struct Row {
  columns: Vec<(String, SqlValue)>,
}

impl Row {
  pub fn new(columns: Vec<(String, SqlValue)>) -> Self { Self { columns } }

  pub fn get(&self, name: &str) -> Option<&SqlValue> {
    self
      .columns
      .iter()
      .find(|(n, _)| n.eq_ignore_ascii_case(name))
      .map(|(_, v)| v)
  }

  /// Text value of `name`, or `None` when absent or NULL.
  pub fn text(&self, name: &str) -> Option<&str> {
    self.get(name).and_then(SqlValue::as_text)
  }

  /// Text value of `name`, with absent and NULL rendered as "".
  pub fn text_or_empty(&self, name: &str) -> String {
    self.text(name).unwrap_or_default().to_owned()
  }

  pub fn integer(&self, name: &str) -> Option<i64> {
    self.get(name).and_then(SqlValue::as_integer)
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a relational store that executes one parameterized
/// statement at a time.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait SqlAdapter: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Execute a SELECT and return every row.
  fn run_query(
    &self,
    statement: Statement,
  ) -> impl Future<Output = Result<Vec<Row>, Self::Error>> + Send + '_;

  /// Execute a single INSERT/UPDATE/DELETE; returns the affected-row
  /// count.
  fn run_statement(
    &self,
    statement: Statement,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Execute several statements as one atomic unit, returning the
  /// total affected-row count. Must only be called when
  /// [`supports_transactions`](Self::supports_transactions) is true;
  /// either every statement commits or none does.
  fn run_transaction(
    &self,
    statements: Vec<Statement>,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Whether this backend can make a multi-statement write atomic.
  fn supports_transactions(&self) -> bool;
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn row_lookup_is_case_insensitive() {
    let row = Row::new(vec![
      ("GIVEN_NAMES".into(), SqlValue::Text("Juan".into())),
      ("version".into(), SqlValue::Integer(3)),
    ]);

    assert_eq!(row.text("given_names"), Some("Juan"));
    assert_eq!(row.text("Given_Names"), Some("Juan"));
    assert_eq!(row.integer("VERSION"), Some(3));
    assert!(row.get("missing").is_none());
  }

  #[test]
  fn text_or_empty_renders_null_and_absent_as_empty() {
    let row = Row::new(vec![("email".into(), SqlValue::Null)]);
    assert_eq!(row.text_or_empty("email"), "");
    assert_eq!(row.text_or_empty("phone_number"), "");
  }

  #[test]
  fn option_converts_to_null() {
    assert_eq!(SqlValue::from(None::<String>), SqlValue::Null);
    assert_eq!(
      SqlValue::from(Some("x")),
      SqlValue::Text("x".into())
    );
  }

  #[test]
  fn uuid_converts_to_hyphenated_text() {
    let id = Uuid::nil();
    assert_eq!(
      SqlValue::from(id),
      SqlValue::Text("00000000-0000-0000-0000-000000000000".into())
    );
  }
}
