//! JSON HTTP API for the padron registry.
//!
//! Exposes an axum [`Router`] backed by a [`PersonRegistry`] over any
//! [`SqlAdapter`]. Auth, TLS, and transport concerns are the caller's
//! responsibility.
//!
//! [`SqlAdapter`]: padron_core::sql::SqlAdapter

pub mod error;
pub mod geography;
pub mod persons;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use padron_core::sql::SqlAdapter;
use padron_registry::PersonRegistry;
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `registry`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<S>(registry: Arc<PersonRegistry<S>>) -> Router<()>
where
  S: SqlAdapter + 'static,
{
  Router::new()
    // Persons
    .route("/persons", get(persons::list::<S>).post(persons::create::<S>))
    .route(
      "/persons/{id}",
      get(persons::get_one::<S>)
        .put(persons::update::<S>)
        .delete(persons::deactivate::<S>),
    )
    // Geography reference data
    .route("/countries", get(geography::countries::<S>))
    .route("/countries/{id}/provinces", get(geography::provinces::<S>))
    .route("/provinces/{id}/cantons", get(geography::cantons::<S>))
    .with_state(registry)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use padron_core::sql::Statement;
  use padron_store_sqlite::SqliteAdapter;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use uuid::Uuid;

  async fn make_registry() -> Arc<PersonRegistry<SqliteAdapter>> {
    let adapter = SqliteAdapter::open_in_memory().await.unwrap();

    let seed = [
      "INSERT INTO country (id, name) VALUES (1, 'Ecuador')",
      "INSERT INTO country (id, name) VALUES (2, 'Colombia')",
      "INSERT INTO province (id, name, country_id) VALUES (2, 'Guayas', 1)",
      "INSERT INTO canton (id, name, province_id) VALUES (7, 'Guayaquil', 2)",
    ];
    for sql in seed {
      adapter.run_statement(Statement::new(sql, vec![])).await.unwrap();
    }

    Arc::new(PersonRegistry::new(adapter))
  }

  async fn request(
    registry: &Arc<PersonRegistry<SqliteAdapter>>,
    method:   &str,
    uri:      &str,
    body:     Option<Value>,
  ) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
      Some(v) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(v.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };

    let resp = api_router(registry.clone()).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
  }

  fn create_body() -> Value {
    json!({
      "given_names":           "Juan",
      "family_names":          "Perez",
      "email":                 "juan@example.com",
      "identification_type":   "national-id",
      "identification_number": "0123456789",
      "canton_id":             7,
      "address":               "Calle Falsa 123",
      "phone_number":          "555-1234",
    })
  }

  // ── Create ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn post_persons_returns_201_with_composed_view() {
    let registry = make_registry().await;

    let (status, body) =
      request(&registry, "POST", "/persons", Some(create_body())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["display_name"], "Perez, Juan");
    assert_eq!(body["country"], "Ecuador");
    assert_eq!(body["canton"], "Guayaquil");
    assert_eq!(body["status"], "active");
    assert_eq!(body["version"], 1);
    assert_eq!(body["phone_number"], "555-1234");
  }

  #[tokio::test]
  async fn post_persons_with_bad_identification_returns_400() {
    let registry = make_registry().await;

    let mut body = create_body();
    body["identification_number"] = json!("12345"); // too short

    let (status, body) = request(&registry, "POST", "/persons", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("identification_number"));
  }

  #[tokio::test]
  async fn post_persons_with_taken_number_returns_409() {
    let registry = make_registry().await;

    let (status, _) =
      request(&registry, "POST", "/persons", Some(create_body())).await;
    assert_eq!(status, StatusCode::CREATED);

    let mut second = create_body();
    second["given_names"] = json!("Pedro");
    let (status, body) = request(&registry, "POST", "/persons", Some(second)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("0123456789"));
  }

  // ── Read ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn get_unknown_person_returns_404() {
    let registry = make_registry().await;

    let (status, body) = request(
      &registry,
      "GET",
      &format!("/persons/{}", Uuid::now_v7()),
      None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
  }

  #[tokio::test]
  async fn list_returns_created_persons() {
    let registry = make_registry().await;
    request(&registry, "POST", "/persons", Some(create_body())).await;

    let (status, body) = request(&registry, "GET", "/persons", None).await;

    assert_eq!(status, StatusCode::OK);
    let persons = body.as_array().unwrap();
    assert_eq!(persons.len(), 1);
    assert_eq!(persons[0]["family_names"], "Perez");
  }

  // ── Update ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn put_persons_updates_in_place() {
    let registry = make_registry().await;

    let (_, created) =
      request(&registry, "POST", "/persons", Some(create_body())).await;
    let id = created["id"].as_str().unwrap().to_string();

    let update = json!({
      "given_names":           "Juan",
      "family_names":          "Perez",
      "email":                 "nuevo@example.com",
      "identification_type":   "national-id",
      "identification_number": "0123456789",
      "canton_id":             7,
      "address":               "Malecon 2000",
      "domicile_id":           created["domicile_id"],
      "phone_number":          "555-9999",
      "phone_id":              created["phone_id"],
    });

    let (status, body) =
      request(&registry, "PUT", &format!("/persons/{id}"), Some(update)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["address"], "Malecon 2000");
    assert_eq!(body["email"], "nuevo@example.com");
    assert_eq!(body["phone_number"], "555-9999");
    assert_eq!(body["version"], 2);
    assert_eq!(body["domicile_id"], created["domicile_id"]);
  }

  // ── Deactivate ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_deactivates_but_record_survives() {
    let registry = make_registry().await;

    let (_, created) =
      request(&registry, "POST", "/persons", Some(create_body())).await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, receipt) =
      request(&registry, "DELETE", &format!("/persons/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(receipt["id"], created["id"]);

    let (status, body) =
      request(&registry, "GET", &format!("/persons/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "inactive");
  }

  // ── Geography ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn geography_lookups_chain() {
    let registry = make_registry().await;

    let (status, countries) = request(&registry, "GET", "/countries", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = countries
      .as_array()
      .unwrap()
      .iter()
      .map(|c| c["name"].as_str().unwrap())
      .collect();
    assert_eq!(names, ["Colombia", "Ecuador"]);

    let (_, provinces) =
      request(&registry, "GET", "/countries/1/provinces", None).await;
    assert_eq!(provinces.as_array().unwrap().len(), 1);
    assert_eq!(provinces[0]["name"], "Guayas");

    let (_, cantons) =
      request(&registry, "GET", "/provinces/2/cantons", None).await;
    assert_eq!(cantons[0]["name"], "Guayaquil");
  }
}
