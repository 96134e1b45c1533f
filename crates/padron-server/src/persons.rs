//! Handlers for `/persons` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/persons` | Optional `?limit=<n>`, defaults to 10 |
//! | `POST`   | `/persons` | Body: [`CreatePersonInput`] |
//! | `GET`    | `/persons/:id` | 404 if not found |
//! | `PUT`    | `/persons/:id` | Body: [`UpdatePersonInput`] |
//! | `DELETE` | `/persons/:id` | Deactivates; the row is retained |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use padron_core::{
  person::{
    CreatePersonInput, DeactivationReceipt, PersonView, UpdatePersonInput,
  },
  sql::SqlAdapter,
};
use padron_registry::PersonRegistry;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub limit: Option<u32>,
}

/// `GET /persons[?limit=<n>]`
pub async fn list<S: SqlAdapter>(
  State(registry): State<Arc<PersonRegistry<S>>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<PersonView>>, ApiError> {
  let persons = registry.list_persons(params.limit).await?;
  Ok(Json(persons))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /persons`
pub async fn create<S: SqlAdapter>(
  State(registry): State<Arc<PersonRegistry<S>>>,
  Json(body): Json<CreatePersonInput>,
) -> Result<impl IntoResponse, ApiError> {
  let person = registry.create_person(body).await?;
  Ok((StatusCode::CREATED, Json(person)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /persons/:id`
pub async fn get_one<S: SqlAdapter>(
  State(registry): State<Arc<PersonRegistry<S>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<PersonView>, ApiError> {
  let person = registry.get_person(id).await?;
  Ok(Json(person))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /persons/:id`
pub async fn update<S: SqlAdapter>(
  State(registry): State<Arc<PersonRegistry<S>>>,
  Path(id): Path<Uuid>,
  Json(body): Json<UpdatePersonInput>,
) -> Result<Json<PersonView>, ApiError> {
  let person = registry.update_person(id, body).await?;
  Ok(Json(person))
}

// ─── Deactivate ───────────────────────────────────────────────────────────────

/// `DELETE /persons/:id`
pub async fn deactivate<S: SqlAdapter>(
  State(registry): State<Arc<PersonRegistry<S>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<DeactivationReceipt>, ApiError> {
  let receipt = registry.deactivate_person(id).await?;
  Ok(Json(receipt))
}
