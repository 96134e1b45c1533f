//! Handlers for geography reference-data lookups.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use padron_core::{geography::NamedRef, sql::SqlAdapter};
use padron_registry::PersonRegistry;

use crate::error::ApiError;

/// `GET /countries`
pub async fn countries<S: SqlAdapter>(
  State(registry): State<Arc<PersonRegistry<S>>>,
) -> Result<Json<Vec<NamedRef>>, ApiError> {
  let countries = registry.list_countries().await?;
  Ok(Json(countries))
}

/// `GET /countries/:id/provinces`
pub async fn provinces<S: SqlAdapter>(
  State(registry): State<Arc<PersonRegistry<S>>>,
  Path(country_id): Path<i64>,
) -> Result<Json<Vec<NamedRef>>, ApiError> {
  let provinces = registry.list_provinces(country_id).await?;
  Ok(Json(provinces))
}

/// `GET /provinces/:id/cantons`
pub async fn cantons<S: SqlAdapter>(
  State(registry): State<Arc<PersonRegistry<S>>>,
  Path(province_id): Path<i64>,
) -> Result<Json<Vec<NamedRef>>, ApiError> {
  let cantons = registry.list_cantons(province_id).await?;
  Ok(Json(cantons))
}
