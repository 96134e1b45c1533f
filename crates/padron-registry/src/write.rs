//! Person write orchestrator.
//!
//! A write touches up to three tables (person, domicile, phone) plus
//! a geography resolution, against an adapter that executes one
//! statement at a time. The orchestrator therefore runs a read-only
//! phase first (validation, uniqueness guard, country resolution),
//! generates every surrogate key up front, and only then builds a
//! [`WritePlan`] of ordered statements. Nothing is re-queried between
//! steps.
//!
//! On an adapter with transactions the whole plan commits atomically.
//! Without them, each statement is its own atomic unit and a failure
//! after the first mutation is reported as [`Error::PartialWrite`]
//! naming the step reached, so the inconsistent rows can be
//! reconciled by hand.

use chrono::Utc;
use padron_core::{
  Error, Result,
  geography::DEFAULT_NATIONALITY,
  person::{
    CreatePersonInput, DeactivationReceipt, DomicileOrigin, PersonStatus,
    PersonView, UpdatePersonInput,
  },
  sql::{SqlAdapter, Statement},
  validation,
};
use uuid::Uuid;

use crate::PersonRegistry;

// ─── Write plan ──────────────────────────────────────────────────────────────

/// An ordered sequence of labelled mutation statements, fully built
/// before the first one runs.
struct WritePlan {
  steps: Vec<(&'static str, Statement)>,
}

impl WritePlan {
  fn new() -> Self { Self { steps: Vec::new() } }

  fn step(&mut self, label: &'static str, statement: Statement) {
    self.steps.push((label, statement));
  }

  async fn execute<S: SqlAdapter>(self, adapter: &S) -> Result<()> {
    if adapter.supports_transactions() {
      let statements = self.steps.into_iter().map(|(_, s)| s).collect();
      adapter.run_transaction(statements).await.map_err(Error::store)?;
      return Ok(());
    }

    for (index, (label, statement)) in self.steps.into_iter().enumerate() {
      if let Err(source) = adapter.run_statement(statement).await {
        if index == 0 {
          // Nothing committed yet; a plain store error.
          return Err(Error::store(source));
        }
        tracing::error!(
          step = label,
          committed_steps = index,
          "write sequence failed mid-flight on a non-transactional \
           backend; earlier statements are already committed"
        );
        return Err(Error::PartialWrite { step: label, source: Box::new(source) });
      }
    }
    Ok(())
  }
}

// ─── Operations ──────────────────────────────────────────────────────────────

impl<S: SqlAdapter> PersonRegistry<S> {
  /// Create a person with its domicile and, when a number is
  /// supplied, a phone. Returns the composed view of the new record.
  pub async fn create_person(&self, input: CreatePersonInput) -> Result<PersonView> {
    validation::validate_create(&input)?;

    if self.identification_taken(&input.identification_number, None).await? {
      return Err(Error::DuplicateIdentification(input.identification_number));
    }

    let country_id = self.resolve_country(input.canton_id).await?;

    let person_id = Uuid::now_v7();
    let domicile_id = Uuid::now_v7();
    let now = Utc::now().to_rfc3339();

    let mut plan = WritePlan::new();

    plan.step(
      "insert person",
      Statement::new(
        "INSERT INTO person (
           id, given_names, family_names, email,
           identification_type, identification_number, status,
           has_disability, family_disability, nationality_id,
           domicile_id, version, created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, NULL, 1, ?11, ?12)",
        vec![
          person_id.into(),
          input.given_names.into(),
          input.family_names.into(),
          input.email.into(),
          input.identification_type.as_str().into(),
          input.identification_number.into(),
          PersonStatus::Active.as_str().into(),
          input.has_disability.into(),
          input.family_disability.into(),
          input.nationality_id.unwrap_or(DEFAULT_NATIONALITY).into(),
          now.clone().into(),
          now.clone().into(),
        ],
      ),
    );

    plan.step(
      "insert domicile",
      Statement::new(
        "INSERT INTO domicile (id, address, canton_id, country_id, person_id, status, origin)
         VALUES (?1, ?2, ?3, ?4, ?5, 'active', ?6)",
        vec![
          domicile_id.into(),
          input.address.into(),
          input.canton_id.into(),
          country_id.into(),
          person_id.into(),
          DomicileOrigin::WithPerson.as_str().into(),
        ],
      ),
    );

    plan.step(
      "link domicile",
      Statement::new(
        "UPDATE person SET domicile_id = ?1, updated_at = ?2 WHERE id = ?3",
        vec![domicile_id.into(), now.into(), person_id.into()],
      ),
    );

    if let Some(number) = normalized_phone(input.phone_number.as_deref()) {
      plan.step(
        "insert phone",
        Statement::new(
          "INSERT INTO phone (id, number, person_id) VALUES (?1, ?2, ?3)",
          vec![Uuid::now_v7().into(), number.into(), person_id.into()],
        ),
      );
    }

    plan.execute(&self.adapter).await?;
    self.get_person(person_id).await
  }

  /// Update a person's editable fields, its domicile, and its phone
  /// in one planned sequence. Returns the composed view.
  pub async fn update_person(
    &self,
    id: Uuid,
    input: UpdatePersonInput,
  ) -> Result<PersonView> {
    validation::validate_update(&input)?;

    if self.identification_taken(&input.identification_number, Some(id)).await? {
      return Err(Error::DuplicateIdentification(input.identification_number));
    }

    self.ensure_person_exists(id).await?;

    // Re-resolved on every update so the domicile's stored country
    // always matches its canton, even when the caller moved it.
    let country_id = self.resolve_country(input.canton_id).await?;
    let now = Utc::now().to_rfc3339();

    let mut plan = WritePlan::new();

    let domicile_id = match input.domicile_id {
      Some(existing) => {
        plan.step(
          "update domicile",
          Statement::new(
            "UPDATE domicile SET address = ?1, canton_id = ?2, country_id = ?3
             WHERE id = ?4",
            vec![
              input.address.into(),
              input.canton_id.into(),
              country_id.into(),
              existing.into(),
            ],
          ),
        );
        existing
      }
      None => {
        let fresh = Uuid::now_v7();
        plan.step(
          "insert domicile",
          Statement::new(
            "INSERT INTO domicile (id, address, canton_id, country_id, person_id, status, origin)
             VALUES (?1, ?2, ?3, ?4, ?5, 'active', ?6)",
            vec![
              fresh.into(),
              input.address.into(),
              input.canton_id.into(),
              country_id.into(),
              id.into(),
              DomicileOrigin::AddedLater.as_str().into(),
            ],
          ),
        );
        fresh
      }
    };

    plan.step(
      "update person",
      Statement::new(
        "UPDATE person SET
           given_names = ?1, family_names = ?2, email = ?3,
           identification_type = ?4, identification_number = ?5,
           status = ?6, has_disability = ?7, family_disability = ?8,
           nationality_id = ?9, domicile_id = ?10,
           version = version + 1, updated_at = ?11
         WHERE id = ?12",
        vec![
          input.given_names.into(),
          input.family_names.into(),
          input.email.into(),
          input.identification_type.as_str().into(),
          input.identification_number.into(),
          input.status.as_str().into(),
          input.has_disability.into(),
          input.family_disability.into(),
          input.nationality_id.unwrap_or(DEFAULT_NATIONALITY).into(),
          domicile_id.into(),
          now.into(),
          id.into(),
        ],
      ),
    );

    match (normalized_phone(input.phone_number.as_deref()), input.phone_id) {
      (Some(number), Some(phone_id)) => plan.step(
        "update phone",
        Statement::new(
          "UPDATE phone SET number = ?1 WHERE id = ?2",
          vec![number.into(), phone_id.into()],
        ),
      ),
      (Some(number), None) => plan.step(
        "insert phone",
        Statement::new(
          "INSERT INTO phone (id, number, person_id) VALUES (?1, ?2, ?3)",
          vec![Uuid::now_v7().into(), number.into(), id.into()],
        ),
      ),
      (None, Some(phone_id)) => plan.step(
        "delete phone",
        Statement::new("DELETE FROM phone WHERE id = ?1", vec![phone_id.into()]),
      ),
      (None, None) => {}
    }

    plan.execute(&self.adapter).await?;
    self.get_person(id).await
  }

  /// Flip a person's status to inactive. The only delete path there
  /// is; the row itself is never removed, and deactivating an already
  /// inactive person succeeds.
  pub async fn deactivate_person(&self, id: Uuid) -> Result<DeactivationReceipt> {
    self.ensure_person_exists(id).await?;

    self
      .adapter
      .run_statement(Statement::new(
        "UPDATE person SET status = ?1, updated_at = ?2 WHERE id = ?3",
        vec![
          PersonStatus::Inactive.as_str().into(),
          Utc::now().to_rfc3339().into(),
          id.into(),
        ],
      ))
      .await
      .map_err(Error::store)?;

    Ok(DeactivationReceipt {
      id,
      note: "person deactivated; the record is retained".into(),
    })
  }

  async fn ensure_person_exists(&self, id: Uuid) -> Result<()> {
    let rows = self
      .adapter
      .run_query(Statement::new(
        "SELECT id FROM person WHERE id = ?1 LIMIT 1",
        vec![id.into()],
      ))
      .await
      .map_err(Error::store)?;

    if rows.is_empty() {
      return Err(Error::NotFound(id));
    }
    Ok(())
  }
}

/// A phone number is "supplied" only when it has non-blank content;
/// anything else counts as cleared.
fn normalized_phone(number: Option<&str>) -> Option<String> {
  let trimmed = number?.trim();
  if trimmed.is_empty() {
    return None;
  }
  Some(trimmed.to_owned())
}
