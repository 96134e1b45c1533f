//! Input validation for person writes.
//!
//! Violations are reported as [`Error::Validation`] naming the field;
//! the write orchestrator runs these checks before touching the store.

use crate::{
  Error, Result,
  person::{CreatePersonInput, IdentificationType, UpdatePersonInput},
};

pub fn validate_create(input: &CreatePersonInput) -> Result<()> {
  validate_required("given_names", &input.given_names)?;
  validate_required("family_names", &input.family_names)?;
  validate_identification(input.identification_type, &input.identification_number)?;
  validate_canton(input.canton_id)?;
  validate_required("address", &input.address)?;
  Ok(())
}

pub fn validate_update(input: &UpdatePersonInput) -> Result<()> {
  validate_required("given_names", &input.given_names)?;
  validate_required("family_names", &input.family_names)?;
  validate_identification(input.identification_type, &input.identification_number)?;
  validate_canton(input.canton_id)?;
  validate_required("address", &input.address)?;
  Ok(())
}

fn validate_required(field: &'static str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::validation(field, "must not be empty"));
  }
  Ok(())
}

fn validate_canton(canton_id: i64) -> Result<()> {
  if canton_id <= 0 {
    return Err(Error::validation("canton_id", "a canton must be selected"));
  }
  Ok(())
}

/// Per-type number format: national-id is exactly 10 digits, tax-id
/// exactly 13 digits, passport 6 to 15 characters.
fn validate_identification(ty: IdentificationType, number: &str) -> Result<()> {
  const FIELD: &str = "identification_number";

  match ty {
    IdentificationType::NationalId => {
      if number.len() != 10 {
        return Err(Error::validation(FIELD, "national-id must be exactly 10 digits"));
      }
      validate_digits(FIELD, number)
    }
    IdentificationType::TaxId => {
      if number.len() != 13 {
        return Err(Error::validation(FIELD, "tax-id must be exactly 13 digits"));
      }
      validate_digits(FIELD, number)
    }
    IdentificationType::Passport => {
      if number.len() < 6 || number.len() > 15 {
        return Err(Error::validation(FIELD, "passport must be 6 to 15 characters"));
      }
      Ok(())
    }
  }
}

fn validate_digits(field: &'static str, number: &str) -> Result<()> {
  if !number.bytes().all(|b| b.is_ascii_digit()) {
    return Err(Error::validation(field, "must contain only digits"));
  }
  Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
