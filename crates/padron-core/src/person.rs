//! Person, domicile, and phone domain types.
//!
//! A person row never dies: deactivation flips [`PersonStatus`] to
//! `Inactive` and leaves everything else in place. The denormalized
//! read model is [`PersonView`], assembled by the registry's read
//! composer from person + phone + domicile + geography joins.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Identification ──────────────────────────────────────────────────────────

/// The closed set of accepted identity documents. The number format
/// each one allows is enforced by `validation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentificationType {
  /// National identity card; exactly 10 digits.
  NationalId,
  /// Passport; 6 to 15 characters.
  Passport,
  /// Tax registry number; exactly 13 digits.
  TaxId,
}

impl IdentificationType {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::NationalId => "national-id",
      Self::Passport => "passport",
      Self::TaxId => "tax-id",
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "national-id" => Some(Self::NationalId),
      "passport" => Some(Self::Passport),
      "tax-id" => Some(Self::TaxId),
      _ => None,
    }
  }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// Lifecycle status of a person record. There is no deleted state.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PersonStatus {
  #[default]
  Active,
  Inactive,
}

impl PersonStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Active => "active",
      Self::Inactive => "inactive",
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "active" => Some(Self::Active),
      "inactive" => Some(Self::Inactive),
      _ => None,
    }
  }

  pub fn is_active(&self) -> bool { matches!(self, Self::Active) }
}

// ─── Domicile origin ─────────────────────────────────────────────────────────

/// How a domicile row came to exist. A person created with an address
/// gets a `WithPerson` domicile; one attached on a later edit is
/// `AddedLater`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DomicileOrigin {
  WithPerson,
  AddedLater,
}

impl DomicileOrigin {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::WithPerson => "with-person",
      Self::AddedLater => "added-later",
    }
  }
}

// ─── Write inputs ────────────────────────────────────────────────────────────

/// Input for creating a person together with its domicile and
/// (optionally) a phone number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePersonInput {
  pub given_names:           String,
  pub family_names:          String,
  #[serde(default)]
  pub email:                 Option<String>,
  pub identification_type:   IdentificationType,
  pub identification_number: String,
  pub canton_id:             i64,
  pub address:               String,
  #[serde(default)]
  pub phone_number:          Option<String>,
  #[serde(default)]
  pub has_disability:        bool,
  #[serde(default)]
  pub family_disability:     bool,
  /// Defaults to [`crate::geography::DEFAULT_NATIONALITY`] when absent.
  #[serde(default)]
  pub nationality_id:        Option<i64>,
}

/// Input for updating a person in place.
///
/// `domicile_id` and `phone_id` are round-tripped from a previously
/// returned [`PersonView`]; when `domicile_id` is absent a fresh
/// domicile is created, and the phone row is inserted, updated, or
/// deleted depending on `phone_number`/`phone_id` (an empty or blank
/// number means "cleared").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePersonInput {
  pub given_names:           String,
  pub family_names:          String,
  #[serde(default)]
  pub email:                 Option<String>,
  pub identification_type:   IdentificationType,
  pub identification_number: String,
  pub canton_id:             i64,
  pub address:               String,
  #[serde(default)]
  pub status:                PersonStatus,
  #[serde(default)]
  pub has_disability:        bool,
  #[serde(default)]
  pub family_disability:     bool,
  #[serde(default)]
  pub nationality_id:        Option<i64>,
  #[serde(default)]
  pub domicile_id:           Option<Uuid>,
  #[serde(default)]
  pub phone_number:          Option<String>,
  #[serde(default)]
  pub phone_id:              Option<Uuid>,
}

// ─── Read model ──────────────────────────────────────────────────────────────

/// The denormalized, display-ready projection of a person joined with
/// its domicile, phone, and geography names. Absent joins render as
/// empty strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonView {
  pub id:                    Uuid,
  /// "family names, given names"
  pub display_name:          String,
  pub given_names:           String,
  pub family_names:          String,
  pub email:                 String,
  pub phone_number:          String,
  pub country:               String,
  pub province:              String,
  pub canton:                String,
  pub address:               String,
  pub identification_type:   IdentificationType,
  pub identification_number: String,
  pub status:                PersonStatus,
  pub has_disability:        bool,
  pub family_disability:     bool,
  pub nationality_id:        i64,
  pub version:               i64,
  pub domicile_id:           Option<Uuid>,
  pub phone_id:              Option<Uuid>,
}

/// Confirmation returned by a deactivation. The row is retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeactivationReceipt {
  pub id:   Uuid,
  pub note: String,
}
