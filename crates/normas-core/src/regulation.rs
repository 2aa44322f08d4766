//! Regulation types: the records catalogued by the registry.
//!
//! A regulation ("normativa") is a law, resolution, or decree. It is owned by
//! the store once inserted: the store assigns its registration number and
//! derives its issuing body from the jurisdiction.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{Error, Result, jurisdiction::Jurisdiction};

/// Store-assigned key of a regulation (`Normativa.Nro_Registro`).
pub type RegistrationNumber = i64;

// ─── Enumerations ────────────────────────────────────────────────────────────

/// The kind of legal instrument.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum RegulationKind {
  Ley,
  #[serde(rename = "Resolución")]
  #[strum(to_string = "Resolución", serialize = "Resolucion")]
  Resolucion,
  Decreto,
}

impl RegulationKind {
  /// Text stored in `Normativa.Tipo_Normativa`.
  pub fn as_str(self) -> &'static str { self.into() }

  pub fn parse(s: &str) -> Result<Self> {
    Self::from_str(s.trim()).map_err(|_| Error::UnknownRegulationKind(s.to_owned()))
  }
}

/// The legal area a regulation belongs to.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
  Laboral,
  Penal,
  Civil,
  Comercial,
  Familia,
  Administrativo,
  Tributario,
  Constitucional,
}

impl Category {
  /// Text stored in `Normativa.Categoria`.
  pub fn as_str(self) -> &'static str { self.into() }

  pub fn parse(s: &str) -> Result<Self> {
    Self::from_str(s.trim()).map_err(|_| Error::UnknownCategory(s.to_owned()))
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A persisted regulation as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Regulation {
  pub registration: RegistrationNumber,
  pub kind:         RegulationKind,
  /// Official number of the instrument; free-form and not unique.
  pub number:       String,
  /// Free-form date as entered by the clerk.
  pub date:         String,
  pub description:  String,
  pub category:     Category,
  pub issuing_body: String,
  pub jurisdiction: Jurisdiction,
}

/// Input for [`RegulationStore::insert_regulation`](crate::store::RegulationStore::insert_regulation).
///
/// There is deliberately no issuing-body field: the store derives it from
/// `jurisdiction_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegulation {
  pub kind:            RegulationKind,
  pub number:          String,
  pub date:            String,
  pub description:     String,
  pub category:        Category,
  /// Must be a [`Jurisdiction::id`]; anything else is rejected by the store.
  pub jurisdiction_id: String,
  /// Stored verbatim, one row per entry, duplicates included.
  pub keywords:        Vec<String>,
}

/// A keyword attached to a regulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
  pub id:           i64,
  pub word:         String,
  pub registration: RegistrationNumber,
}
