//! Decoding helpers between SQLite rows and the domain types of
//! `normas-core`.
//!
//! Enumerated columns (`Tipo_Normativa`, `Categoria`, `Jurisdiccion_ID`) are
//! stored as their display text and parsed back on read.

use normas_core::{
  jurisdiction::{Jurisdiction, JurisdictionRecord},
  regulation::{Category, Keyword, Regulation, RegulationKind},
};

use crate::Result;

// ─── Normativa ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `Normativa` row.
pub struct RawRegulation {
  pub registration:    i64,
  pub kind:            String,
  pub number:          String,
  pub date:            String,
  pub description:     String,
  pub category:        String,
  pub issuing_body:    String,
  pub jurisdiction_id: String,
}

/// Row mapper for queries selecting [`crate::schema::REGULATION_COLUMNS`].
pub fn raw_regulation(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRegulation> {
  Ok(RawRegulation {
    registration:    row.get(0)?,
    kind:            row.get(1)?,
    number:          row.get(2)?,
    date:            row.get(3)?,
    description:     row.get(4)?,
    category:        row.get(5)?,
    issuing_body:    row.get(6)?,
    jurisdiction_id: row.get(7)?,
  })
}

impl RawRegulation {
  pub fn into_regulation(self) -> Result<Regulation> {
    Ok(Regulation {
      registration: self.registration,
      kind:         RegulationKind::parse(&self.kind)?,
      number:       self.number,
      date:         self.date,
      description:  self.description,
      category:     Category::parse(&self.category)?,
      issuing_body: self.issuing_body,
      jurisdiction: Jurisdiction::parse_id(&self.jurisdiction_id)?,
    })
  }
}

// ─── PalabraClave ────────────────────────────────────────────────────────────

pub fn keyword(row: &rusqlite::Row<'_>) -> rusqlite::Result<Keyword> {
  Ok(Keyword {
    id:           row.get(0)?,
    word:         row.get(1)?,
    registration: row.get(2)?,
  })
}

// ─── Jurisdiccion ────────────────────────────────────────────────────────────

pub fn jurisdiction_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<JurisdictionRecord> {
  Ok(JurisdictionRecord {
    id:   row.get(0)?,
    name: row.get(1)?,
  })
}

// ─── Placeholders ────────────────────────────────────────────────────────────

/// `?1, ?2, …, ?n` for a dynamic `IN (...)` clause.
pub fn placeholders(n: usize) -> String {
  (1..=n)
    .map(|i| format!("?{i}"))
    .collect::<Vec<_>>()
    .join(", ")
}
