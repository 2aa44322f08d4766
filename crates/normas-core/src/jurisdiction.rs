//! Jurisdictions: the governing level a regulation belongs to.
//!
//! The identifier stored in the database is the jurisdiction's own name
//! (`"Nacional"`, `"Provincial"`). Exactly these two rows exist; they are
//! seeded when the store is initialised and never change afterwards.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::{Error, Result};

/// Issuing body of every national regulation.
pub const NATIONAL_CONGRESS: &str = "Congreso de la Nación";

/// Issuing body of every provincial regulation.
pub const PROVINCIAL_LEGISLATURE: &str = "Legislatura Provincial";

/// One of the two recognised jurisdictions.
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
  EnumIter,
  IntoStaticStr,
)]
pub enum Jurisdiction {
  Nacional,
  Provincial,
}

impl Jurisdiction {
  /// The identifier stored in `Jurisdiccion.ID` and `Normativa.Jurisdiccion_ID`.
  pub fn id(self) -> &'static str { self.into() }

  /// The display name stored in `Jurisdiccion.Nombre`.
  pub fn name(self) -> &'static str { self.id() }

  /// The legislative body that issues regulations in this jurisdiction.
  ///
  /// Issuing body is never supplied by callers; it is always derived here.
  pub fn issuing_body(self) -> &'static str {
    match self {
      Jurisdiction::Nacional => NATIONAL_CONGRESS,
      Jurisdiction::Provincial => PROVINCIAL_LEGISLATURE,
    }
  }

  /// Exact, case-sensitive lookup by stored identifier.
  pub fn from_id(id: &str) -> Option<Self> {
    Self::iter().find(|j| j.id() == id)
  }

  /// Like [`Jurisdiction::from_id`] but reports an unknown identifier as an
  /// error. Used when decoding stored rows.
  pub fn parse_id(id: &str) -> Result<Self> {
    Self::from_id(id).ok_or_else(|| Error::UnknownJurisdiction(id.to_owned()))
  }

  /// Lenient lookup for free-text user input: surrounding whitespace is
  /// ignored and the comparison is case-insensitive.
  pub fn parse_input(input: &str) -> Option<Self> {
    let input = input.trim();
    Self::iter().find(|j| j.id().eq_ignore_ascii_case(input))
  }
}

/// A raw row of the `Jurisdiccion` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionRecord {
  pub id:   String,
  pub name: String,
}
