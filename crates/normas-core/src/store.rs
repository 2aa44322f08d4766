//! The `RegulationStore` trait.
//!
//! Implemented by storage backends (e.g. `normas-store-sqlite`). The console
//! front-end depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  jurisdiction::JurisdictionRecord,
  regulation::{Keyword, NewRegulation, RegistrationNumber, Regulation},
};

/// Abstraction over a regulation registry backend.
///
/// Every method is a single unit of work that is durable once the returned
/// future resolves. Reads that can return many regulations order them by
/// registration number.
pub trait RegulationStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Schema & jurisdictions ────────────────────────────────────────────

  /// Ensure all tables exist and the two standard jurisdictions are seeded.
  /// Calling this again is a no-op.
  fn initialize(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Display name for a jurisdiction identifier, or `None` if unknown.
  fn jurisdiction_name<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  /// Every jurisdiction row, ordered by identifier.
  fn list_jurisdictions(
    &self,
  ) -> impl Future<Output = Result<Vec<JurisdictionRecord>, Self::Error>> + Send + '_;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Insert a regulation together with its keywords and return the assigned
  /// registration number.
  ///
  /// Fails without writing anything if `input.jurisdiction_id` is not a
  /// recognised jurisdiction.
  fn insert_regulation(
    &self,
    input: NewRegulation,
  ) -> impl Future<Output = Result<RegistrationNumber, Self::Error>> + Send + '_;

  /// Replace the description of a regulation.
  ///
  /// Returns `false` (not an error) when no regulation has that number.
  fn update_description(
    &self,
    registration: RegistrationNumber,
    description: String,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Delete a regulation and all of its keywords.
  ///
  /// Returns `false` (not an error) when no regulation has that number.
  fn delete_regulation(
    &self,
    registration: RegistrationNumber,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Regulations tagged with at least one of `keywords` (exact,
  /// case-sensitive match). Each regulation appears once. An empty slice
  /// yields an empty result.
  fn search_by_keywords<'a>(
    &'a self,
    keywords: &'a [String],
  ) -> impl Future<Output = Result<Vec<Regulation>, Self::Error>> + Send + 'a;

  /// Regulations whose official number equals `number` exactly.
  fn search_by_number<'a>(
    &'a self,
    number: &'a str,
  ) -> impl Future<Output = Result<Vec<Regulation>, Self::Error>> + Send + 'a;

  /// Every regulation.
  fn list_all(&self) -> impl Future<Output = Result<Vec<Regulation>, Self::Error>> + Send + '_;

  /// A single regulation, or `None` if the number is unknown.
  fn get_regulation(
    &self,
    registration: RegistrationNumber,
  ) -> impl Future<Output = Result<Option<Regulation>, Self::Error>> + Send + '_;

  /// Keywords of a regulation in insertion order.
  fn keywords(
    &self,
    registration: RegistrationNumber,
  ) -> impl Future<Output = Result<Vec<Keyword>, Self::Error>> + Send + '_;
}
