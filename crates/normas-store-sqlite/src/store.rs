//! [`SqliteStore`], the SQLite implementation of [`RegulationStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use normas_core::{
  jurisdiction::{Jurisdiction, JurisdictionRecord},
  regulation::{Keyword, NewRegulation, RegistrationNumber, Regulation},
  store::RegulationStore,
};

use crate::{
  encode::{jurisdiction_record, keyword, placeholders, raw_regulation, RawRegulation},
  schema::{REGULATION_COLUMNS, SCHEMA},
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A regulation registry backed by a single SQLite file.
///
/// Owns one connection for its whole lifetime; every statement runs serially
/// on that connection's background thread. Cloning is cheap; the inner
/// connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  ///
  /// Any failure here is reported as [`Error::StorageUnavailable`].
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(Error::StorageUnavailable)?;
    let store = Self { conn };
    store.init_schema().await.map_err(storage_unavailable)?;
    tracing::info!(path = %path.display(), "opened regulation store");
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(Error::StorageUnavailable)?;
    let store = Self { conn };
    store.init_schema().await.map_err(storage_unavailable)?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a `SELECT` over [`REGULATION_COLUMNS`] with positional text
  /// arguments and decode every row.
  async fn select_regulations(&self, sql: String, args: Vec<String>) -> Result<Vec<Regulation>> {
    let raws: Vec<RawRegulation> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(args.iter()), raw_regulation)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRegulation::into_regulation).collect()
  }
}

fn storage_unavailable(err: Error) -> Error {
  match err {
    Error::Database(e) => Error::StorageUnavailable(e),
    other => other,
  }
}

// ─── RegulationStore impl ────────────────────────────────────────────────────

impl RegulationStore for SqliteStore {
  type Error = Error;

  // ── Schema & jurisdictions ────────────────────────────────────────────────

  async fn initialize(&self) -> Result<()> {
    self.init_schema().await.map_err(storage_unavailable)
  }

  async fn jurisdiction_name(&self, id: &str) -> Result<Option<String>> {
    let id = id.to_owned();

    let name: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT Nombre FROM Jurisdiccion WHERE ID = ?1",
            rusqlite::params![id],
            |row| row.get(0),
          )
          .optional()?)
      })
      .await?;

    Ok(name)
  }

  async fn list_jurisdictions(&self) -> Result<Vec<JurisdictionRecord>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT ID, Nombre FROM Jurisdiccion ORDER BY ID")?;
        let rows = stmt
          .query_map([], jurisdiction_record)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn insert_regulation(&self, input: NewRegulation) -> Result<RegistrationNumber> {
    let jurisdiction = Jurisdiction::from_id(&input.jurisdiction_id)
      .ok_or_else(|| Error::InvalidJurisdiction(input.jurisdiction_id.clone()))?;

    let kind_str        = input.kind.as_str();
    let category_str    = input.category.as_str();
    let issuing_body    = jurisdiction.issuing_body();
    let jurisdiction_id = jurisdiction.id();
    let NewRegulation { number, date, description, keywords, .. } = input;
    let keyword_count = keywords.len();

    // Regulation and keywords commit together or not at all.
    let registration = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO Normativa (
             Tipo_Normativa, Nro_Normativa, Fecha, Descripcion,
             Categoria, Organo_Legislativo, Jurisdiccion_ID
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            kind_str,
            number,
            date,
            description,
            category_str,
            issuing_body,
            jurisdiction_id,
          ],
        )?;
        let registration = tx.last_insert_rowid();

        {
          let mut stmt =
            tx.prepare("INSERT INTO PalabraClave (Palabra, Nro_Registro) VALUES (?1, ?2)")?;
          for word in &keywords {
            stmt.execute(rusqlite::params![word, registration])?;
          }
        }

        tx.commit()?;
        Ok(registration)
      })
      .await?;

    tracing::debug!(registration, keywords = keyword_count, "inserted regulation");
    Ok(registration)
  }

  async fn update_description(
    &self,
    registration: RegistrationNumber,
    description:  String,
  ) -> Result<bool> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE Normativa SET Descripcion = ?1 WHERE Nro_Registro = ?2",
          rusqlite::params![description, registration],
        )?)
      })
      .await?;

    tracing::debug!(registration, changed, "updated description");
    Ok(changed > 0)
  }

  async fn delete_regulation(&self, registration: RegistrationNumber) -> Result<bool> {
    let (keywords_removed, removed) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let keywords_removed = tx.execute(
          "DELETE FROM PalabraClave WHERE Nro_Registro = ?1",
          rusqlite::params![registration],
        )?;
        let removed = tx.execute(
          "DELETE FROM Normativa WHERE Nro_Registro = ?1",
          rusqlite::params![registration],
        )?;
        tx.commit()?;
        Ok((keywords_removed, removed))
      })
      .await?;

    tracing::debug!(registration, removed, keywords_removed, "deleted regulation");
    Ok(removed > 0)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn search_by_keywords(&self, keywords: &[String]) -> Result<Vec<Regulation>> {
    if keywords.is_empty() {
      return Ok(Vec::new());
    }

    let sql = format!(
      "SELECT {REGULATION_COLUMNS}
       FROM Normativa
       WHERE Nro_Registro IN (
         SELECT DISTINCT Nro_Registro
         FROM PalabraClave
         WHERE Palabra IN ({})
       )
       ORDER BY Nro_Registro",
      placeholders(keywords.len())
    );

    self.select_regulations(sql, keywords.to_vec()).await
  }

  async fn search_by_number(&self, number: &str) -> Result<Vec<Regulation>> {
    let sql = format!(
      "SELECT {REGULATION_COLUMNS}
       FROM Normativa
       WHERE Nro_Normativa = ?1
       ORDER BY Nro_Registro"
    );

    self.select_regulations(sql, vec![number.to_owned()]).await
  }

  async fn list_all(&self) -> Result<Vec<Regulation>> {
    let sql = format!("SELECT {REGULATION_COLUMNS} FROM Normativa ORDER BY Nro_Registro");
    self.select_regulations(sql, Vec::new()).await
  }

  async fn get_regulation(&self, registration: RegistrationNumber) -> Result<Option<Regulation>> {
    let raw: Option<RawRegulation> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {REGULATION_COLUMNS} FROM Normativa WHERE Nro_Registro = ?1"),
            rusqlite::params![registration],
            raw_regulation,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawRegulation::into_regulation).transpose()
  }

  async fn keywords(&self, registration: RegistrationNumber) -> Result<Vec<Keyword>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT ID, Palabra, Nro_Registro FROM PalabraClave
           WHERE Nro_Registro = ?1
           ORDER BY ID",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![registration], keyword)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }
}
