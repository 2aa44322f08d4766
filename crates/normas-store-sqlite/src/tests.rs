//! Integration tests for `SqliteStore` against in-memory and file databases.

use normas_core::{
  jurisdiction::{NATIONAL_CONGRESS, PROVINCIAL_LEGISLATURE, Jurisdiction},
  regulation::{Category, NewRegulation, RegulationKind},
  store::RegulationStore,
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn regulation(number: &str, jurisdiction: &str, keywords: &[&str]) -> NewRegulation {
  NewRegulation {
    kind:            RegulationKind::Ley,
    number:          number.into(),
    date:            "01/01/2020".into(),
    description:     format!("Ley {number}"),
    category:        Category::Civil,
    jurisdiction_id: jurisdiction.into(),
    keywords:        keywords.iter().map(|k| (*k).to_owned()).collect(),
  }
}

fn words(ws: &[&str]) -> Vec<String> { ws.iter().map(|w| (*w).to_owned()).collect() }

/// Run `sql` on a separate plain connection to the file at `path`.
fn tamper(path: &std::path::Path, sql: &str) {
  let conn = rusqlite::Connection::open(path).unwrap();
  conn.execute_batch(sql).unwrap();
}

// ─── Initialisation & jurisdictions ──────────────────────────────────────────

#[tokio::test]
async fn initialize_is_idempotent() {
  let s = store().await;
  s.initialize().await.unwrap();
  s.initialize().await.unwrap();

  let rows = s.list_jurisdictions().await.unwrap();
  assert_eq!(rows.len(), 2);
  let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
  assert_eq!(ids, ["Nacional", "Provincial"]);
}

#[tokio::test]
async fn reopening_a_file_store_keeps_data_and_seed() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("leyes.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.insert_regulation(regulation("1", "Nacional", &["a"]))
      .await
      .unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(s.list_jurisdictions().await.unwrap().len(), 2);
  assert_eq!(s.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn open_in_missing_directory_is_storage_unavailable() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("missing").join("leyes.db");

  let Err(err) = SqliteStore::open(&path).await else {
    panic!("opening a file in a missing directory should fail");
  };
  assert!(matches!(err, Error::StorageUnavailable(_)));
}

#[tokio::test]
async fn initialize_failure_is_storage_unavailable() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("leyes.db");
  let s = SqliteStore::open(&path).await.unwrap();

  // Seeding a view cannot succeed, so the schema step fails.
  tamper(
    &path,
    "DROP TABLE Jurisdiccion;
     CREATE VIEW Jurisdiccion AS SELECT 'x' AS ID, 'x' AS Nombre;",
  );

  let err = s.initialize().await.unwrap_err();
  assert!(matches!(err, Error::StorageUnavailable(_)));
}

#[tokio::test]
async fn jurisdiction_name_lookup() {
  let s = store().await;
  assert_eq!(
    s.jurisdiction_name("Nacional").await.unwrap().as_deref(),
    Some("Nacional")
  );
  assert_eq!(
    s.jurisdiction_name("Provincial").await.unwrap().as_deref(),
    Some("Provincial")
  );
  assert!(s.jurisdiction_name("Municipal").await.unwrap().is_none());
}

// ─── Insert ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn registration_numbers_strictly_increase() {
  let s = store().await;
  let mut last = 0;
  for n in 0..5 {
    let reg = s
      .insert_regulation(regulation(&n.to_string(), "Provincial", &[]))
      .await
      .unwrap();
    assert!(reg > last);
    last = reg;
  }
}

#[tokio::test]
async fn registration_numbers_are_not_reused_after_delete() {
  let s = store().await;
  let first = s
    .insert_regulation(regulation("1", "Nacional", &[]))
    .await
    .unwrap();
  s.delete_regulation(first).await.unwrap();

  let second = s
    .insert_regulation(regulation("2", "Nacional", &[]))
    .await
    .unwrap();
  assert!(second > first);
}

#[tokio::test]
async fn invalid_jurisdiction_writes_nothing() {
  let s = store().await;
  s.insert_regulation(regulation("1", "Nacional", &["x"]))
    .await
    .unwrap();

  for bad in ["Municipal", "nacional", "", " Provincial"] {
    let err = s
      .insert_regulation(regulation("2", bad, &["y"]))
      .await
      .unwrap_err();
    assert!(matches!(err, Error::InvalidJurisdiction(ref id) if id == bad));
  }

  assert_eq!(s.list_all().await.unwrap().len(), 1);
  assert!(s.search_by_keywords(&words(&["y"])).await.unwrap().is_empty());
}

#[tokio::test]
async fn issuing_body_is_derived_from_jurisdiction() {
  let s = store().await;
  let national = s
    .insert_regulation(regulation("1", "Nacional", &[]))
    .await
    .unwrap();
  let provincial = s
    .insert_regulation(regulation("2", "Provincial", &[]))
    .await
    .unwrap();

  let national = s.get_regulation(national).await.unwrap().unwrap();
  assert_eq!(national.jurisdiction, Jurisdiction::Nacional);
  assert_eq!(national.issuing_body, NATIONAL_CONGRESS);

  let provincial = s.get_regulation(provincial).await.unwrap().unwrap();
  assert_eq!(provincial.jurisdiction, Jurisdiction::Provincial);
  assert_eq!(provincial.issuing_body, PROVINCIAL_LEGISLATURE);
}

#[tokio::test]
async fn failed_keyword_insert_rolls_back_the_regulation() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("leyes.db");
  let s = SqliteStore::open(&path).await.unwrap();

  tamper(
    &path,
    "CREATE TRIGGER reject_boom BEFORE INSERT ON PalabraClave
     WHEN NEW.Palabra = 'boom'
     BEGIN SELECT RAISE(ABORT, 'boom'); END;",
  );

  let result = s
    .insert_regulation(regulation("1", "Nacional", &["ok", "boom"]))
    .await;
  assert!(matches!(result, Err(Error::Database(_))));

  assert!(s.list_all().await.unwrap().is_empty());
  assert!(s.search_by_keywords(&words(&["ok"])).await.unwrap().is_empty());

  // The next successful insert is unaffected by the rolled-back one.
  let n = s
    .insert_regulation(regulation("2", "Nacional", &["ok"]))
    .await
    .unwrap();
  assert_eq!(s.keywords(n).await.unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_stored_category_is_a_decode_error() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("leyes.db");
  let s = SqliteStore::open(&path).await.unwrap();

  tamper(
    &path,
    "INSERT INTO Normativa (
       Tipo_Normativa, Nro_Normativa, Fecha, Descripcion,
       Categoria, Organo_Legislativo, Jurisdiccion_ID
     ) VALUES ('Ley', '1', 'hoy', 'd', 'Ambiental', 'Congreso de la Nación', 'Nacional');",
  );

  let err = s.list_all().await.unwrap_err();
  assert!(matches!(
    err,
    Error::Core(normas_core::Error::UnknownCategory(ref c)) if c == "Ambiental"
  ));

  let err = s.get_regulation(1).await.unwrap_err();
  assert!(matches!(
    err,
    Error::Core(normas_core::Error::UnknownCategory(_))
  ));
}

#[tokio::test]
async fn inserted_fields_read_back_unchanged() {
  let s = store().await;
  let input = NewRegulation {
    kind:            RegulationKind::Resolucion,
    number:          "45/2019".into(),
    date:            "3 de marzo de 2019".into(),
    description:     "Régimen de licencias".into(),
    category:        Category::Laboral,
    jurisdiction_id: "Provincial".into(),
    keywords:        vec![],
  };
  let reg = s.insert_regulation(input).await.unwrap();

  let got = s.get_regulation(reg).await.unwrap().unwrap();
  assert_eq!(got.registration, reg);
  assert_eq!(got.kind, RegulationKind::Resolucion);
  assert_eq!(got.number, "45/2019");
  assert_eq!(got.date, "3 de marzo de 2019");
  assert_eq!(got.description, "Régimen de licencias");
  assert_eq!(got.category, Category::Laboral);
}

#[tokio::test]
async fn keywords_are_stored_verbatim() {
  let s = store().await;
  let reg = s
    .insert_regulation(regulation("1", "Nacional", &["civil", "civil", " civil", "Civil"]))
    .await
    .unwrap();

  let stored: Vec<_> = s
    .keywords(reg)
    .await
    .unwrap()
    .into_iter()
    .map(|k| k.word)
    .collect();
  assert_eq!(stored, ["civil", "civil", " civil", "Civil"]);
}

#[tokio::test]
async fn get_regulation_missing_returns_none() {
  let s = store().await;
  assert!(s.get_regulation(42).await.unwrap().is_none());
}

// ─── Keyword search ──────────────────────────────────────────────────────────

#[tokio::test]
async fn search_by_single_keyword() {
  let s = store().await;
  let reg = s
    .insert_regulation(regulation("20744", "Nacional", &["laboral", "contrato"]))
    .await
    .unwrap();
  s.insert_regulation(regulation("26994", "Nacional", &["civil"]))
    .await
    .unwrap();

  let found = s.search_by_keywords(&words(&["laboral"])).await.unwrap();
  assert_eq!(found.len(), 1);
  assert_eq!(found[0].registration, reg);

  let none = s.search_by_keywords(&words(&["penal"])).await.unwrap();
  assert!(none.is_empty());
}

#[tokio::test]
async fn search_by_keywords_is_a_union_without_duplicates() {
  let s = store().await;
  let a = s
    .insert_regulation(regulation("1", "Nacional", &["laboral", "salario"]))
    .await
    .unwrap();
  let b = s
    .insert_regulation(regulation("2", "Provincial", &["salario", "empleo"]))
    .await
    .unwrap();
  s.insert_regulation(regulation("3", "Provincial", &["tránsito"]))
    .await
    .unwrap();

  let found = s
    .search_by_keywords(&words(&["laboral", "empleo"]))
    .await
    .unwrap();
  let regs: Vec<_> = found.iter().map(|r| r.registration).collect();
  assert_eq!(regs, [a, b]);

  // `a` matches both keywords but appears once.
  let found = s
    .search_by_keywords(&words(&["laboral", "salario", "salario"]))
    .await
    .unwrap();
  let regs: Vec<_> = found.iter().map(|r| r.registration).collect();
  assert_eq!(regs, [a, b]);
}

#[tokio::test]
async fn search_by_keywords_is_exact_and_case_sensitive() {
  let s = store().await;
  s.insert_regulation(regulation("1", "Nacional", &["Contrato"]))
    .await
    .unwrap();

  assert!(s.search_by_keywords(&words(&["contrato"])).await.unwrap().is_empty());
  assert!(s.search_by_keywords(&words(&["Contr"])).await.unwrap().is_empty());
  assert!(s.search_by_keywords(&words(&[" Contrato"])).await.unwrap().is_empty());
  assert_eq!(
    s.search_by_keywords(&words(&["Contrato"])).await.unwrap().len(),
    1
  );
}

#[tokio::test]
async fn search_with_no_keywords_is_empty() {
  let s = store().await;
  s.insert_regulation(regulation("1", "Nacional", &["a"]))
    .await
    .unwrap();
  assert!(s.search_by_keywords(&[]).await.unwrap().is_empty());
}

// ─── Number search & listing ─────────────────────────────────────────────────

#[tokio::test]
async fn search_by_number_returns_every_match() {
  let s = store().await;
  let a = s
    .insert_regulation(regulation("100", "Nacional", &[]))
    .await
    .unwrap();
  s.insert_regulation(regulation("200", "Nacional", &[]))
    .await
    .unwrap();
  let c = s
    .insert_regulation(regulation("100", "Provincial", &[]))
    .await
    .unwrap();

  let found = s.search_by_number("100").await.unwrap();
  let regs: Vec<_> = found.iter().map(|r| r.registration).collect();
  assert_eq!(regs, [a, c]);

  assert!(s.search_by_number("1000").await.unwrap().is_empty());
}

#[tokio::test]
async fn list_all_is_ordered_by_registration() {
  let s = store().await;
  assert!(s.list_all().await.unwrap().is_empty());

  for n in ["c", "a", "b"] {
    s.insert_regulation(regulation(n, "Nacional", &[]))
      .await
      .unwrap();
  }

  let all = s.list_all().await.unwrap();
  let numbers: Vec<_> = all.iter().map(|r| r.number.as_str()).collect();
  assert_eq!(numbers, ["c", "a", "b"]);
  assert!(all.windows(2).all(|w| w[0].registration < w[1].registration));
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_description_changes_only_description() {
  let s = store().await;
  let reg = s
    .insert_regulation(regulation("1", "Provincial", &["k"]))
    .await
    .unwrap();
  let before = s.get_regulation(reg).await.unwrap().unwrap();

  let changed = s
    .update_description(reg, "new text".into())
    .await
    .unwrap();
  assert!(changed);

  let after = s.get_regulation(reg).await.unwrap().unwrap();
  assert_eq!(after.description, "new text");
  assert_eq!(
    after,
    normas_core::regulation::Regulation { description: "new text".into(), ..before }
  );
  assert_eq!(s.keywords(reg).await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_description_of_missing_regulation_is_silent() {
  let s = store().await;
  s.insert_regulation(regulation("1", "Nacional", &[]))
    .await
    .unwrap();

  let changed = s.update_description(999, "x".into()).await.unwrap();
  assert!(!changed);
  assert_eq!(s.list_all().await.unwrap().len(), 1);
  assert!(s.get_regulation(999).await.unwrap().is_none());
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_regulation_and_keywords() {
  let s = store().await;
  let gone = s
    .insert_regulation(regulation("1", "Nacional", &["familia", "alimentos"]))
    .await
    .unwrap();
  let kept = s
    .insert_regulation(regulation("2", "Nacional", &["familia"]))
    .await
    .unwrap();

  assert!(s.delete_regulation(gone).await.unwrap());

  assert!(s.keywords(gone).await.unwrap().is_empty());
  assert!(s.get_regulation(gone).await.unwrap().is_none());
  assert!(s.search_by_keywords(&words(&["alimentos"])).await.unwrap().is_empty());

  let found = s.search_by_keywords(&words(&["familia"])).await.unwrap();
  assert_eq!(found.len(), 1);
  assert_eq!(found[0].registration, kept);

  let all = s.list_all().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].registration, kept);
}

#[tokio::test]
async fn delete_missing_regulation_is_a_noop() {
  let s = store().await;
  s.insert_regulation(regulation("1", "Nacional", &["a"]))
    .await
    .unwrap();

  assert!(!s.delete_regulation(77).await.unwrap());
  assert_eq!(s.list_all().await.unwrap().len(), 1);
}

// ─── End-to-end scenario ─────────────────────────────────────────────────────

#[tokio::test]
async fn insert_search_delete_scenario() {
  let s = store().await;

  let reg = s
    .insert_regulation(NewRegulation {
      kind:            RegulationKind::Ley,
      number:          "1234".into(),
      date:            "01/01/2020".into(),
      description:     "test".into(),
      category:        Category::Civil,
      jurisdiction_id: "Nacional".into(),
      keywords:        words(&["contrato", "civil"]),
    })
    .await
    .unwrap();
  assert_eq!(reg, 1);

  let found = s.search_by_keywords(&words(&["contrato"])).await.unwrap();
  assert_eq!(found.len(), 1);
  assert_eq!(found[0].number, "1234");

  s.delete_regulation(1).await.unwrap();
  assert!(s.list_all().await.unwrap().is_empty());
}
