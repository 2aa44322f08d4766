//! SQL schema for the Normas SQLite store.
//!
//! Table and column names follow the registry's existing `leyes.db` layout.

/// Full schema DDL plus jurisdiction seed rows; idempotent thanks to
/// `CREATE TABLE IF NOT EXISTS` and `INSERT OR IGNORE`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS Jurisdiccion (
    ID      TEXT PRIMARY KEY,   -- 'Nacional' | 'Provincial'
    Nombre  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS Normativa (
    Nro_Registro        INTEGER PRIMARY KEY AUTOINCREMENT,
    Tipo_Normativa      TEXT NOT NULL,   -- 'Ley' | 'Resolución' | 'Decreto'
    Nro_Normativa       TEXT NOT NULL,
    Fecha               TEXT NOT NULL,
    Descripcion         TEXT NOT NULL,
    Categoria           TEXT NOT NULL,
    Organo_Legislativo  TEXT NOT NULL,   -- derived from Jurisdiccion_ID
    Jurisdiccion_ID     TEXT NOT NULL REFERENCES Jurisdiccion(ID)
);

-- Keywords are owned by their regulation and deleted together with it.
CREATE TABLE IF NOT EXISTS PalabraClave (
    ID            INTEGER PRIMARY KEY AUTOINCREMENT,
    Palabra       TEXT NOT NULL,
    Nro_Registro  INTEGER NOT NULL REFERENCES Normativa(Nro_Registro)
);

CREATE INDEX IF NOT EXISTS palabra_clave_palabra_idx  ON PalabraClave(Palabra);
CREATE INDEX IF NOT EXISTS palabra_clave_registro_idx ON PalabraClave(Nro_Registro);
CREATE INDEX IF NOT EXISTS normativa_numero_idx       ON Normativa(Nro_Normativa);

INSERT OR IGNORE INTO Jurisdiccion (ID, Nombre) VALUES ('Nacional', 'Nacional');
INSERT OR IGNORE INTO Jurisdiccion (ID, Nombre) VALUES ('Provincial', 'Provincial');

PRAGMA user_version = 1;
";

/// Column list shared by every query that reads whole `Normativa` rows.
/// Order matches [`crate::encode::raw_regulation`].
pub const REGULATION_COLUMNS: &str = "Nro_Registro, Tipo_Normativa, Nro_Normativa, Fecha, \
   Descripcion, Categoria, Organo_Legislativo, Jurisdiccion_ID";
