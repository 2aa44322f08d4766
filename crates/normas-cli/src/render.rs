//! Plain-text rendering of regulations for the terminal.

use normas_core::regulation::Regulation;

/// Render one regulation as a short block.
///
/// ```text
/// [1] Ley 1234 (01/01/2020)
///     Categoría: Civil | Jurisdicción: Nacional | Órgano: Congreso de la Nación
///     Régimen general de contratos
/// ```
pub fn regulation(r: &Regulation) -> String {
  format!(
    "[{}] {} {} ({})\n    Categoría: {} | Jurisdicción: {} | Órgano: {}\n    {}\n",
    r.registration,
    r.kind,
    r.number,
    r.date,
    r.category,
    r.jurisdiction,
    r.issuing_body,
    r.description,
  )
}

pub fn regulations(rs: &[Regulation]) -> String {
  rs.iter().map(regulation).collect()
}
