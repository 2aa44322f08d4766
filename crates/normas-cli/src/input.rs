//! Parsing of free-text answers typed at the menu prompts.

use std::fmt::Display;

use normas_core::regulation::RegistrationNumber;
use strum::IntoEnumIterator;

/// Split a comma-separated keyword answer. Surrounding whitespace is trimmed
/// and empty entries are dropped; letter case is preserved.
pub fn split_keywords(input: &str) -> Vec<String> {
  input
    .split(',')
    .map(str::trim)
    .filter(|w| !w.is_empty())
    .map(str::to_owned)
    .collect()
}

/// Parse a registration number; only positive integers are accepted.
pub fn parse_registration(input: &str) -> Option<RegistrationNumber> {
  input
    .trim()
    .parse::<RegistrationNumber>()
    .ok()
    .filter(|n| *n > 0)
}

/// `"A, B, C"` for every variant of an enumeration.
pub fn options<T: IntoEnumIterator + Display>() -> String {
  T::iter()
    .map(|v| v.to_string())
    .collect::<Vec<_>>()
    .join(", ")
}
