//! Core types and trait definitions for the Normas regulation registry.
//!
//! This crate is free of database and terminal dependencies. The SQLite
//! backend and the console front-end both depend on it.

pub mod error;
pub mod jurisdiction;
pub mod regulation;
pub mod store;

pub use error::{Error, Result};
