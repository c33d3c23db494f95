//! SQL processing module
//!
//! This module provides:
//! - `parser`: tokenizer, statement forms and parser
//! - `types`: column kinds, values and rows
//! - `schema`: table definitions and their row maps
//! - `executor`: the interpreter that applies statements to the catalog
//! - `engine`: sessions running statement text end to end

pub mod engine;
pub mod executor;
pub mod parser;
pub mod schema;
pub mod types;
