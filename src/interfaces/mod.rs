//! Batch input and output: CSV request reading, JSON-lines response writing.

pub mod csv;
pub mod json;
