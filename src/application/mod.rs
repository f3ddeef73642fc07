//! Application layer: the computation the crate ships and the boundary that fronts it.
//!
//! `Boundary` is the entry point for request handling. It owns its
//! collaborators as trait objects so tests and the CLI can swap the
//! computation or the observability sink.

pub mod boundary;
pub mod service;
