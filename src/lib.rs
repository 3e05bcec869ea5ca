//! Docflow: document classification and agent-assignment workflows.
//!
//! Incoming documents are matched against a keyword catalog, routed to the
//! agent assigned to their type, and processed through that assignment's
//! workflow: ordered steps with per-step timeout and retries, backed by a
//! single fallback action when the sequence cannot complete.
//!
//! The crate follows a hexagonal layout: `domain` holds the models and
//! ports, `services` the business logic, `adapters` the SQLite, HTTP, and
//! analyzer implementations, and `infrastructure` the cross-cutting pieces
//! (configuration, catalog loading, retry).

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

pub use domain::errors::{DomainError, DomainResult};
