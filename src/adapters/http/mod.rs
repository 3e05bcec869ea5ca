//! HTTP API server.

pub mod api;

pub use api::ApiServer;
