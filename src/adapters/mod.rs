//! Adapters: concrete implementations of the domain ports.

pub mod analyzer;
pub mod cache;
pub mod http;
pub mod notify;
pub mod sqlite;
