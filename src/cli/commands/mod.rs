//! CLI command implementations.

pub mod agent;
pub mod assignment;
pub mod catalog;
pub mod classify;
pub mod serve;
