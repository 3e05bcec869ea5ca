//! Adapters for the agent execution port.
//!
//! `HttpAgentExecutor` talks to the real analyzer service; `MockAgentExecutor`
//! provides scriptable behavior for tests.

pub mod error;
pub mod http;
pub mod mock;

pub use error::AnalyzerApiError;
pub use http::HttpAgentExecutor;
pub use mock::{MockAgentExecutor, StepBehavior};
