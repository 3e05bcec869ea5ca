//! Command-line interface.

pub mod commands;
pub mod context;
pub mod output;
pub mod table;
pub mod types;

pub use context::AppContext;
pub use output::handle_error;
pub use types::{AgentCommands, AssignmentCommands, Cli, Commands};
