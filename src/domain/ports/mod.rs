//! Ports (trait interfaces) decoupling the domain from adapters.

pub mod agent_executor;
pub mod agent_repository;
pub mod assignment_repository;
pub mod document_repository;
pub mod notifier;

pub use agent_executor::AgentExecutor;
pub use agent_repository::AgentRepository;
pub use assignment_repository::AssignmentRepository;
pub use document_repository::DocumentRepository;
pub use notifier::{FallbackNotice, Notifier};
