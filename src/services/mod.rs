//! Service layer: business logic over the domain ports.

pub mod assignment_service;
pub mod classifier;
pub mod workflow_engine;

pub use assignment_service::AssignmentService;
pub use classifier::{detect_document_type, list_document_type_options};
pub use workflow_engine::WorkflowEngine;
