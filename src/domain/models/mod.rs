//! Domain models for the docflow system.

pub mod agent;
pub mod assignment;
pub mod document;
pub mod document_type;
pub mod workflow;

pub use agent::Agent;
pub use assignment::AgentAssignment;
pub use document::Document;
pub use document_type::{Catalog, DocumentTypeDefinition, DocumentTypeOption, RiskLevel};
pub use workflow::{
    Fallback, FallbackResult, RunStatus, StepAction, StepResult, TestResult, Workflow,
    WorkflowRun, WorkflowStep, MAX_STEP_RETRIES, MAX_WORKFLOW_STEPS,
};
