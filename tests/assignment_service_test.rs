//! End-to-end tests for the assignment service and workflow engine over a
//! real (in-memory) database.

use std::sync::Arc;

use docflow::adapters::analyzer::{MockAgentExecutor, StepBehavior};
use docflow::adapters::notify::RecordingNotifier;
use docflow::adapters::sqlite::{
    create_migrated_test_pool, SqliteAgentRepository, SqliteAssignmentRepository,
    SqliteDocumentRepository,
};
use docflow::domain::errors::DomainError;
use docflow::domain::models::{
    Agent, Document, Fallback, RunStatus, StepAction, Workflow, WorkflowStep,
};
use docflow::domain::ports::{AgentRepository, DocumentRepository};
use docflow::services::{AssignmentService, WorkflowEngine};

struct Fixture {
    service: AssignmentService,
    notifier: Arc<RecordingNotifier>,
    agents: SqliteAgentRepository,
    documents: SqliteDocumentRepository,
}

async fn fixture(executor: MockAgentExecutor) -> Fixture {
    let pool = create_migrated_test_pool().await.unwrap();
    let agents = SqliteAgentRepository::new(pool.clone());
    let documents = SqliteDocumentRepository::new(pool.clone());
    let notifier = Arc::new(RecordingNotifier::new());

    let engine = WorkflowEngine::new(Arc::new(executor), notifier.clone());
    let service = AssignmentService::new(
        Arc::new(SqliteAssignmentRepository::new(pool)),
        Arc::new(agents.clone()),
        Arc::new(documents.clone()),
        engine,
    );

    Fixture {
        service,
        notifier,
        agents,
        documents,
    }
}

fn reviewer_agent() -> Agent {
    Agent::new(
        "reviewer-1",
        "Contract Reviewer",
        [
            StepAction::ExtractClauses,
            StepAction::Summarize,
            StepAction::NotifyReviewer,
        ],
    )
}

fn nda_workflow() -> Workflow {
    Workflow {
        steps: vec![
            WorkflowStep::new(StepAction::ExtractClauses, 5000).with_retries(1),
            WorkflowStep::new(StepAction::Summarize, 5000),
        ],
        fallback: Fallback {
            action: StepAction::NotifyReviewer,
            notification: Some("legal-team".to_string()),
        },
    }
}

fn sample_document() -> Document {
    Document::new(
        "doc-1",
        "nda.txt",
        "This Non-Disclosure Agreement (NDA) protects confidential information.",
    )
}

#[tokio::test]
async fn test_assign_requires_known_agent() {
    let fx = fixture(MockAgentExecutor::new()).await;

    let err = fx
        .service
        .assign("nda", "ghost", nda_workflow())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::AgentNotFound(_)));
}

#[tokio::test]
async fn test_assign_rejects_steps_beyond_agent_capabilities() {
    let fx = fixture(MockAgentExecutor::new()).await;
    fx.agents.insert(&reviewer_agent()).await.unwrap();

    let workflow = Workflow {
        steps: vec![WorkflowStep::new(StepAction::AssessRisk, 5000)],
        fallback: Fallback {
            action: StepAction::NotifyReviewer,
            notification: None,
        },
    };

    let err = fx
        .service
        .assign("nda", "reviewer-1", workflow)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ValidationFailed(_)));
}

#[tokio::test]
async fn test_assign_allows_fallback_outside_capabilities() {
    let fx = fixture(MockAgentExecutor::new()).await;
    // Archive is not in the capability set; only steps are checked.
    fx.agents.insert(&reviewer_agent()).await.unwrap();

    let workflow = Workflow {
        steps: vec![WorkflowStep::new(StepAction::Summarize, 5000)],
        fallback: Fallback {
            action: StepAction::Archive,
            notification: None,
        },
    };

    fx.service
        .assign("nda", "reviewer-1", workflow)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_reassign_replaces_binding() {
    let fx = fixture(MockAgentExecutor::new()).await;
    fx.agents.insert(&reviewer_agent()).await.unwrap();
    fx.agents
        .insert(&Agent::new(
            "reviewer-2",
            "Second Reviewer",
            [StepAction::Summarize],
        ))
        .await
        .unwrap();

    fx.service
        .assign("nda", "reviewer-1", nda_workflow())
        .await
        .unwrap();

    let replacement = Workflow {
        steps: vec![WorkflowStep::new(StepAction::Summarize, 3000)],
        fallback: Fallback {
            action: StepAction::NotifyReviewer,
            notification: None,
        },
    };
    fx.service
        .assign("nda", "reviewer-2", replacement)
        .await
        .unwrap();

    let assignments = fx.service.list_assignments().await.unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].agent_id, "reviewer-2");
}

#[tokio::test]
async fn test_reassign_with_identical_arguments_keeps_binding_unchanged() {
    let fx = fixture(MockAgentExecutor::new()).await;
    fx.agents.insert(&reviewer_agent()).await.unwrap();

    let first = fx
        .service
        .assign("nda", "reviewer-1", nda_workflow())
        .await
        .unwrap();
    let second = fx
        .service
        .assign("nda", "reviewer-1", nda_workflow())
        .await
        .unwrap();

    let stored = fx
        .service
        .get_assignment("nda")
        .await
        .unwrap()
        .expect("binding should still exist");
    assert_eq!(stored.agent_id, "reviewer-1");
    assert_eq!(stored.workflow, first.workflow);
    assert_eq!(stored.created_at, first.created_at);
    assert!(second.updated_at >= first.updated_at);
    assert_eq!(fx.service.list_assignments().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_unassign_is_idempotent() {
    let fx = fixture(MockAgentExecutor::new()).await;
    fx.agents.insert(&reviewer_agent()).await.unwrap();
    fx.service
        .assign("nda", "reviewer-1", nda_workflow())
        .await
        .unwrap();

    fx.service.unassign("nda").await.unwrap();
    fx.service.unassign("nda").await.unwrap();
    fx.service.unassign("never-bound").await.unwrap();

    assert!(fx.service.get_assignment("nda").await.unwrap().is_none());
}

#[tokio::test]
async fn test_test_assignment_completes() {
    let fx = fixture(MockAgentExecutor::new()).await;
    fx.agents.insert(&reviewer_agent()).await.unwrap();
    fx.documents.insert(&sample_document()).await.unwrap();
    fx.service
        .assign("nda", "reviewer-1", nda_workflow())
        .await
        .unwrap();

    let result = fx.service.test_assignment("nda", "doc-1").await.unwrap();

    assert_eq!(result.status, RunStatus::Completed);
    assert_eq!(result.steps.len(), 2);
    assert!(result.steps.iter().all(|s| s.succeeded));
    assert!(result.fallback.is_none());
    assert_eq!(result.agent_id, "reviewer-1");
    assert!(result.finished_at >= result.started_at);
    assert!(fx.notifier.notices().is_empty());
}

#[tokio::test]
async fn test_test_assignment_falls_back_and_notifies() {
    let executor = MockAgentExecutor::new()
        .with_behavior(StepAction::ExtractClauses, StepBehavior::Fail);
    let fx = fixture(executor).await;
    fx.agents.insert(&reviewer_agent()).await.unwrap();
    fx.documents.insert(&sample_document()).await.unwrap();
    fx.service
        .assign("nda", "reviewer-1", nda_workflow())
        .await
        .unwrap();

    let result = fx.service.test_assignment("nda", "doc-1").await.unwrap();

    assert_eq!(result.status, RunStatus::FellBack);
    // First step: 1 initial + 1 retry, both failed; second step never ran.
    assert_eq!(result.steps.len(), 1);
    assert_eq!(result.steps[0].attempts, 2);
    let fallback = result.fallback.expect("fallback should have run");
    assert!(fallback.succeeded);
    assert!(fallback.notified);

    let notices = fx.notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].recipient, "legal-team");
    assert_eq!(notices[0].document_type_id, "nda");
    assert_eq!(notices[0].document_id, "doc-1");
}

#[tokio::test]
async fn test_test_assignment_transient_failure_recovers_within_retries() {
    let executor = MockAgentExecutor::new()
        .with_behavior(StepAction::ExtractClauses, StepBehavior::FailTimes(1));
    let fx = fixture(executor).await;
    fx.agents.insert(&reviewer_agent()).await.unwrap();
    fx.documents.insert(&sample_document()).await.unwrap();
    fx.service
        .assign("nda", "reviewer-1", nda_workflow())
        .await
        .unwrap();

    let result = fx.service.test_assignment("nda", "doc-1").await.unwrap();

    assert_eq!(result.status, RunStatus::Completed);
    assert_eq!(result.steps[0].attempts, 2);
    assert!(result.steps[0].succeeded);
}

#[tokio::test]
async fn test_test_assignment_without_binding_fails() {
    let fx = fixture(MockAgentExecutor::new()).await;
    fx.documents.insert(&sample_document()).await.unwrap();

    let err = fx.service.test_assignment("nda", "doc-1").await.unwrap_err();
    assert!(matches!(err, DomainError::NotAssigned(_)));
}

#[tokio::test]
async fn test_test_assignment_with_unknown_document_fails() {
    let fx = fixture(MockAgentExecutor::new()).await;
    fx.agents.insert(&reviewer_agent()).await.unwrap();
    fx.service
        .assign("nda", "reviewer-1", nda_workflow())
        .await
        .unwrap();

    let err = fx
        .service
        .test_assignment("nda", "missing-doc")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::DocumentNotFound(_)));
}
