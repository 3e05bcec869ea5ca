//! Integration tests for the SQLite assignment store.

use std::sync::Arc;

use docflow::adapters::cache::CachedAssignmentRepository;
use docflow::adapters::sqlite::{
    create_migrated_test_pool, SqliteAgentRepository, SqliteAssignmentRepository,
};
use docflow::domain::models::{
    Agent, AgentAssignment, Fallback, StepAction, Workflow, WorkflowStep,
};
use docflow::domain::ports::{AgentRepository, AssignmentRepository};

fn reviewer_agent(id: &str) -> Agent {
    Agent::new(
        id,
        "Contract Reviewer",
        [
            StepAction::ExtractClauses,
            StepAction::Summarize,
            StepAction::NotifyReviewer,
        ],
    )
}

fn workflow_with_steps(steps: Vec<WorkflowStep>) -> Workflow {
    Workflow {
        steps,
        fallback: Fallback {
            action: StepAction::NotifyReviewer,
            notification: Some("legal-team".to_string()),
        },
    }
}

fn summarize_workflow() -> Workflow {
    workflow_with_steps(vec![WorkflowStep::new(StepAction::Summarize, 5000)])
}

#[tokio::test]
async fn test_upsert_and_get_round_trip() {
    let pool = create_migrated_test_pool().await.unwrap();
    let agents = SqliteAgentRepository::new(pool.clone());
    let repo = SqliteAssignmentRepository::new(pool);

    agents.insert(&reviewer_agent("agent-1")).await.unwrap();

    let workflow = workflow_with_steps(vec![
        WorkflowStep::new(StepAction::ExtractClauses, 10_000).with_retries(2),
        WorkflowStep::new(StepAction::Summarize, 5000),
    ]);
    let assignment = AgentAssignment::new("nda", "agent-1", workflow.clone());
    repo.upsert(&assignment).await.unwrap();

    let stored = repo.get("nda").await.unwrap().expect("assignment missing");
    assert_eq!(stored.document_type_id, "nda");
    assert_eq!(stored.agent_id, "agent-1");
    assert_eq!(stored.workflow, workflow);
}

#[tokio::test]
async fn test_get_unassigned_type_is_none() {
    let pool = create_migrated_test_pool().await.unwrap();
    let repo = SqliteAssignmentRepository::new(pool);

    assert!(repo.get("lease").await.unwrap().is_none());
}

#[tokio::test]
async fn test_upsert_overwrites_and_preserves_created_at() {
    let pool = create_migrated_test_pool().await.unwrap();
    let agents = SqliteAgentRepository::new(pool.clone());
    let repo = SqliteAssignmentRepository::new(pool);

    agents.insert(&reviewer_agent("agent-1")).await.unwrap();
    agents.insert(&reviewer_agent("agent-2")).await.unwrap();

    let first = AgentAssignment::new("nda", "agent-1", summarize_workflow());
    repo.upsert(&first).await.unwrap();

    let replacement = AgentAssignment::new(
        "nda",
        "agent-2",
        workflow_with_steps(vec![
            WorkflowStep::new(StepAction::ExtractClauses, 8000),
        ]),
    );
    repo.upsert(&replacement).await.unwrap();

    let stored = repo.get("nda").await.unwrap().unwrap();
    assert_eq!(stored.agent_id, "agent-2");
    assert_eq!(stored.workflow.steps[0].action, StepAction::ExtractClauses);
    // The original binding time survives the overwrite.
    assert_eq!(stored.created_at, first.created_at);

    // Still exactly one assignment for the type.
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let pool = create_migrated_test_pool().await.unwrap();
    let agents = SqliteAgentRepository::new(pool.clone());
    let repo = SqliteAssignmentRepository::new(pool);

    agents.insert(&reviewer_agent("agent-1")).await.unwrap();
    repo.upsert(&AgentAssignment::new("nda", "agent-1", summarize_workflow()))
        .await
        .unwrap();

    repo.delete("nda").await.unwrap();
    assert!(repo.get("nda").await.unwrap().is_none());

    // Deleting again is a no-op success.
    repo.delete("nda").await.unwrap();
    repo.delete("never-assigned").await.unwrap();
}

#[tokio::test]
async fn test_agent_delete_cascades_to_assignments() {
    let pool = create_migrated_test_pool().await.unwrap();
    let agents = SqliteAgentRepository::new(pool.clone());
    let repo = SqliteAssignmentRepository::new(pool);

    agents.insert(&reviewer_agent("agent-1")).await.unwrap();
    repo.upsert(&AgentAssignment::new("nda", "agent-1", summarize_workflow()))
        .await
        .unwrap();
    repo.upsert(&AgentAssignment::new("lease", "agent-1", summarize_workflow()))
        .await
        .unwrap();

    agents.delete("agent-1").await.unwrap();

    assert!(repo.get("nda").await.unwrap().is_none());
    assert!(repo.get("lease").await.unwrap().is_none());
}

#[tokio::test]
async fn test_cached_repository_serves_writes_immediately() {
    let pool = create_migrated_test_pool().await.unwrap();
    let agents = SqliteAgentRepository::new(pool.clone());
    agents.insert(&reviewer_agent("agent-1")).await.unwrap();
    agents.insert(&reviewer_agent("agent-2")).await.unwrap();

    let cached = CachedAssignmentRepository::new(Arc::new(SqliteAssignmentRepository::new(pool)));

    cached
        .upsert(&AgentAssignment::new("nda", "agent-1", summarize_workflow()))
        .await
        .unwrap();

    // Prime the cache.
    let first = cached.get("nda").await.unwrap().unwrap();
    assert_eq!(first.agent_id, "agent-1");

    // A write through the cache invalidates the entry.
    cached
        .upsert(&AgentAssignment::new("nda", "agent-2", summarize_workflow()))
        .await
        .unwrap();
    let second = cached.get("nda").await.unwrap().unwrap();
    assert_eq!(second.agent_id, "agent-2");

    cached.delete("nda").await.unwrap();
    assert!(cached.get("nda").await.unwrap().is_none());
}
