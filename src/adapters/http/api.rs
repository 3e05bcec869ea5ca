//! HTTP API for assignments, classification, and the document-type catalog.
//!
//! The wire format uses camelCase field names to match the admin UI client.
//! Posting an assignment with an empty `agentId` is interpreted as an
//! unassign, so the UI's single save endpoint covers both operations.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::domain::errors::DomainError;
use crate::domain::models::{
    AgentAssignment, Catalog, FallbackResult, StepResult, TestResult, Workflow,
};
use crate::infrastructure::config::ServerConfig;
use crate::services::classifier;
use crate::services::AssignmentService;

/// Request to save or clear an assignment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveAssignmentRequest {
    pub document_type_id: String,
    /// Empty string clears the assignment for the document type.
    #[serde(default)]
    pub agent_id: String,
    #[serde(default)]
    pub workflow: Option<Workflow>,
}

/// Request to test an assignment against a sample document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestAssignmentRequest {
    pub document_type_id: String,
    pub sample_document_id: String,
}

/// Request to classify raw document content.
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub content: String,
}

/// Assignment as exposed over the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResponse {
    pub document_type_id: String,
    pub agent_id: String,
    pub workflow: Workflow,
    pub created_at: String,
    pub updated_at: String,
}

/// Test run result as exposed over the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResultResponse {
    pub id: String,
    pub document_type_id: String,
    pub agent_id: String,
    pub sample_document_id: String,
    pub status: String,
    pub steps: Vec<StepResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FallbackResult>,
    pub started_at: String,
    pub finished_at: String,
}

/// Classification outcome.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyResponse {
    /// `null` when nothing in the catalog matched.
    pub document_type_id: Option<String>,
}

/// One selectable document type.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTypeResponse {
    pub id: String,
    pub display_label: String,
    pub category: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Shared state for the API server.
struct AppState {
    service: Arc<AssignmentService>,
    catalog: Arc<Catalog>,
}

/// Assignments HTTP server.
pub struct ApiServer {
    config: ServerConfig,
    service: Arc<AssignmentService>,
    catalog: Arc<Catalog>,
}

impl ApiServer {
    pub fn new(service: Arc<AssignmentService>, catalog: Arc<Catalog>, config: ServerConfig) -> Self {
        Self {
            config,
            service,
            catalog,
        }
    }

    /// Build the router.
    pub fn build_router(&self) -> Router {
        let state = Arc::new(AppState {
            service: Arc::clone(&self.service),
            catalog: Arc::clone(&self.catalog),
        });

        let app = Router::new()
            .route("/api/agent-assignments", get(list_assignments))
            .route("/api/agent-assignments", post(save_assignment))
            .route("/api/agent-assignments/{document_type_id}", get(get_assignment))
            .route(
                "/api/agent-assignments/{document_type_id}",
                delete(remove_assignment),
            )
            .route("/api/agent-assignments/test", post(test_assignment))
            .route("/api/document-types", get(list_document_types))
            .route("/api/documents/classify", post(classify_document))
            .route("/health", get(health_check))
            .with_state(state);

        if self.config.enable_cors {
            app.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .layer(TraceLayer::new_for_http())
        } else {
            app.layer(TraceLayer::new_for_http())
        }
    }

    /// Start the server.
    pub async fn serve(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port).parse()?;
        let router = self.build_router();

        info!("Assignments HTTP server listening on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router).await?;
        Ok(())
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(
        self,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port).parse()?;
        let router = self.build_router();

        info!("Assignments HTTP server listening on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

// Handler functions

async fn health_check() -> &'static str {
    "OK"
}

async fn list_assignments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AssignmentResponse>>, (StatusCode, Json<ErrorResponse>)> {
    match state.service.list_assignments().await {
        Ok(assignments) => Ok(Json(assignments.iter().map(to_assignment_response).collect())),
        Err(e) => Err(map_error(&e)),
    }
}

async fn get_assignment(
    State(state): State<Arc<AppState>>,
    Path(document_type_id): Path<String>,
) -> Result<Json<AssignmentResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.service.get_assignment(&document_type_id).await {
        Ok(Some(assignment)) => Ok(Json(to_assignment_response(&assignment))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("No assignment for document type '{document_type_id}'"),
                code: "NOT_ASSIGNED".to_string(),
            }),
        )),
        Err(e) => Err(map_error(&e)),
    }
}

async fn save_assignment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SaveAssignmentRequest>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    if req.agent_id.trim().is_empty() {
        match state.service.unassign(&req.document_type_id).await {
            Ok(()) => return Ok(StatusCode::NO_CONTENT.into_response()),
            Err(e) => return Err(map_error(&e)),
        }
    }

    let Some(workflow) = req.workflow else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "workflow is required when agentId is set".to_string(),
                code: "VALIDATION_ERROR".to_string(),
            }),
        ));
    };

    match state
        .service
        .assign(&req.document_type_id, &req.agent_id, workflow)
        .await
    {
        Ok(assignment) => {
            Ok((StatusCode::OK, Json(to_assignment_response(&assignment))).into_response())
        }
        Err(e) => Err(map_error(&e)),
    }
}

async fn remove_assignment(
    State(state): State<Arc<AppState>>,
    Path(document_type_id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    match state.service.unassign(&document_type_id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(map_error(&e)),
    }
}

async fn test_assignment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TestAssignmentRequest>,
) -> Result<Json<TestResultResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state
        .service
        .test_assignment(&req.document_type_id, &req.sample_document_id)
        .await
    {
        Ok(result) => Ok(Json(to_test_response(result))),
        Err(e) => Err(map_error(&e)),
    }
}

async fn list_document_types(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<DocumentTypeResponse>> {
    let options = classifier::list_document_type_options(&state.catalog);
    Json(
        options
            .into_iter()
            .map(|o| DocumentTypeResponse {
                id: o.id,
                display_label: o.display_label,
                category: o.category,
            })
            .collect(),
    )
}

async fn classify_document(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ClassifyRequest>,
) -> Json<ClassifyResponse> {
    let document_type_id = classifier::detect_document_type(&req.content, &state.catalog);
    Json(ClassifyResponse { document_type_id })
}

fn to_assignment_response(assignment: &AgentAssignment) -> AssignmentResponse {
    AssignmentResponse {
        document_type_id: assignment.document_type_id.clone(),
        agent_id: assignment.agent_id.clone(),
        workflow: assignment.workflow.clone(),
        created_at: assignment.created_at.to_rfc3339(),
        updated_at: assignment.updated_at.to_rfc3339(),
    }
}

fn to_test_response(result: TestResult) -> TestResultResponse {
    TestResultResponse {
        id: result.id.to_string(),
        document_type_id: result.document_type_id,
        agent_id: result.agent_id,
        sample_document_id: result.sample_document_id,
        status: result.status.to_string(),
        steps: result.steps,
        fallback: result.fallback,
        started_at: result.started_at.to_rfc3339(),
        finished_at: result.finished_at.to_rfc3339(),
    }
}

fn map_error(err: &DomainError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code) = match err {
        DomainError::NotAssigned(_) => (StatusCode::NOT_FOUND, "NOT_ASSIGNED"),
        DomainError::AgentNotFound(_) | DomainError::DocumentNotFound(_) => {
            (StatusCode::NOT_FOUND, "NOT_FOUND")
        }
        DomainError::ValidationFailed(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code: code.to_string(),
        }),
    )
}
