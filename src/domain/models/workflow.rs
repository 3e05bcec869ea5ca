//! Workflow definitions and execution results.
//!
//! A workflow is the ordered set of processing steps bound to an agent
//! assignment, plus exactly one fallback invoked when the steps cannot
//! complete. Step order is execution order; an empty step list is legal and
//! triggers the fallback immediately.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Maximum number of steps a workflow may contain.
pub const MAX_WORKFLOW_STEPS: usize = 32;

/// Maximum per-step retry count accepted at the store boundary.
pub const MAX_STEP_RETRIES: u32 = 10;

/// The closed set of recognized workflow step actions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StepAction {
    ExtractClauses,
    ExtractParties,
    Summarize,
    AssessRisk,
    CheckCompleteness,
    FlagForReview,
    NotifyReviewer,
    Archive,
}

impl StepAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExtractClauses => "extract_clauses",
            Self::ExtractParties => "extract_parties",
            Self::Summarize => "summarize",
            Self::AssessRisk => "assess_risk",
            Self::CheckCompleteness => "check_completeness",
            Self::FlagForReview => "flag_for_review",
            Self::NotifyReviewer => "notify_reviewer",
            Self::Archive => "archive",
        }
    }
}

impl fmt::Display for StepAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StepAction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "extract_clauses" => Ok(Self::ExtractClauses),
            "extract_parties" => Ok(Self::ExtractParties),
            "summarize" => Ok(Self::Summarize),
            "assess_risk" => Ok(Self::AssessRisk),
            "check_completeness" => Ok(Self::CheckCompleteness),
            "flag_for_review" => Ok(Self::FlagForReview),
            "notify_reviewer" => Ok(Self::NotifyReviewer),
            "archive" => Ok(Self::Archive),
            _ => Err(anyhow::anyhow!("Unknown step action: {s}")),
        }
    }
}

/// One step of a workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStep {
    /// Action performed against the document.
    pub action: StepAction,

    /// Upper bound for one attempt, in milliseconds.
    pub timeout_ms: u64,

    /// Additional attempts after the first failure. Defaults to 0.
    #[serde(default)]
    pub retries: u32,

    /// Forward-compatible extension bag for fields this version does not
    /// recognize.
    #[serde(flatten, default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl WorkflowStep {
    pub fn new(action: StepAction, timeout_ms: u64) -> Self {
        Self {
            action,
            timeout_ms,
            retries: 0,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }
}

/// Action taken when the step sequence is exhausted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fallback {
    /// Action executed once, without retries.
    pub action: StepAction,

    /// Optional recipient for the fallback notification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<String>,
}

/// Ordered steps plus exactly one fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    #[serde(default)]
    pub steps: Vec<WorkflowStep>,
    pub fallback: Fallback,
}

impl Workflow {
    /// Validate the workflow at the store boundary.
    pub fn validate(&self) -> Result<(), String> {
        if self.steps.len() > MAX_WORKFLOW_STEPS {
            return Err(format!(
                "Workflow has {} steps, maximum is {}",
                self.steps.len(),
                MAX_WORKFLOW_STEPS
            ));
        }
        for (index, step) in self.steps.iter().enumerate() {
            if step.timeout_ms == 0 {
                return Err(format!(
                    "Step {} ({}) has a zero timeout",
                    index, step.action
                ));
            }
            if step.retries > MAX_STEP_RETRIES {
                return Err(format!(
                    "Step {} ({}) requests {} retries, maximum is {}",
                    index, step.action, step.retries, MAX_STEP_RETRIES
                ));
            }
        }
        Ok(())
    }
}

/// Final status of one workflow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Every step succeeded.
    Completed,
    /// A step exhausted its retries and the fallback action succeeded.
    FellBack,
    /// The fallback action itself failed.
    Failed,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::FellBack => write!(f, "fell_back"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Outcome of one step, attempts included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    pub action: StepAction,
    /// Total attempts made (1 initial + retries actually used).
    pub attempts: u32,
    pub succeeded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration_ms: u64,
}

/// Outcome of the fallback action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackResult {
    pub action: StepAction,
    pub succeeded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Whether a fallback notification was handed to the notifier.
    pub notified: bool,
}

/// Accumulated result of one workflow run over a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRun {
    pub status: RunStatus,
    pub steps: Vec<StepResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FallbackResult>,
}

/// Result of a `test_assignment` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    /// Identifier of this test run.
    pub id: Uuid,
    pub document_type_id: String,
    pub agent_id: String,
    pub sample_document_id: String,
    pub status: RunStatus,
    pub steps: Vec<StepResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FallbackResult>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_action_round_trip() {
        for action in [
            StepAction::ExtractClauses,
            StepAction::Summarize,
            StepAction::NotifyReviewer,
        ] {
            assert_eq!(action.as_str().parse::<StepAction>().unwrap(), action);
        }
        assert!("transmogrify".parse::<StepAction>().is_err());
    }

    #[test]
    fn test_step_retries_default_to_zero() {
        let step: WorkflowStep =
            serde_json::from_str(r#"{"action": "summarize", "timeout_ms": 5000}"#).unwrap();
        assert_eq!(step.retries, 0);
        assert!(step.extra.is_empty());
    }

    #[test]
    fn test_unknown_step_fields_land_in_extension_bag() {
        let step: WorkflowStep = serde_json::from_str(
            r#"{"action": "summarize", "timeout_ms": 5000, "model": "fast"}"#,
        )
        .unwrap();
        assert_eq!(step.extra.get("model"), Some(&Value::from("fast")));
    }

    #[test]
    fn test_empty_steps_are_legal() {
        let workflow = Workflow {
            steps: vec![],
            fallback: Fallback {
                action: StepAction::NotifyReviewer,
                notification: None,
            },
        };
        assert!(workflow.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let workflow = Workflow {
            steps: vec![WorkflowStep::new(StepAction::Summarize, 0)],
            fallback: Fallback {
                action: StepAction::NotifyReviewer,
                notification: None,
            },
        };
        assert!(workflow.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_excessive_retries() {
        let workflow = Workflow {
            steps: vec![
                WorkflowStep::new(StepAction::Summarize, 1000).with_retries(MAX_STEP_RETRIES + 1),
            ],
            fallback: Fallback {
                action: StepAction::NotifyReviewer,
                notification: None,
            },
        };
        assert!(workflow.validate().is_err());
    }
}
