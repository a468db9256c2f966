//! Detail payload (`eventFullDetails`) carried by every history event.
//!
//! The payload shape varies per event type. Rather than one struct per type,
//! the fields that edge extraction reads are modelled as optional typed
//! members; everything else is preserved in `extra` via `#[serde(flatten)]`
//! so round-tripping a payload never loses data.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use super::EventId;

// ---------------------------------------------------------------------------
// WorkflowExecution
// ---------------------------------------------------------------------------

/// Identity of one workflow execution: the workflow id plus the run id.
///
/// Used for cross-execution references (child workflows, parent workflow,
/// continue-as-new lineage).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowExecution {
    pub workflow_id: String,
    pub run_id: String,
}

impl WorkflowExecution {
    pub fn new(workflow_id: impl Into<String>, run_id: impl Into<String>) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            run_id: run_id.into(),
        }
    }
}

impl std::fmt::Display for WorkflowExecution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.workflow_id, self.run_id)
    }
}

// ---------------------------------------------------------------------------
// EventDetails
// ---------------------------------------------------------------------------

/// Type-dependent detail record of a history event.
///
/// Any reference field may be absent. A missing reference is a data-quality
/// issue the caller tolerates, never a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    /// Id of the `DecisionTaskCompleted` event whose decision produced this one.
    #[serde(
        default,
        deserialize_with = "de_opt_event_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub decision_task_completed_event_id: Option<EventId>,

    /// Id of the `*Scheduled` event this event follows.
    #[serde(
        default,
        deserialize_with = "de_opt_event_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub scheduled_event_id: Option<EventId>,

    /// Id of the `*Started` event this event closes.
    #[serde(
        default,
        deserialize_with = "de_opt_event_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub started_event_id: Option<EventId>,

    /// Id of the `*Initiated` event this event answers.
    #[serde(
        default,
        deserialize_with = "de_opt_event_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub initiated_event_id: Option<EventId>,

    /// Execution of a child workflow (child workflow events only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_execution: Option<WorkflowExecution>,

    /// Execution that started this one as a child (`WorkflowExecutionStarted`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_workflow_execution: Option<WorkflowExecution>,

    /// Run id of the execution this one continued from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continued_execution_run_id: Option<String>,

    /// Run id of the execution started by continue-as-new.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_execution_run_id: Option<String>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl EventDetails {
    #[must_use]
    pub fn with_decision_task_completed(mut self, id: EventId) -> Self {
        self.decision_task_completed_event_id = Some(id);
        self
    }

    #[must_use]
    pub fn with_scheduled(mut self, id: EventId) -> Self {
        self.scheduled_event_id = Some(id);
        self
    }

    #[must_use]
    pub fn with_started(mut self, id: EventId) -> Self {
        self.started_event_id = Some(id);
        self
    }

    #[must_use]
    pub fn with_initiated(mut self, id: EventId) -> Self {
        self.initiated_event_id = Some(id);
        self
    }

    #[must_use]
    pub fn with_workflow_execution(mut self, execution: WorkflowExecution) -> Self {
        self.workflow_execution = Some(execution);
        self
    }
}

/// History payloads encode 64-bit ids either as JSON numbers or, when they
/// pass through a JavaScript layer, as decimal strings. Accept both; `null`
/// reads as absent.
fn de_opt_event_id<'de, D>(deserializer: D) -> Result<Option<EventId>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(EventId),
        Text(String),
    }

    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawId::Number(id)) => Ok(Some(id)),
        Some(RawId::Text(s)) => s
            .trim()
            .parse::<EventId>()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid event id '{s}': {e}"))),
    }
}
