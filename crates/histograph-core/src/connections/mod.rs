//! Per-event connection records for history graph rendering.
//!
//! # Entry point
//!
//! [`get_event_connections`] takes one event and the full [`Workflow`] and
//! returns an [`EventInfo`]: the event's parent, its chronological or
//! inferred child, a terminal status annotation, and any cross-execution
//! references. Callers invoke it once per event to assemble the full edge
//! set (see [`crate::graph::HistoryGraph`] for a ready-made assembly).
//!
//! # Sub-modules
//!
//! - [`resolver`]: forward scan for successors that are not named in an
//!   event's own details ([`find_child`]).
//! - [`extract`]: the per-type rule table ([`connections_for`]).
//!
//! # Approximate results
//!
//! `WorkflowExecutionTerminated` yields no parent and
//! `WorkflowExecutionTimedOut` yields `eventId - 1`; see
//! [`EventType::has_approximate_parent`].
//!
//! [`EventType::has_approximate_parent`]: crate::event::EventType::has_approximate_parent

pub mod extract;
pub mod resolver;

pub use extract::connections_for;
pub use resolver::{ChildLink, find_child};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::ConnectionError;
use crate::event::{EventId, EventKind, HistoryEvent, WorkflowExecution};
use crate::workflow::Workflow;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Terminal outcome annotation attached to closing events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Completed,
    Failed,
}

impl Status {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EventInfo
// ---------------------------------------------------------------------------

/// Connections of one event, as consumed by the visualization layer.
///
/// Every field is optional. Which fields a given event type can populate is
/// fixed by its rule in [`extract`]; a field that the rule reads from the
/// event's details stays absent when the detail is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInfo {
    /// The event that caused this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<EventId>,

    /// The next event in sequence that depends on this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chronological_child: Option<EventId>,

    /// A non-adjacent or type-implied consequence of this event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inferred_child: Option<EventId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,

    /// Child execution this event links to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_route: Option<WorkflowExecution>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_workflow_execution: Option<WorkflowExecution>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_execution_run_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_execution_run_id: Option<String>,
}

impl EventInfo {
    /// A record with only `parent` set (which may itself be absent).
    #[must_use]
    pub fn with_parent(parent: Option<EventId>) -> Self {
        Self {
            parent,
            ..Self::default()
        }
    }

    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Event ids this record points at, paired with the field they came from.
    pub fn references(&self) -> impl Iterator<Item = (&'static str, EventId)> + '_ {
        [
            ("parent", self.parent),
            ("chronologicalChild", self.chronological_child),
            ("inferredChild", self.inferred_child),
        ]
        .into_iter()
        .filter_map(|(field, id)| id.map(|id| (field, id)))
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Compute the connections of `event` within `workflow`.
///
/// Pure: identical inputs always yield identical output, and neither input
/// is modified.
///
/// # Errors
///
/// Returns [`ConnectionError::UnknownEventType`] if the event carries a type
/// tag this build has no rule for.
pub fn get_event_connections(
    event: &HistoryEvent,
    workflow: &Workflow,
) -> Result<EventInfo, ConnectionError> {
    match &event.event_type {
        EventKind::Known(event_type) => {
            trace!(event_id = event.event_id, %event_type, "computing connections");
            Ok(connections_for(*event_type, event, workflow))
        }
        EventKind::Unrecognized(tag) => Err(ConnectionError::UnknownEventType {
            event_id: event.event_id,
            tag: tag.clone(),
        }),
    }
}
