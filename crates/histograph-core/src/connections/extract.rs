//! Per-event-type connection rules.
//!
//! Each history event type names its parent through one detail field
//! (`decisionTaskCompletedEventId`, `scheduledEventId`, `startedEventId` or
//! `initiatedEventId`). Closing events additionally consult the successor
//! resolver, and some attach a status or a cross-execution reference.
//!
//! The match in [`connections_for`] is exhaustive over [`EventType`]: adding
//! a type to the enum does not compile until it has a rule here.

use crate::connections::resolver::find_child;
use crate::connections::{EventInfo, Status};
use crate::event::{EventId, EventType, HistoryEvent};
use crate::workflow::Workflow;

/// Which parts of the resolver result a rule keeps.
#[derive(Debug, Clone, Copy)]
enum Successor {
    /// Both chronological and inferred child.
    Both,
    ChronologicalOnly,
    InferredOnly,
}

/// Apply the rule for `event_type` to `event`.
///
/// `event_type` must be the known type of `event`; the dispatcher
/// ([`super::get_event_connections`]) guarantees this.
#[must_use]
pub fn connections_for(
    event_type: EventType,
    event: &HistoryEvent,
    workflow: &Workflow,
) -> EventInfo {
    let details = &event.event_full_details;

    match event_type {
        EventType::WorkflowExecutionStarted => EventInfo {
            // Fixed offset: the first decision task directly follows the
            // start event.
            inferred_child: event.event_id.checked_add(1),
            parent_workflow_execution: details.parent_workflow_execution.clone(),
            previous_execution_run_id: details.continued_execution_run_id.clone(),
            ..EventInfo::default()
        },

        // Opened by a decision.
        EventType::ActivityTaskScheduled
        | EventType::ActivityTaskCancelRequested
        | EventType::TimerStarted
        | EventType::MarkerRecorded
        | EventType::UpsertWorkflowSearchAttributes
        | EventType::SignalExternalWorkflowExecutionInitiated
        | EventType::RequestCancelExternalWorkflowExecutionInitiated
        | EventType::StartChildWorkflowExecutionInitiated
        | EventType::WorkflowExecutionCanceled => {
            EventInfo::with_parent(details.decision_task_completed_event_id)
        }

        // A decision that the server rejected.
        EventType::CancelTimerFailed
        | EventType::RequestCancelActivityTaskFailed
        | EventType::RequestCancelExternalWorkflowExecutionFailed
        | EventType::SignalExternalWorkflowExecutionFailed
        | EventType::StartChildWorkflowExecutionFailed
        | EventType::WorkflowExecutionFailed => EventInfo {
            status: Some(Status::Failed),
            ..EventInfo::with_parent(details.decision_task_completed_event_id)
        },

        EventType::WorkflowExecutionCompleted => EventInfo {
            status: Some(Status::Completed),
            ..EventInfo::with_parent(details.decision_task_completed_event_id)
        },

        EventType::WorkflowExecutionContinuedAsNew => EventInfo {
            status: Some(Status::Completed),
            new_execution_run_id: details.new_execution_run_id.clone(),
            ..EventInfo::with_parent(details.decision_task_completed_event_id)
        },

        EventType::ActivityTaskStarted
        | EventType::DecisionTaskStarted
        | EventType::DecisionTaskTimedOut => EventInfo::with_parent(details.scheduled_event_id),

        EventType::ActivityTaskCanceled
        | EventType::ChildWorkflowExecutionCanceled
        | EventType::ChildWorkflowExecutionTerminated
        | EventType::ChildWorkflowExecutionTimedOut
        | EventType::TimerCanceled => EventInfo::with_parent(details.started_event_id),

        EventType::DecisionTaskFailed => EventInfo {
            status: Some(Status::Failed),
            ..EventInfo::with_parent(details.started_event_id)
        },

        EventType::ActivityTaskCompleted | EventType::ActivityTaskTimedOut => {
            with_successor(event, workflow, details.started_event_id, Successor::Both)
        }

        EventType::ActivityTaskFailed => EventInfo {
            status: Some(Status::Failed),
            ..with_successor(event, workflow, details.started_event_id, Successor::Both)
        },

        EventType::ChildWorkflowExecutionStarted => EventInfo {
            child_route: details.workflow_execution.clone(),
            ..with_successor(event, workflow, details.initiated_event_id, Successor::Both)
        },

        EventType::ChildWorkflowExecutionCompleted => EventInfo {
            status: Some(Status::Completed),
            child_route: details.workflow_execution.clone(),
            ..with_successor(event, workflow, details.started_event_id, Successor::Both)
        },

        EventType::ChildWorkflowExecutionFailed => EventInfo {
            status: Some(Status::Failed),
            child_route: details.workflow_execution.clone(),
            ..with_successor(event, workflow, details.started_event_id, Successor::Both)
        },

        EventType::DecisionTaskCompleted => with_successor(
            event,
            workflow,
            details.started_event_id,
            Successor::ChronologicalOnly,
        ),

        EventType::ExternalWorkflowExecutionCancelRequested => {
            with_successor(event, workflow, details.initiated_event_id, Successor::Both)
        }

        EventType::ExternalWorkflowExecutionSignaled => with_successor(
            event,
            workflow,
            details.initiated_event_id,
            Successor::InferredOnly,
        ),

        EventType::TimerFired => with_successor(
            event,
            workflow,
            details.started_event_id,
            Successor::InferredOnly,
        ),

        // External signals: no parent in this history.
        EventType::WorkflowExecutionCancelRequested | EventType::WorkflowExecutionSignaled => {
            with_successor(event, workflow, None, Successor::InferredOnly)
        }

        // Roots of a decision cycle.
        EventType::DecisionTaskScheduled => EventInfo::default(),

        // Termination comes from outside the workflow; its cause is not
        // recorded in the history.
        EventType::WorkflowExecutionTerminated => EventInfo::default(),

        // Approximation: the timeout is attributed to the preceding event.
        EventType::WorkflowExecutionTimedOut => {
            EventInfo::with_parent(event.event_id.checked_sub(1).filter(|id| *id > 0))
        }
    }
}

fn with_successor(
    event: &HistoryEvent,
    workflow: &Workflow,
    parent: Option<EventId>,
    keep: Successor,
) -> EventInfo {
    let link = find_child(event, workflow);
    let (chronological_child, inferred_child) = match keep {
        Successor::Both => (link.chronological_child, link.inferred_child),
        Successor::ChronologicalOnly => (link.chronological_child, None),
        Successor::InferredOnly => (None, link.inferred_child),
    };

    EventInfo {
        parent,
        chronological_child,
        inferred_child,
        ..EventInfo::default()
    }
}
