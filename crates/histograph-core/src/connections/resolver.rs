//! Successor resolution: the next event linked to a given one.
//!
//! Most history events do not name their successor. The resolver scans
//! forward from an event and classifies the first relevant later event:
//!
//! - A `DecisionTaskScheduled` immediately after the event is always an
//!   **inferred** child, whatever the event's own type.
//! - After a `WorkflowExecutionSignaled`, the first later
//!   `DecisionTaskScheduled` is the inferred child.
//! - Otherwise the first later event that is not an external signal
//!   (`WorkflowExecutionSignaled`, `WorkflowExecutionCancelRequested`) is the
//!   **chronological** child.
//!
//! External signals are never reported as a child by this scan.

use tracing::debug;

use crate::event::{EventId, EventType, HistoryEvent};
use crate::workflow::Workflow;

/// Result of successor resolution. At most one field is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChildLink {
    pub inferred_child: Option<EventId>,
    pub chronological_child: Option<EventId>,
}

impl ChildLink {
    const fn inferred(id: EventId) -> Self {
        Self {
            inferred_child: Some(id),
            chronological_child: None,
        }
    }

    const fn chronological(id: EventId) -> Self {
        Self {
            inferred_child: None,
            chronological_child: Some(id),
        }
    }

    /// Returns `true` if no successor was found.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.inferred_child.is_none() && self.chronological_child.is_none()
    }
}

/// Find the chronological or inferred child of `event` within `workflow`.
///
/// Runs in O(n) over the events after `event`. Returns an empty link when
/// `event` is the last event, when no qualifying successor exists, or when
/// `event` is not part of `workflow`.
#[must_use]
pub fn find_child(event: &HistoryEvent, workflow: &Workflow) -> ChildLink {
    let Some(rest) = workflow.events_after(event) else {
        debug!(
            event_id = event.event_id,
            "event not found in workflow; no successor"
        );
        return ChildLink::default();
    };

    let Some(next) = rest.first() else {
        return ChildLink::default();
    };

    if next.event_type.is(EventType::DecisionTaskScheduled) {
        return ChildLink::inferred(next.event_id);
    }

    if event.event_type.is(EventType::WorkflowExecutionSignaled) {
        // A signal's consequence is the decision it schedules; everything
        // in between is passed over.
        return rest
            .iter()
            .find(|candidate| candidate.event_type.is(EventType::DecisionTaskScheduled))
            .map_or_else(ChildLink::default, |found| ChildLink::inferred(found.event_id));
    }

    rest.iter()
        .find(|candidate| !is_external_signal(candidate))
        .map_or_else(ChildLink::default, |found| {
            ChildLink::chronological(found.event_id)
        })
}

fn is_external_signal(event: &HistoryEvent) -> bool {
    event
        .event_type
        .known()
        .is_some_and(EventType::is_external_signal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType::{
        ActivityTaskCompleted, ActivityTaskScheduled, DecisionTaskCompleted,
        DecisionTaskScheduled, DecisionTaskStarted, MarkerRecorded, TimerFired,
        WorkflowExecutionCancelRequested, WorkflowExecutionSignaled, WorkflowExecutionStarted,
    };

    fn history(types: &[EventType]) -> Workflow {
        types
            .iter()
            .zip(1..)
            .map(|(et, id)| HistoryEvent::bare(id, *et))
            .collect()
    }

    fn resolve(wf: &Workflow, id: EventId) -> ChildLink {
        let event = wf.get(id).expect("event in workflow");
        find_child(event, wf)
    }

    #[test]
    fn last_event_has_no_child() {
        let wf = history(&[WorkflowExecutionStarted, DecisionTaskScheduled]);
        assert!(resolve(&wf, 2).is_empty());
    }

    #[test]
    fn next_decision_scheduled_is_inferred() {
        let wf = history(&[ActivityTaskCompleted, DecisionTaskScheduled, DecisionTaskStarted]);
        assert_eq!(resolve(&wf, 1), ChildLink::inferred(2));
    }

    #[test]
    fn next_decision_scheduled_wins_for_signals_too() {
        let wf = history(&[WorkflowExecutionSignaled, DecisionTaskScheduled]);
        assert_eq!(resolve(&wf, 1), ChildLink::inferred(2));
    }

    #[test]
    fn general_case_takes_next_event_as_chronological() {
        let wf = history(&[DecisionTaskCompleted, ActivityTaskScheduled, MarkerRecorded]);
        assert_eq!(resolve(&wf, 1), ChildLink::chronological(2));
    }

    #[test]
    fn general_case_skips_external_signals() {
        let wf = history(&[
            ActivityTaskCompleted,
            WorkflowExecutionSignaled,
            WorkflowExecutionCancelRequested,
            WorkflowExecutionSignaled,
            TimerFired,
        ]);
        assert_eq!(resolve(&wf, 1), ChildLink::chronological(5));
    }

    #[test]
    fn general_case_decision_after_signals_is_chronological() {
        // Only the *immediately* next decision task is inferred.
        let wf = history(&[
            ActivityTaskCompleted,
            WorkflowExecutionSignaled,
            DecisionTaskScheduled,
        ]);
        assert_eq!(resolve(&wf, 1), ChildLink::chronological(3));
    }

    #[test]
    fn general_case_only_signals_left_is_empty() {
        let wf = history(&[
            ActivityTaskCompleted,
            WorkflowExecutionSignaled,
            WorkflowExecutionCancelRequested,
        ]);
        assert!(resolve(&wf, 1).is_empty());
    }

    #[test]
    fn signal_skips_to_next_decision_scheduled() {
        let wf = history(&[
            WorkflowExecutionSignaled,
            WorkflowExecutionCancelRequested,
            DecisionTaskScheduled,
        ]);
        assert_eq!(resolve(&wf, 1), ChildLink::inferred(3));
    }

    #[test]
    fn signal_passes_over_non_decision_events() {
        let wf = history(&[
            WorkflowExecutionSignaled,
            ActivityTaskCompleted,
            WorkflowExecutionSignaled,
            DecisionTaskScheduled,
        ]);
        assert_eq!(resolve(&wf, 1), ChildLink::inferred(4));
    }

    #[test]
    fn signal_without_decision_is_empty() {
        let wf = history(&[WorkflowExecutionSignaled, ActivityTaskCompleted, TimerFired]);
        assert!(resolve(&wf, 1).is_empty());
    }

    #[test]
    fn sparse_ids_resolve_by_position() {
        let wf = Workflow::from_events(vec![
            HistoryEvent::bare(10, ActivityTaskCompleted),
            HistoryEvent::bare(20, WorkflowExecutionSignaled),
            HistoryEvent::bare(30, MarkerRecorded),
        ]);
        assert_eq!(resolve(&wf, 10), ChildLink::chronological(30));
    }

    #[test]
    fn foreign_event_is_empty() {
        let wf = history(&[ActivityTaskCompleted, MarkerRecorded]);
        let stranger = HistoryEvent::bare(99, ActivityTaskCompleted);
        assert!(find_child(&stranger, &wf).is_empty());
    }

    #[test]
    fn unrecognized_events_are_ordinary_successors() {
        let wf = Workflow::from_events(vec![
            HistoryEvent::bare(1, ActivityTaskCompleted),
            HistoryEvent::bare(2, "WorkflowPropertiesModified"),
        ]);
        assert_eq!(resolve(&wf, 1), ChildLink::chronological(2));
    }
}
