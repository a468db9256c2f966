use histograph_core::{
    EventType, GraphConfig, HistoryGraph, Workflow, find_child, get_event_connections,
};
use proptest::prelude::*;

use generators::*;

const CHRONOLOGICAL_TYPES: [EventType; 8] = [
    EventType::ActivityTaskCompleted,
    EventType::ActivityTaskFailed,
    EventType::ActivityTaskTimedOut,
    EventType::ChildWorkflowExecutionStarted,
    EventType::ChildWorkflowExecutionCompleted,
    EventType::ChildWorkflowExecutionFailed,
    EventType::DecisionTaskCompleted,
    EventType::ExternalWorkflowExecutionCancelRequested,
];

const STATUS_TYPES: [EventType; 12] = [
    EventType::ActivityTaskFailed,
    EventType::CancelTimerFailed,
    EventType::ChildWorkflowExecutionCompleted,
    EventType::ChildWorkflowExecutionFailed,
    EventType::DecisionTaskFailed,
    EventType::RequestCancelActivityTaskFailed,
    EventType::RequestCancelExternalWorkflowExecutionFailed,
    EventType::SignalExternalWorkflowExecutionFailed,
    EventType::StartChildWorkflowExecutionFailed,
    EventType::WorkflowExecutionCompleted,
    EventType::WorkflowExecutionContinuedAsNew,
    EventType::WorkflowExecutionFailed,
];

fn type_of(workflow: &Workflow, index: usize) -> EventType {
    workflow.events()[index]
        .event_type
        .known()
        .expect("generated types are known")
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(2000))]

    #[test]
    fn connections_are_deterministic(wf in arb_workflow()) {
        for event in &wf {
            let a = get_event_connections(event, &wf).expect("known type");
            let b = get_event_connections(event, &wf).expect("known type");
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn next_decision_scheduled_is_always_inferred(wf in arb_workflow()) {
        let events = wf.events();
        for pair in events.windows(2) {
            if pair[1].event_type.is(EventType::DecisionTaskScheduled) {
                let link = find_child(&pair[0], &wf);
                prop_assert_eq!(link.inferred_child, Some(pair[1].event_id));
                prop_assert_eq!(link.chronological_child, None);
            }
        }
    }

    #[test]
    fn external_signals_are_never_children(wf in arb_workflow()) {
        for event in &wf {
            let link = find_child(event, &wf);
            for id in [link.inferred_child, link.chronological_child].into_iter().flatten() {
                let child = wf.get(id).expect("child is in the workflow");
                let child_type = child.event_type.known().expect("known type");
                prop_assert!(!child_type.is_external_signal());
            }
        }
    }

    #[test]
    fn children_come_strictly_later(wf in arb_workflow()) {
        for (index, event) in wf.iter().enumerate() {
            let link = find_child(event, &wf);
            prop_assert!(link.inferred_child.is_none() || link.chronological_child.is_none());
            for id in [link.inferred_child, link.chronological_child].into_iter().flatten() {
                let child_index = wf.position(id).expect("child is in the workflow");
                prop_assert!(child_index > index);
            }
        }
    }

    #[test]
    fn empty_result_means_no_qualifying_successor(wf in arb_workflow()) {
        for (index, event) in wf.iter().enumerate() {
            if !find_child(event, &wf).is_empty() {
                continue;
            }
            let rest = (index + 1)..wf.len();
            if type_of(&wf, index) == EventType::WorkflowExecutionSignaled {
                prop_assert!(rest
                    .clone()
                    .all(|i| type_of(&wf, i) != EventType::DecisionTaskScheduled));
            } else {
                prop_assert!(rest.clone().all(|i| type_of(&wf, i).is_external_signal()));
            }
        }
    }

    #[test]
    fn field_sets_follow_the_type(wf in arb_workflow()) {
        for (index, event) in wf.iter().enumerate() {
            let et = type_of(&wf, index);
            let info = get_event_connections(event, &wf).expect("known type");

            if !CHRONOLOGICAL_TYPES.contains(&et) {
                prop_assert_eq!(info.chronological_child, None, "{}", et);
            }
            prop_assert_eq!(info.status.is_some(), STATUS_TYPES.contains(&et), "{}", et);
            if info.child_route.is_some() {
                prop_assert!(et.as_str().starts_with("ChildWorkflowExecution"));
            }
            if et == EventType::DecisionTaskScheduled || et == EventType::WorkflowExecutionTerminated {
                prop_assert!(info.is_empty());
            }
        }
    }

    #[test]
    fn graph_edges_never_dangle(wf in arb_workflow()) {
        let graph = HistoryGraph::build(&wf, &GraphConfig::default()).expect("build");
        prop_assert_eq!(graph.len(), wf.len());
        for edge in graph.edges() {
            prop_assert!(wf.contains(edge.from));
            prop_assert!(wf.contains(edge.to));
        }
    }
}
