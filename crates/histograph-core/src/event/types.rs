//! Event type enum covering all 42 workflow history event types.
//!
//! The string representation is the PascalCase tag the history service emits
//! in the `eventType` field (`ActivityTaskCompleted`, `TimerFired`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The 42 event types that can appear in a workflow execution history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    ActivityTaskCancelRequested,
    ActivityTaskCanceled,
    ActivityTaskCompleted,
    ActivityTaskFailed,
    ActivityTaskScheduled,
    ActivityTaskStarted,
    ActivityTaskTimedOut,
    CancelTimerFailed,
    ChildWorkflowExecutionCanceled,
    ChildWorkflowExecutionCompleted,
    ChildWorkflowExecutionFailed,
    ChildWorkflowExecutionStarted,
    ChildWorkflowExecutionTerminated,
    ChildWorkflowExecutionTimedOut,
    DecisionTaskCompleted,
    DecisionTaskFailed,
    /// Root of a decision cycle; the only type the successor scan reports
    /// as an inferred child.
    DecisionTaskScheduled,
    DecisionTaskStarted,
    DecisionTaskTimedOut,
    ExternalWorkflowExecutionCancelRequested,
    ExternalWorkflowExecutionSignaled,
    MarkerRecorded,
    RequestCancelActivityTaskFailed,
    RequestCancelExternalWorkflowExecutionFailed,
    RequestCancelExternalWorkflowExecutionInitiated,
    SignalExternalWorkflowExecutionFailed,
    SignalExternalWorkflowExecutionInitiated,
    StartChildWorkflowExecutionFailed,
    StartChildWorkflowExecutionInitiated,
    TimerCanceled,
    TimerFired,
    TimerStarted,
    UpsertWorkflowSearchAttributes,
    WorkflowExecutionCancelRequested,
    WorkflowExecutionCanceled,
    WorkflowExecutionCompleted,
    WorkflowExecutionContinuedAsNew,
    WorkflowExecutionFailed,
    WorkflowExecutionSignaled,
    /// First event of every execution.
    WorkflowExecutionStarted,
    WorkflowExecutionTerminated,
    WorkflowExecutionTimedOut,
}

/// Error returned when parsing an unknown event type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEventType {
    /// The unrecognised input string.
    pub raw: String,
}

impl fmt::Display for UnknownEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown event type '{}': expected one of {} history event tags",
            self.raw,
            EventType::ALL.len()
        )
    }
}

impl std::error::Error for UnknownEventType {}

impl EventType {
    /// All known event types, alphabetical by tag.
    pub const ALL: [Self; 42] = [
        Self::ActivityTaskCancelRequested,
        Self::ActivityTaskCanceled,
        Self::ActivityTaskCompleted,
        Self::ActivityTaskFailed,
        Self::ActivityTaskScheduled,
        Self::ActivityTaskStarted,
        Self::ActivityTaskTimedOut,
        Self::CancelTimerFailed,
        Self::ChildWorkflowExecutionCanceled,
        Self::ChildWorkflowExecutionCompleted,
        Self::ChildWorkflowExecutionFailed,
        Self::ChildWorkflowExecutionStarted,
        Self::ChildWorkflowExecutionTerminated,
        Self::ChildWorkflowExecutionTimedOut,
        Self::DecisionTaskCompleted,
        Self::DecisionTaskFailed,
        Self::DecisionTaskScheduled,
        Self::DecisionTaskStarted,
        Self::DecisionTaskTimedOut,
        Self::ExternalWorkflowExecutionCancelRequested,
        Self::ExternalWorkflowExecutionSignaled,
        Self::MarkerRecorded,
        Self::RequestCancelActivityTaskFailed,
        Self::RequestCancelExternalWorkflowExecutionFailed,
        Self::RequestCancelExternalWorkflowExecutionInitiated,
        Self::SignalExternalWorkflowExecutionFailed,
        Self::SignalExternalWorkflowExecutionInitiated,
        Self::StartChildWorkflowExecutionFailed,
        Self::StartChildWorkflowExecutionInitiated,
        Self::TimerCanceled,
        Self::TimerFired,
        Self::TimerStarted,
        Self::UpsertWorkflowSearchAttributes,
        Self::WorkflowExecutionCancelRequested,
        Self::WorkflowExecutionCanceled,
        Self::WorkflowExecutionCompleted,
        Self::WorkflowExecutionContinuedAsNew,
        Self::WorkflowExecutionFailed,
        Self::WorkflowExecutionSignaled,
        Self::WorkflowExecutionStarted,
        Self::WorkflowExecutionTerminated,
        Self::WorkflowExecutionTimedOut,
    ];

    /// Return the tag as emitted by the history service.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ActivityTaskCancelRequested => "ActivityTaskCancelRequested",
            Self::ActivityTaskCanceled => "ActivityTaskCanceled",
            Self::ActivityTaskCompleted => "ActivityTaskCompleted",
            Self::ActivityTaskFailed => "ActivityTaskFailed",
            Self::ActivityTaskScheduled => "ActivityTaskScheduled",
            Self::ActivityTaskStarted => "ActivityTaskStarted",
            Self::ActivityTaskTimedOut => "ActivityTaskTimedOut",
            Self::CancelTimerFailed => "CancelTimerFailed",
            Self::ChildWorkflowExecutionCanceled => "ChildWorkflowExecutionCanceled",
            Self::ChildWorkflowExecutionCompleted => "ChildWorkflowExecutionCompleted",
            Self::ChildWorkflowExecutionFailed => "ChildWorkflowExecutionFailed",
            Self::ChildWorkflowExecutionStarted => "ChildWorkflowExecutionStarted",
            Self::ChildWorkflowExecutionTerminated => "ChildWorkflowExecutionTerminated",
            Self::ChildWorkflowExecutionTimedOut => "ChildWorkflowExecutionTimedOut",
            Self::DecisionTaskCompleted => "DecisionTaskCompleted",
            Self::DecisionTaskFailed => "DecisionTaskFailed",
            Self::DecisionTaskScheduled => "DecisionTaskScheduled",
            Self::DecisionTaskStarted => "DecisionTaskStarted",
            Self::DecisionTaskTimedOut => "DecisionTaskTimedOut",
            Self::ExternalWorkflowExecutionCancelRequested => {
                "ExternalWorkflowExecutionCancelRequested"
            }
            Self::ExternalWorkflowExecutionSignaled => "ExternalWorkflowExecutionSignaled",
            Self::MarkerRecorded => "MarkerRecorded",
            Self::RequestCancelActivityTaskFailed => "RequestCancelActivityTaskFailed",
            Self::RequestCancelExternalWorkflowExecutionFailed => {
                "RequestCancelExternalWorkflowExecutionFailed"
            }
            Self::RequestCancelExternalWorkflowExecutionInitiated => {
                "RequestCancelExternalWorkflowExecutionInitiated"
            }
            Self::SignalExternalWorkflowExecutionFailed => "SignalExternalWorkflowExecutionFailed",
            Self::SignalExternalWorkflowExecutionInitiated => {
                "SignalExternalWorkflowExecutionInitiated"
            }
            Self::StartChildWorkflowExecutionFailed => "StartChildWorkflowExecutionFailed",
            Self::StartChildWorkflowExecutionInitiated => "StartChildWorkflowExecutionInitiated",
            Self::TimerCanceled => "TimerCanceled",
            Self::TimerFired => "TimerFired",
            Self::TimerStarted => "TimerStarted",
            Self::UpsertWorkflowSearchAttributes => "UpsertWorkflowSearchAttributes",
            Self::WorkflowExecutionCancelRequested => "WorkflowExecutionCancelRequested",
            Self::WorkflowExecutionCanceled => "WorkflowExecutionCanceled",
            Self::WorkflowExecutionCompleted => "WorkflowExecutionCompleted",
            Self::WorkflowExecutionContinuedAsNew => "WorkflowExecutionContinuedAsNew",
            Self::WorkflowExecutionFailed => "WorkflowExecutionFailed",
            Self::WorkflowExecutionSignaled => "WorkflowExecutionSignaled",
            Self::WorkflowExecutionStarted => "WorkflowExecutionStarted",
            Self::WorkflowExecutionTerminated => "WorkflowExecutionTerminated",
            Self::WorkflowExecutionTimedOut => "WorkflowExecutionTimedOut",
        }
    }

    /// External signals: transparent to successor resolution. The scan
    /// passes over them and never reports them as a child.
    #[must_use]
    pub const fn is_external_signal(self) -> bool {
        matches!(
            self,
            Self::WorkflowExecutionSignaled | Self::WorkflowExecutionCancelRequested
        )
    }

    /// Types whose computed parent is a known approximation.
    ///
    /// `WorkflowExecutionTerminated` reports no parent at all and
    /// `WorkflowExecutionTimedOut` reports `eventId - 1`. Neither should be
    /// trusted as an exact causal link.
    #[must_use]
    pub const fn has_approximate_parent(self) -> bool {
        matches!(
            self,
            Self::WorkflowExecutionTerminated | Self::WorkflowExecutionTimedOut
        )
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|et| et.as_str() == s)
            .ok_or_else(|| UnknownEventType { raw: s.to_string() })
    }
}

// Custom serde: serialize as the bare tag string.
impl Serialize for EventType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}
