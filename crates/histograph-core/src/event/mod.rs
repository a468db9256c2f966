//! Event data model for workflow execution histories.
//!
//! This module defines the [`HistoryEvent`] struct, the [`EventType`] enum
//! covering all 42 history event types, the [`EventKind`] wrapper that keeps
//! unrecognised tags instead of rejecting them, and the [`EventDetails`]
//! payload record.
//!
//! # JSON shape
//!
//! Events arrive already fetched and flattened by the surrounding
//! application:
//!
//! ```text
//! { "eventId": 5, "eventType": "ActivityTaskScheduled",
//!   "eventFullDetails": { "decisionTaskCompletedEventId": 4, ... } }
//! ```

pub mod details;
pub mod types;

pub use details::{EventDetails, WorkflowExecution};
pub use types::{EventType, UnknownEventType};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an event within one execution history.
///
/// Positive, unique, and strictly increasing with position in the history.
pub type EventId = u64;

// ---------------------------------------------------------------------------
// EventKind
// ---------------------------------------------------------------------------

/// The `eventType` tag of an event as it appeared on the wire.
///
/// Histories produced by newer servers may carry tags this build does not
/// know. Those are kept as [`EventKind::Unrecognized`] so a whole history
/// still loads; the dispatcher reports them as errors per event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    Known(EventType),
    Unrecognized(String),
}

impl EventKind {
    /// Return the known event type, if any.
    #[must_use]
    pub const fn known(&self) -> Option<EventType> {
        match self {
            Self::Known(et) => Some(*et),
            Self::Unrecognized(_) => None,
        }
    }

    /// Return the raw tag string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(et) => et.as_str(),
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Returns `true` if this is the given known type.
    #[must_use]
    pub fn is(&self, event_type: EventType) -> bool {
        self.known() == Some(event_type)
    }
}

impl From<EventType> for EventKind {
    fn from(et: EventType) -> Self {
        Self::Known(et)
    }
}

impl From<&str> for EventKind {
    fn from(raw: &str) -> Self {
        raw.parse::<EventType>()
            .map_or_else(|_| Self::Unrecognized(raw.to_string()), Self::Known)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EventKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s.as_str()))
    }
}

// ---------------------------------------------------------------------------
// HistoryEvent
// ---------------------------------------------------------------------------

/// A single event in a workflow execution history.
///
/// Events are immutable records. Connections between them are computed on
/// demand by [`crate::connections::get_event_connections`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEvent {
    pub event_id: EventId,

    pub event_type: EventKind,

    /// Type-dependent references and payload.
    #[serde(default)]
    pub event_full_details: EventDetails,
}

impl HistoryEvent {
    pub fn new(event_id: EventId, event_type: impl Into<EventKind>, details: EventDetails) -> Self {
        Self {
            event_id,
            event_type: event_type.into(),
            event_full_details: details,
        }
    }

    /// Shorthand for an event with an empty detail record.
    pub fn bare(event_id: EventId, event_type: impl Into<EventKind>) -> Self {
        Self::new(event_id, event_type, EventDetails::default())
    }
}

impl fmt::Display for HistoryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.event_id, self.event_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_kind_from_known_tag() {
        let kind = EventKind::from("TimerFired");
        assert_eq!(kind, EventKind::Known(EventType::TimerFired));
        assert_eq!(kind.known(), Some(EventType::TimerFired));
        assert!(kind.is(EventType::TimerFired));
    }

    #[test]
    fn event_kind_keeps_unknown_tag() {
        let kind = EventKind::from("WorkflowExecutionUpdated");
        assert_eq!(kind, EventKind::Unrecognized("WorkflowExecutionUpdated".into()));
        assert_eq!(kind.known(), None);
        assert_eq!(kind.as_str(), "WorkflowExecutionUpdated");
    }

    #[test]
    fn deserialize_history_event() {
        let event: HistoryEvent = serde_json::from_value(json!({
            "eventId": 7,
            "eventType": "ActivityTaskStarted",
            "eventFullDetails": { "scheduledEventId": 5, "identity": "worker-1" },
        }))
        .expect("deserialize");

        assert_eq!(event.event_id, 7);
        assert!(event.event_type.is(EventType::ActivityTaskStarted));
        assert_eq!(event.event_full_details.scheduled_event_id, Some(5));
        assert_eq!(event.event_full_details.extra["identity"], json!("worker-1"));
    }

    #[test]
    fn deserialize_tolerates_unknown_type_and_missing_details() {
        let event: HistoryEvent = serde_json::from_value(json!({
            "eventId": 3,
            "eventType": "SomethingNew",
        }))
        .expect("deserialize");

        assert_eq!(event.event_type, EventKind::Unrecognized("SomethingNew".into()));
        assert_eq!(event.event_full_details, EventDetails::default());
    }

    #[test]
    fn serialize_uses_wire_names() {
        let event = HistoryEvent::new(
            2,
            EventType::DecisionTaskStarted,
            EventDetails::default().with_scheduled(1),
        );
        let value = serde_json::to_value(&event).expect("serialize");
        assert_eq!(
            value,
            json!({
                "eventId": 2,
                "eventType": "DecisionTaskStarted",
                "eventFullDetails": { "scheduledEventId": 1 },
            })
        );
    }

    #[test]
    fn display_is_compact() {
        let event = HistoryEvent::bare(9, EventType::TimerStarted);
        assert_eq!(event.to_string(), "#9 TimerStarted");
    }
}
