//! Ordered execution history with O(1) position lookup.
//!
//! A [`Workflow`] owns the chronologically ordered events of one execution
//! and an `EventId -> index` map built once at construction. Successor
//! resolution uses the map to find where an event sits in the sequence, so
//! sparse or filtered histories (ids that are not `position + 1`) still
//! resolve against the right neighbours.
//!
//! # Duplicates
//!
//! Well-formedness is the caller's concern. If two events share an id, the
//! first occurrence wins the position lookup.

use std::collections::HashMap;

use crate::error::ConnectionError;
use crate::event::{EventId, HistoryEvent};

/// The ordered event sequence of a single workflow execution.
///
/// Immutable once built; all connection queries borrow it.
#[derive(Debug, Clone, Default)]
pub struct Workflow {
    events: Vec<HistoryEvent>,
    positions: HashMap<EventId, usize>,
}

impl Workflow {
    /// Build a workflow from events already in chronological order.
    #[must_use]
    pub fn from_events(events: Vec<HistoryEvent>) -> Self {
        let mut positions = HashMap::with_capacity(events.len());
        for (index, event) in events.iter().enumerate() {
            positions.entry(event.event_id).or_insert(index);
        }
        Self { events, positions }
    }

    /// Parse a JSON array of history events.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::MalformedHistory`] if the payload is not an
    /// array of `{eventId, eventType, eventFullDetails}` records. Unknown
    /// event type tags are accepted here and rejected per event by the
    /// dispatcher.
    pub fn from_json(json: &str) -> Result<Self, ConnectionError> {
        let events: Vec<HistoryEvent> = serde_json::from_str(json)?;
        Ok(Self::from_events(events))
    }

    /// Number of events in the history.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if the history has no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events in chronological order.
    #[must_use]
    pub fn events(&self) -> &[HistoryEvent] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEvent> {
        self.events.iter()
    }

    /// Zero-based position of the event with the given id.
    #[must_use]
    pub fn position(&self, id: EventId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Look up an event by id.
    #[must_use]
    pub fn get(&self, id: EventId) -> Option<&HistoryEvent> {
        self.position(id).map(|index| &self.events[index])
    }

    /// Returns `true` if an event with the given id is in the history.
    #[must_use]
    pub fn contains(&self, id: EventId) -> bool {
        self.positions.contains_key(&id)
    }

    /// The events strictly after `event` in sequence order.
    ///
    /// Returns `None` if `event` is not part of this history.
    #[must_use]
    pub fn events_after(&self, event: &HistoryEvent) -> Option<&[HistoryEvent]> {
        self.position(event.event_id)
            .map(|index| &self.events[index + 1..])
    }
}

impl<'a> IntoIterator for &'a Workflow {
    type Item = &'a HistoryEvent;
    type IntoIter = std::slice::Iter<'a, HistoryEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl FromIterator<HistoryEvent> for Workflow {
    fn from_iter<I: IntoIterator<Item = HistoryEvent>>(iter: I) -> Self {
        Self::from_events(iter.into_iter().collect())
    }
}
