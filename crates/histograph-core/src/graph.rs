//! Whole-history edge set assembled from per-event connections.
//!
//! [`HistoryGraph::build`] runs [`get_event_connections`] over every event
//! of a [`Workflow`] and turns the resulting [`EventInfo`] records into
//! directed edges, indexed for parent/child lookup in both directions.
//!
//! # Edge direction
//!
//! All edges point from cause to consequence:
//!
//! - `parent -> event` for [`EdgeKind::Parent`]
//! - `event -> child` for [`EdgeKind::Chronological`] and [`EdgeKind::Inferred`]
//!
//! # Dangling references
//!
//! An `EventInfo` may point at an id that is not in the history (a
//! truncated history, or the `eventId + 1` guess of the start event on a
//! one-event history). Such edges are dropped with a warning, so every
//! edge endpoint is a node of the graph.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::GraphConfig;
use crate::connections::{EventInfo, get_event_connections};
use crate::error::ConnectionError;
use crate::event::{EventId, EventKind};
use crate::workflow::Workflow;

// ---------------------------------------------------------------------------
// Edge
// ---------------------------------------------------------------------------

/// How two events are related.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Parent,
    Chronological,
    Inferred,
}

/// A directed edge between two events of the same history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: EventId,
    pub to: EventId,
    pub kind: EdgeKind,
}

// ---------------------------------------------------------------------------
// GraphNode
// ---------------------------------------------------------------------------

/// One event of the history together with its computed connections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub event_id: EventId,
    pub event_type: EventKind,
    pub info: EventInfo,
}

// ---------------------------------------------------------------------------
// HistoryGraph
// ---------------------------------------------------------------------------

/// The relationship graph of one workflow execution.
///
/// Nodes keep history order. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct HistoryGraph {
    nodes: Vec<GraphNode>,
    index: HashMap<EventId, usize>,
    edges: Vec<Edge>,
    /// event id -> indices into `edges` leaving it.
    outgoing: HashMap<EventId, Vec<usize>>,
    /// event id -> indices into `edges` entering it.
    incoming: HashMap<EventId, Vec<usize>>,
}

impl HistoryGraph {
    /// Compute connections for every event in `workflow` and index them.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::UnknownEventType`] for the first event with
    /// an unrecognised type, unless `config.skip_unrecognized` is set, in
    /// which case such events become unlinked nodes.
    pub fn build(workflow: &Workflow, config: &GraphConfig) -> Result<Self, ConnectionError> {
        let mut graph = Self {
            nodes: Vec::with_capacity(workflow.len()),
            index: HashMap::with_capacity(workflow.len()),
            ..Self::default()
        };
        let mut seen: HashSet<Edge> = HashSet::new();

        for event in workflow {
            let info = match get_event_connections(event, workflow) {
                Ok(info) => info,
                Err(ConnectionError::UnknownEventType { event_id, tag })
                    if config.skip_unrecognized =>
                {
                    warn!(event_id, tag = %tag, "skipping event with unrecognized type");
                    EventInfo::default()
                }
                Err(e) => return Err(e),
            };

            let id = event.event_id;
            let approximate = event
                .event_type
                .known()
                .is_some_and(|et| et.has_approximate_parent());

            let keep_parent = config.include_approximate || !approximate;
            let candidates = [
                info.parent
                    .filter(|_| keep_parent)
                    .map(|parent| (parent, id, EdgeKind::Parent)),
                info.chronological_child
                    .map(|child| (id, child, EdgeKind::Chronological)),
                info.inferred_child
                    .filter(|_| config.include_inferred)
                    .map(|child| (id, child, EdgeKind::Inferred)),
            ];

            for (from, to, kind) in candidates.into_iter().flatten() {
                let edge = Edge { from, to, kind };

                if !workflow.contains(edge.from) || !workflow.contains(edge.to) {
                    warn!(
                        event_id = id,
                        from = edge.from,
                        to = edge.to,
                        kind = ?edge.kind,
                        "dropping edge to event outside the history"
                    );
                    continue;
                }
                if seen.insert(edge) {
                    graph.push_edge(edge);
                }
            }

            graph.index.entry(id).or_insert(graph.nodes.len());
            graph.nodes.push(GraphNode {
                event_id: id,
                event_type: event.event_type.clone(),
                info,
            });
        }

        info!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "built history graph"
        );
        Ok(graph)
    }

    fn push_edge(&mut self, edge: Edge) {
        let slot = self.edges.len();
        self.edges.push(edge);
        self.outgoing.entry(edge.from).or_default().push(slot);
        self.incoming.entry(edge.to).or_default().push(slot);
    }

    /// Number of nodes (events) in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Look up a node by event id.
    #[must_use]
    pub fn node(&self, id: EventId) -> Option<&GraphNode> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    /// All nodes in history order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter()
    }

    /// All edges in discovery order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edges leaving `id`.
    pub fn outgoing(&self, id: EventId) -> impl Iterator<Item = &Edge> {
        self.edge_slots(&self.outgoing, id)
    }

    /// Edges entering `id`.
    pub fn incoming(&self, id: EventId) -> impl Iterator<Item = &Edge> {
        self.edge_slots(&self.incoming, id)
    }

    fn edge_slots<'a>(
        &'a self,
        map: &'a HashMap<EventId, Vec<usize>>,
        id: EventId,
    ) -> impl Iterator<Item = &'a Edge> + 'a {
        map.get(&id)
            .into_iter()
            .flatten()
            .map(move |&slot| &self.edges[slot])
    }

    /// Ids of the events `id` leads to, any edge kind.
    #[must_use]
    pub fn children(&self, id: EventId) -> Vec<EventId> {
        self.outgoing(id).map(|e| e.to).collect()
    }

    /// Ids of the events leading to `id`, any edge kind.
    #[must_use]
    pub fn parents(&self, id: EventId) -> Vec<EventId> {
        self.incoming(id).map(|e| e.from).collect()
    }

    /// Events with no incoming edge, in history order.
    #[must_use]
    pub fn roots(&self) -> Vec<EventId> {
        self.nodes
            .iter()
            .map(|n| n.event_id)
            .filter(|id| !self.incoming.contains_key(id))
            .collect()
    }

    /// Events with no outgoing edge, in history order.
    #[must_use]
    pub fn tips(&self) -> Vec<EventId> {
        self.nodes
            .iter()
            .map(|n| n.event_id)
            .filter(|id| !self.outgoing.contains_key(id))
            .collect()
    }

    /// Edges of a single kind, in discovery order.
    pub fn edges_of_kind(&self, kind: EdgeKind) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.kind == kind)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
