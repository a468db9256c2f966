//! histograph-core library.
//!
//! Derives parent/child relationships between the events of a workflow
//! execution history so a visualization layer can draw them.
//!
//! ```rust,ignore
//! use histograph_core::{Workflow, get_event_connections};
//!
//! let workflow = Workflow::from_json(&history_json)?;
//! for event in &workflow {
//!     let info = get_event_connections(event, &workflow)?;
//!     println!("{event}: {info:?}");
//! }
//! ```
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums in library APIs ([`ConnectionError`]);
//!   `anyhow::Result` with context for config file loading.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).
//!   The library never installs a subscriber.

pub mod config;
pub mod connections;
pub mod error;
pub mod event;
pub mod graph;
pub mod workflow;

pub use config::{GraphConfig, load_graph_config};
pub use connections::{ChildLink, EventInfo, Status, find_child, get_event_connections};
pub use error::{ConnectionError, ErrorCode};
pub use event::{EventDetails, EventId, EventKind, EventType, HistoryEvent, WorkflowExecution};
pub use graph::{Edge, EdgeKind, GraphNode, HistoryGraph};
pub use workflow::Workflow;
