//! Node-Controller für Straßennetze.
//! Control-Point-Auflösung, Zustandsübergabe zwischen Simulations-Tick und
//! Frame sowie Klick-Verarbeitung als Library für Tests und Host-Integration.

pub mod app;
pub mod core;
pub mod shared;

pub use app::{
    ActionQueue, ActionSender, ControlPointProducer, ControlPointResolver, DispatchOutcome,
    LogPanel, NodeControllerTool, NodePanel, PublishedState, SelectionState, StateChannel,
    ToolInput, ToolPhase,
};
pub use core::{
    ControlPoint, ControlTarget, HoverTarget, NetNode, NetSegment, NetworkMutator, NetworkPrefab,
    NodeFlags, RoadNetwork, ToolErrors, WorldQuery,
};
pub use shared::{OverlayScene, ToolOptions};
