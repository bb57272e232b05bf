//! Core-Domänentypen: Control-Point, Fehler-Flags, Nodes, Segmente, Weltmodell.

pub mod control_point;
pub mod errors;
pub mod network;
pub mod node;
pub mod prefab;
pub mod segment;
pub mod spatial;
pub mod world;

pub use control_point::{ControlPoint, ControlTarget, HoverTarget};
pub use errors::ToolErrors;
pub use network::RoadNetwork;
pub use node::{NetNode, NodeFlags};
pub use prefab::NetworkPrefab;
pub use segment::{closest_point_on_line, NetSegment};
pub use spatial::{SpatialIndex, SpatialMatch};
pub use world::{NetworkMutator, WorldQuery};
