//! Repräsentiert ein Segment (Kante) zwischen zwei Nodes.

use super::NetworkPrefab;
use glam::Vec3;
use std::sync::Arc;

/// Ein gerades Straßensegment zwischen zwei Nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct NetSegment {
    /// Eindeutige Segment-ID (> 0)
    pub id: u64,
    /// Start-Node-ID
    pub start_node: u64,
    /// End-Node-ID
    pub end_node: u64,
    /// Straßentyp
    pub prefab: Arc<NetworkPrefab>,
}

impl NetSegment {
    /// Erstellt ein neues Segment.
    pub fn new(id: u64, start_node: u64, end_node: u64, prefab: Arc<NetworkPrefab>) -> Self {
        Self {
            id,
            start_node,
            end_node,
            prefab,
        }
    }

    /// Gibt den jeweils anderen Endpunkt zurück (None, wenn `node_id` kein Endpunkt ist).
    pub fn other_node(&self, node_id: u64) -> Option<u64> {
        if node_id == self.start_node {
            Some(self.end_node)
        } else if node_id == self.end_node {
            Some(self.start_node)
        } else {
            None
        }
    }

    /// Gibt `true` zurück, wenn `node_id` einer der Endpunkte ist.
    pub fn touches(&self, node_id: u64) -> bool {
        self.start_node == node_id || self.end_node == node_id
    }
}

/// Projiziert `point` auf die Strecke `start`–`end`.
///
/// Gibt `(t, closest)` zurück, `t` auf [0, 1] geklemmt.
/// Degenerierte Strecken liefern `start`.
pub fn closest_point_on_line(start: Vec3, end: Vec3, point: Vec3) -> (f32, Vec3) {
    let dir = end - start;
    let len_sq = dir.length_squared();
    if len_sq < 1e-10 {
        return (0.0, start);
    }
    let t = ((point - start).dot(dir) / len_sq).clamp(0.0, 1.0);
    (t, start + dir * t)
}
