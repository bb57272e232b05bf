//! KD-Tree über die Draufsicht (XZ) aller Nodes.
//!
//! Die Node-ID ist direkt das Item im Baum; Höhen spielen keine Rolle.

use glam::Vec3;
use kiddo::{KdTree, SquaredEuclidean};

use crate::core::NetNode;

/// Treffer einer Umgebungsabfrage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialMatch {
    /// Gefundener Node
    pub node_id: u64,
    /// Abstand in der Draufsicht
    pub distance: f32,
}

impl SpatialMatch {
    fn from_squared(node_id: u64, squared_distance: f64) -> Self {
        Self {
            node_id,
            distance: (squared_distance as f32).sqrt(),
        }
    }
}

/// Umgebungsindex eines Straßennetzes, wird nach Node-Änderungen neu gebaut.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    tree: KdTree<f64, 2>,
    count: usize,
}

impl SpatialIndex {
    /// Erstellt einen leeren Index.
    pub fn empty() -> Self {
        Self {
            tree: KdTree::new(),
            count: 0,
        }
    }

    /// Indexiert alle übergebenen Nodes in aufsteigender ID-Reihenfolge.
    pub fn build<'a>(nodes: impl IntoIterator<Item = &'a NetNode>) -> Self {
        let mut sorted: Vec<&NetNode> = nodes.into_iter().collect();
        sorted.sort_unstable_by_key(|node| node.id);

        let mut index = Self::empty();
        for node in sorted {
            index.tree.add(&top_down(node.position), node.id);
            index.count += 1;
        }
        index
    }

    /// Anzahl indexierter Nodes.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Gibt `true` zurück, wenn kein Node indexiert ist.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Nächster Node zur Position.
    pub fn nearest(&self, query: Vec3) -> Option<SpatialMatch> {
        if self.is_empty() {
            return None;
        }
        let hit = self.tree.nearest_one::<SquaredEuclidean>(&top_down(query));
        Some(SpatialMatch::from_squared(hit.item, hit.distance))
    }

    /// Alle Nodes mit Abstand ≤ `radius`, nach Abstand sortiert.
    pub fn within_radius(&self, query: Vec3, radius: f32) -> Vec<SpatialMatch> {
        if self.is_empty() || radius < 0.0 {
            return Vec::new();
        }
        let squared = f64::from(radius) * f64::from(radius);
        let mut hits: Vec<SpatialMatch> = self
            .tree
            .within::<SquaredEuclidean>(&top_down(query), squared)
            .into_iter()
            .map(|hit| SpatialMatch::from_squared(hit.item, hit.distance))
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.node_id.cmp(&b.node_id)));
        hits
    }

    /// Gibt `true` zurück, wenn ein Node außer `ignored` innerhalb `radius` liegt.
    pub fn any_other_within(&self, query: Vec3, radius: f32, ignored: &[u64]) -> bool {
        self.within_radius(query, radius)
            .iter()
            .any(|hit| !ignored.contains(&hit.node_id))
    }
}

#[inline]
fn top_down(position: Vec3) -> [f64; 2] {
    [f64::from(position.x), f64::from(position.z)]
}
