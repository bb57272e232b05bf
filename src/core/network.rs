//! Referenz-Weltmodell: Nodes, Segmente und Straßentypen im Speicher.
//!
//! Implementiert `WorldQuery` und `NetworkMutator`, damit Resolver, Tool und
//! Demo ohne Host-Spiel laufen und getestet werden können.

use super::segment::closest_point_on_line;
use super::{
    ControlPoint, HoverTarget, NetNode, NetSegment, NetworkMutator, NetworkPrefab, NodeFlags,
    SpatialIndex, SpatialMatch, ToolErrors, WorldQuery,
};
use glam::{Vec2, Vec3};
use indexmap::IndexSet;
use std::collections::HashMap;
use std::sync::Arc;

/// Maximale Abweichung eines Einfüge-Kandidaten von der Segment-Mittellinie.
const ON_SEGMENT_TOLERANCE: f32 = 0.01;

/// Straßennetz mit persistentem Spatial-Index.
#[derive(Debug, Clone)]
pub struct RoadNetwork {
    nodes: HashMap<u64, NetNode>,
    segments: HashMap<u64, NetSegment>,
    /// Anliegende Segmente pro Node in Einfügereihenfolge
    node_segments: HashMap<u64, IndexSet<u64>>,
    spatial_index: SpatialIndex,
    /// Nächste freie IDs, werden nie zurückgesetzt
    next_node_id: u64,
    next_segment_id: u64,
}

impl Default for RoadNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl RoadNetwork {
    /// Erstellt ein leeres Straßennetz.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            segments: HashMap::new(),
            node_segments: HashMap::new(),
            spatial_index: SpatialIndex::empty(),
            next_node_id: 1,
            next_segment_id: 1,
        }
    }

    /// Fügt einen Node hinzu (ersetzt einen vorhandenen mit gleicher ID).
    pub fn add_node(&mut self, node: NetNode) {
        self.node_segments.entry(node.id).or_default();
        self.next_node_id = self.next_node_id.max(node.id + 1);
        self.nodes.insert(node.id, node);
        self.rebuild_spatial_index();
    }

    /// Verbindet zwei existierende Nodes mit einem neuen Segment.
    ///
    /// Gibt `None` zurück, wenn einer der Nodes fehlt oder beide identisch sind.
    pub fn add_segment(
        &mut self,
        start_node: u64,
        end_node: u64,
        prefab: Arc<NetworkPrefab>,
    ) -> Option<u64> {
        if start_node == end_node
            || !self.nodes.contains_key(&start_node)
            || !self.nodes.contains_key(&end_node)
        {
            log::warn!(
                "Segment {}→{} nicht anlegbar: Nodes fehlen oder identisch",
                start_node,
                end_node
            );
            return None;
        }
        let id = self.next_segment_id;
        self.next_segment_id += 1;
        self.segments
            .insert(id, NetSegment::new(id, start_node, end_node, prefab));
        self.node_segments.entry(start_node).or_default().insert(id);
        self.node_segments.entry(end_node).or_default().insert(id);
        Some(id)
    }

    /// Entfernt ein Segment und trägt es bei beiden Endpunkten aus.
    pub fn remove_segment(&mut self, segment_id: u64) -> Option<NetSegment> {
        let removed = self.segments.remove(&segment_id)?;
        for node_id in [removed.start_node, removed.end_node] {
            if let Some(list) = self.node_segments.get_mut(&node_id) {
                list.shift_remove(&segment_id);
            }
        }
        Some(removed)
    }

    /// Entfernt einen Node inklusive aller anliegenden Segmente.
    pub fn remove_node(&mut self, node_id: u64) -> Option<NetNode> {
        let removed = self.nodes.remove(&node_id)?;
        let incident = self.node_segments.remove(&node_id).unwrap_or_default();
        for segment_id in incident {
            self.remove_segment(segment_id);
        }
        self.rebuild_spatial_index();
        Some(removed)
    }

    /// Setzt die Flags eines Nodes.
    pub fn set_node_flags(&mut self, node_id: u64, flags: NodeFlags) -> bool {
        let Some(node) = self.nodes.get_mut(&node_id) else {
            return false;
        };
        node.flags = flags;
        true
    }

    /// Nächste freie Node-ID. IDs entfernter Nodes werden nicht wiederverwendet.
    pub fn next_node_id(&self) -> u64 {
        self.next_node_id
    }

    /// Nächste freie Segment-ID. IDs entfernter Segmente werden nicht wiederverwendet.
    pub fn next_segment_id(&self) -> u64 {
        self.next_segment_id
    }

    /// Gibt die Anzahl der Nodes zurück.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Gibt die Anzahl der Segmente zurück.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Baut den persistenten Spatial-Index aus den aktuellen Nodes neu auf.
    pub fn rebuild_spatial_index(&mut self) {
        self.spatial_index = SpatialIndex::build(self.nodes.values());
    }

    /// Findet den nächstgelegenen Node zur Weltposition (Draufsicht).
    pub fn nearest_node(&self, query: Vec3) -> Option<SpatialMatch> {
        self.spatial_index.nearest(query)
    }

    /// Ermittelt Hover-Segment und -Node für einen Cursor-Trefferpunkt.
    ///
    /// Segment = nächstes Segment in der Draufsicht innerhalb `max_distance`,
    /// Node = dessen näherer Endpunkt. Ohne Treffer bleiben beide `None`.
    pub fn hover_at(&self, hit_position: Vec3, max_distance: f32) -> HoverTarget {
        let mut best: Option<(u64, f32)> = None;
        let hit_xz = Vec2::new(hit_position.x, hit_position.z);

        for segment in self.segments.values() {
            let Some((start, end)) = self.endpoints(segment) else {
                continue;
            };
            let (_, closest) = closest_point_on_line(
                Vec3::new(start.position.x, 0.0, start.position.z),
                Vec3::new(end.position.x, 0.0, end.position.z),
                Vec3::new(hit_position.x, 0.0, hit_position.z),
            );
            let dist = Vec2::new(closest.x, closest.z).distance(hit_xz);
            let better = match best {
                Some((best_id, best_dist)) => {
                    dist < best_dist || (dist == best_dist && segment.id < best_id)
                }
                None => true,
            };
            if dist <= max_distance && better {
                best = Some((segment.id, dist));
            }
        }

        let Some((segment_id, _)) = best else {
            return HoverTarget {
                hit_position,
                ray_valid: true,
                ..HoverTarget::default()
            };
        };

        let hovered_node = self.segments.get(&segment_id).and_then(|segment| {
            let (start, end) = self.endpoints(segment)?;
            if start.position.distance_squared(hit_position)
                <= end.position.distance_squared(hit_position)
            {
                Some(start.id)
            } else {
                Some(end.id)
            }
        });

        HoverTarget {
            hovered_node,
            hovered_segment: Some(segment_id),
            hit_position,
            ray_valid: true,
        }
    }

    /// Prüft einen Einfüge-Kandidaten gegen den aktuellen Netzzustand.
    pub fn validate_insertion(
        &self,
        prefab: &NetworkPrefab,
        control_point: &ControlPoint,
    ) -> ToolErrors {
        let Some(segment_id) = control_point.segment_id() else {
            return ToolErrors::BUILD_POSITION_CONFLICT;
        };
        let Some((start, end)) = self
            .segments
            .get(&segment_id)
            .and_then(|segment| self.endpoints(segment))
        else {
            return ToolErrors::BUILD_POSITION_CONFLICT;
        };

        let candidate = control_point.position;
        let (_, on_line) = closest_point_on_line(start.position, end.position, candidate);
        if on_line.distance(candidate) > ON_SEGMENT_TOLERANCE {
            return ToolErrors::BUILD_POSITION_CONFLICT;
        }

        let mut errors = prefab.check_build_position(start.position, candidate, end.position);

        let collides = self.spatial_index.any_other_within(
            candidate,
            prefab.half_width,
            &[start.id, end.id],
        );
        if collides {
            errors |= ToolErrors::OBJECT_COLLISION;
        }
        errors
    }

    fn endpoints(&self, segment: &NetSegment) -> Option<(&NetNode, &NetNode)> {
        Some((
            self.nodes.get(&segment.start_node)?,
            self.nodes.get(&segment.end_node)?,
        ))
    }
}

impl WorldQuery for RoadNetwork {
    fn node(&self, node_id: u64) -> Option<NetNode> {
        self.nodes.get(&node_id).copied()
    }

    fn segment(&self, segment_id: u64) -> Option<NetSegment> {
        self.segments.get(&segment_id).cloned()
    }

    fn incident_segments(&self, node_id: u64) -> Vec<u64> {
        self.node_segments
            .get(&node_id)
            .map(|list| list.iter().copied().collect())
            .unwrap_or_default()
    }

    fn segment_prefab(&self, segment_id: u64) -> Option<Arc<NetworkPrefab>> {
        self.segments.get(&segment_id).map(|s| s.prefab.clone())
    }

    fn closest_point_on_segment(&self, segment_id: u64, point: Vec3) -> Option<Vec3> {
        let segment = self.segments.get(&segment_id)?;
        let (start, end) = self.endpoints(segment)?;
        Some(closest_point_on_line(start.position, end.position, point).1)
    }

    fn check_insertion(&self, prefab: &NetworkPrefab, control_point: &ControlPoint) -> ToolErrors {
        self.validate_insertion(prefab, control_point)
    }

    fn is_node_supported(&self, node_id: u64) -> bool {
        let Some(node) = self.nodes.get(&node_id) else {
            return false;
        };
        !node.flags.contains(NodeFlags::UNTOUCHABLE)
            && self.node_segments.get(&node_id).map_or(0, |s| s.len()) >= 2
    }
}

impl NetworkMutator for RoadNetwork {
    fn insert_node(&mut self, control_point: &ControlPoint) -> Result<u64, ToolErrors> {
        let Some(segment) = control_point
            .segment_id()
            .and_then(|id| self.segments.get(&id))
            .cloned()
        else {
            return Err(ToolErrors::BUILD_POSITION_CONFLICT);
        };

        let errors = self.validate_insertion(&segment.prefab, control_point);
        if !errors.is_none() {
            log::debug!(
                "Einfügen an {} abgelehnt: {:?}",
                control_point,
                errors
            );
            return Err(errors);
        }

        let new_id = self.next_node_id;
        self.add_node(NetNode::new(
            new_id,
            control_point.position,
            control_point.elevation,
            NodeFlags::MOVEABLE | NodeFlags::MIDDLE,
        ));

        self.remove_segment(segment.id);
        // Beide Hälften behalten den Straßentyp des geteilten Segments
        self.add_segment(segment.start_node, new_id, segment.prefab.clone());
        self.add_segment(new_id, segment.end_node, segment.prefab.clone());

        log::info!(
            "Node {} in Segment {} eingefügt bei ({:.1}, {:.1}, {:.1})",
            new_id,
            segment.id,
            control_point.position.x,
            control_point.position.y,
            control_point.position.z
        );
        Ok(new_id)
    }
}
