//! Schnittstellen zum Weltmodell: lesende Abfragen und serialisierte Mutation.
//!
//! Der Resolver kennt nur `WorldQuery`. Wie Nodes und Segmente gespeichert
//! werden, bleibt Sache des Hosts (siehe `RoadNetwork` als Referenz).

use super::{ControlPoint, NetNode, NetSegment, NetworkPrefab, ToolErrors};
use glam::Vec3;
use std::sync::Arc;

/// Read-only Abfragen gegen einen unveränderlichen Welt-Snapshot.
pub trait WorldQuery {
    /// Liefert den Node mit der gegebenen ID.
    fn node(&self, node_id: u64) -> Option<NetNode>;

    /// Liefert das Segment mit der gegebenen ID.
    fn segment(&self, segment_id: u64) -> Option<NetSegment>;

    /// Alle Segmente, die am Node anliegen (vollständig, Reihenfolge beliebig).
    fn incident_segments(&self, node_id: u64) -> Vec<u64>;

    /// Straßentyp eines Segments.
    fn segment_prefab(&self, segment_id: u64) -> Option<Arc<NetworkPrefab>> {
        self.segment(segment_id).map(|s| s.prefab)
    }

    /// Nächster Punkt auf der Mittellinie des Segments.
    fn closest_point_on_segment(&self, segment_id: u64, point: Vec3) -> Option<Vec3>;

    /// Prüft, ob ein Node am Control-Point eingefügt werden könnte (Testmodus, keine Mutation).
    fn check_insertion(&self, prefab: &NetworkPrefab, control_point: &ControlPoint) -> ToolErrors;

    /// Ob der Node vom Werkzeug bearbeitet werden darf.
    fn is_node_supported(&self, node_id: u64) -> bool;
}

/// Mutierender Zugriff. Wird ausschließlich im Welt-Mutationskontext verwendet.
pub trait NetworkMutator: WorldQuery {
    /// Fügt einen Node am Control-Point ein und teilt das Segment.
    ///
    /// Gibt die neue Node-ID zurück oder die Fehler, die zum Einfügezeitpunkt gelten.
    fn insert_node(&mut self, control_point: &ControlPoint) -> Result<u64, ToolErrors>;
}
