//! Rein-geometrische Snap-Regeln ohne Zustand.

use crate::core::{NetNode, WorldQuery};
use glam::Vec3;

/// Prüft die Form-Bedingungen, unter denen ein Klick immer auf den Node einrastet.
///
/// Alle anliegenden Segmente werden gezählt; nur bei genau zwei wird deren
/// Straßentyp verglichen. Zusätzlich muss der Node verschiebbar sein.
pub fn node_shape_allows_snap<W: WorldQuery + ?Sized>(
    node: &NetNode,
    incident_segments: &[u64],
    world: &W,
) -> bool {
    let [first, second] = incident_segments else {
        return false;
    };
    let same_type = match (world.segment_prefab(*first), world.segment_prefab(*second)) {
        (Some(a), Some(b)) => a.same_type(&b),
        _ => false,
    };
    same_type && node.is_moveable()
}

/// Gibt `true` zurück, wenn `hit` echt innerhalb von `radius` um `node_position` liegt.
#[inline]
pub fn within_snap_radius(hit: Vec3, node_position: Vec3, radius: f32) -> bool {
    (hit - node_position).length_squared() < radius * radius
}

/// Höhe eines Einfügepunkts: Mittelwert der beiden Endpunkt-Höhen.
#[inline]
pub fn interpolated_elevation(start_elevation: f32, end_elevation: f32) -> f32 {
    0.5 * (start_elevation + end_elevation)
}
