//! Control-Point-Resolver: ein Auflösungs-Durchlauf pro Simulations-Tick.
//!
//! Entscheidet, ob der Cursor einen existierenden Node oder einen Punkt auf
//! einem Segment meint, und prüft Einfüge-Kandidaten im Testmodus gegen das
//! Weltmodell. Keine Mutation, kein versteckter Zustand.

use super::snap;
use crate::core::{ControlPoint, HoverTarget, ToolErrors, WorldQuery};
use crate::shared::ToolOptions;

/// Deterministischer Resolver für Control-Points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPointResolver {
    snap_radius: f32,
}

impl Default for ControlPointResolver {
    fn default() -> Self {
        Self::from_options(&ToolOptions::default())
    }
}

impl ControlPointResolver {
    /// Erstellt einen Resolver mit festem Snap-Radius (Meter).
    pub fn new(snap_radius: f32) -> Self {
        Self { snap_radius }
    }

    /// Erstellt einen Resolver aus den Werkzeug-Optionen.
    pub fn from_options(options: &ToolOptions) -> Self {
        Self::new(options.snap_radius())
    }

    /// Snap-Radius in Metern.
    pub fn snap_radius(&self) -> f32 {
        self.snap_radius
    }

    /// Löst das Hover-Ziel gegen die Welt auf.
    ///
    /// Ablauf:
    /// 1. Ungültiger Strahl oder unbekannter Hover-Node → `RAYCAST_FAILED`
    /// 2. Form-Bedingungen erfüllt → Node
    /// 3. Treffer innerhalb des Snap-Radius → Node
    /// 4. Sonst nächster Punkt auf dem Hover-Segment, Höhe = Mittel der Endpunkte,
    ///    Einfüge-Prüfung gegen den Straßentyp des Segments
    pub fn resolve<W: WorldQuery + ?Sized>(
        &self,
        hover: &HoverTarget,
        world: &W,
    ) -> (ControlPoint, ToolErrors) {
        if !hover.ray_valid {
            return Self::failed();
        }
        let Some(node) = hover.hovered_node.and_then(|id| world.node(id)) else {
            return Self::failed();
        };

        let incident = world.incident_segments(node.id);
        if snap::node_shape_allows_snap(&node, &incident, world)
            || snap::within_snap_radius(hover.hit_position, node.position, self.snap_radius)
        {
            return (ControlPoint::on_node(node.id), ToolErrors::empty());
        }

        self.resolve_on_segment(hover, world)
            .unwrap_or_else(Self::failed)
    }

    fn resolve_on_segment<W: WorldQuery + ?Sized>(
        &self,
        hover: &HoverTarget,
        world: &W,
    ) -> Option<(ControlPoint, ToolErrors)> {
        let segment = world.segment(hover.hovered_segment?)?;
        let start = world.node(segment.start_node)?;
        let end = world.node(segment.end_node)?;
        let position = world.closest_point_on_segment(segment.id, hover.hit_position)?;

        let elevation = snap::interpolated_elevation(start.elevation, end.elevation);
        let control_point = ControlPoint::on_segment(segment.id, position, elevation);
        let errors = world.check_insertion(&segment.prefab, &control_point);
        Some((control_point, errors))
    }

    fn failed() -> (ControlPoint, ToolErrors) {
        (ControlPoint::none(), ToolErrors::RAYCAST_FAILED)
    }
}
