//! Control-Point und Hover-Ziel: Ein- und Ausgabe eines Auflösungs-Durchlaufs.

use glam::Vec3;
use std::fmt;

/// Worauf ein Control-Point zeigt. Höchstens eines von Node/Segment ist gesetzt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlTarget {
    /// Kein gültiges Ziel
    #[default]
    None,
    /// Existierender Node
    Node(u64),
    /// Punkt auf einem Segment (Einfüge-Kandidat)
    Segment(u64),
}

/// Aufgelöstes Ziel der aktuellen Cursor-Position.
///
/// Wird pro Tick neu erzeugt und nie verändert.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlPoint {
    /// Ziel (Node, Segment oder keines)
    pub target: ControlTarget,
    /// Weltposition (nur für Segment-Ziele relevant)
    pub position: Vec3,
    /// Höhe über Grund (Mittelwert der Segment-Endpunkte)
    pub elevation: f32,
}

impl ControlPoint {
    /// Control-Point ohne Ziel.
    pub const fn none() -> Self {
        Self {
            target: ControlTarget::None,
            position: Vec3::ZERO,
            elevation: 0.0,
        }
    }

    /// Control-Point auf einem existierenden Node.
    pub const fn on_node(node_id: u64) -> Self {
        Self {
            target: ControlTarget::Node(node_id),
            position: Vec3::ZERO,
            elevation: 0.0,
        }
    }

    /// Control-Point auf einem Segment.
    pub const fn on_segment(segment_id: u64, position: Vec3, elevation: f32) -> Self {
        Self {
            target: ControlTarget::Segment(segment_id),
            position,
            elevation,
        }
    }

    /// Node-ID, falls ein Node getroffen wurde.
    pub fn node_id(&self) -> Option<u64> {
        match self.target {
            ControlTarget::Node(id) => Some(id),
            _ => None,
        }
    }

    /// Segment-ID, falls ein Segment getroffen wurde.
    pub fn segment_id(&self) -> Option<u64> {
        match self.target {
            ControlTarget::Segment(id) => Some(id),
            _ => None,
        }
    }

    /// Gibt `true` zurück, wenn weder Node noch Segment getroffen wurde.
    pub fn is_none(&self) -> bool {
        self.target == ControlTarget::None
    }
}

impl fmt::Display for ControlPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<node:{} segment:{} position:({:.2}, {:.2}, {:.2}) elevation:{:.2}>",
            self.node_id().unwrap_or(0),
            self.segment_id().unwrap_or(0),
            self.position.x,
            self.position.y,
            self.position.z,
            self.elevation
        )
    }
}

/// Transiente Eingabe eines Auflösungs-Durchlaufs (ein Tick).
///
/// Wird vom externen Input-/Raycast-System erzeugt.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HoverTarget {
    /// Node unter dem Cursor
    pub hovered_node: Option<u64>,
    /// Segment unter dem Cursor
    pub hovered_segment: Option<u64>,
    /// Trefferpunkt des Cursor-Strahls in Weltkoordinaten
    pub hit_position: Vec3,
    /// Ob der Cursor-Strahl in diesem Tick gültig war
    pub ray_valid: bool,
}

impl HoverTarget {
    /// Hover ohne gültigen Strahl.
    pub fn invalid() -> Self {
        Self::default()
    }

    /// Gültiger Hover über einem Segment und dessen nächstem Endpunkt.
    pub fn over(node_id: u64, segment_id: u64, hit_position: Vec3) -> Self {
        Self {
            hovered_node: Some(node_id),
            hovered_segment: Some(segment_id),
            hit_position,
            ray_valid: true,
        }
    }
}
