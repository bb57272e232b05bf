//! Repräsentiert einen Knoten (Junction) im Straßennetz.

use bitflags::bitflags;
use glam::Vec3;

bitflags! {
    /// Zustands-Flags eines Nodes im Weltmodell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u8 {
        /// Node darf verschoben werden
        const MOVEABLE = 0b0000_0001;
        /// Zwischenknoten auf einer durchgehenden Straße (keine Kreuzung)
        const MIDDLE = 0b0000_0010;
        /// Node darf vom Werkzeug nicht bearbeitet werden
        const UNTOUCHABLE = 0b0000_0100;
    }
}

/// Ein Node mit Position, Höhe über Grund und Flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetNode {
    /// Eindeutige Node-ID (> 0)
    pub id: u64,
    /// Weltposition
    pub position: Vec3,
    /// Höhe über Grund
    pub elevation: f32,
    /// Zustands-Flags
    pub flags: NodeFlags,
}

impl NetNode {
    /// Erstellt einen neuen Node.
    pub fn new(id: u64, position: Vec3, elevation: f32, flags: NodeFlags) -> Self {
        Self {
            id,
            position,
            elevation,
            flags,
        }
    }

    /// Gibt `true` zurück, wenn der Node verschoben werden darf.
    pub fn is_moveable(&self) -> bool {
        self.flags.contains(NodeFlags::MOVEABLE)
    }

    /// Gibt `true` zurück, wenn der Node ein Zwischenknoten ist.
    pub fn is_middle(&self) -> bool {
        self.flags.contains(NodeFlags::MIDDLE)
    }
}
