//! Zustandstypen an der Grenze zwischen Simulations-Tick und Frame.

use crate::core::{ControlPoint, NetworkPrefab, ToolErrors};
use glam::Vec3;
use std::sync::Arc;

/// Atomare Übergabeeinheit des Zustandskanals.
///
/// Wird nur vom Producer geschrieben; der Consumer arbeitet auf einer Kopie.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublishedState {
    /// Aufgelöster Control-Point dieses Ticks
    pub control_point: ControlPoint,
    /// Validierungsfehler dieses Ticks
    pub errors: ToolErrors,
    /// Aktiver Straßentyp (Prefab des Hover-Segments)
    pub prefab: Option<Arc<NetworkPrefab>>,
    /// Cursor-Trefferpunkt, aus dem der Control-Point entstand
    pub hit_position: Vec3,
}

impl PublishedState {
    /// Gibt `true` zurück, wenn der Cursor in diesem Tick ein gültiges Ziel hatte.
    pub fn is_hover_valid(&self) -> bool {
        !self.errors.hover_failed()
    }
}

/// Auswahlbezogener Zustand des Werkzeugs (gehört dem Frame-Kontext).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Aktuell selektierter Node
    pub selected_node: Option<u64>,
}

impl SelectionState {
    /// Erstellt einen leeren Selektionszustand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hebt die Selektion auf.
    pub fn clear(&mut self) {
        self.selected_node = None;
    }

    /// Gibt `true` zurück, wenn ein Node selektiert ist.
    pub fn has_selection(&self) -> bool {
        self.selected_node.is_some()
    }
}

/// Werkzeug-Zustand auf Tool-Ebene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolPhase {
    /// Werkzeug deaktiviert
    #[default]
    Inactive,
    /// Aktiv, kein Ziel unter dem Cursor
    ActiveIdle,
    /// Aktiv, Ziel unter dem Cursor ist gültig
    ActiveHoveringValid,
    /// Aktiv, Ziel unter dem Cursor ist blockiert
    ActiveHoveringInvalid,
    /// Ein Node ist selektiert und im Panel geöffnet
    NodeSelected,
}

impl ToolPhase {
    /// Leitet die Phase aus Aktivierung, Selektion und gecachtem Zustand ab.
    pub fn derive(enabled: bool, selection: &SelectionState, cached: &PublishedState) -> Self {
        if !enabled {
            ToolPhase::Inactive
        } else if selection.has_selection() {
            ToolPhase::NodeSelected
        } else if cached.control_point.is_none() {
            ToolPhase::ActiveIdle
        } else if cached.errors.is_none() {
            ToolPhase::ActiveHoveringValid
        } else {
            ToolPhase::ActiveHoveringInvalid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_follows_selection_and_errors() {
        let mut selection = SelectionState::new();
        let mut cached = PublishedState::default();

        assert_eq!(
            ToolPhase::derive(false, &selection, &cached),
            ToolPhase::Inactive
        );
        assert_eq!(
            ToolPhase::derive(true, &selection, &cached),
            ToolPhase::ActiveIdle
        );

        cached.control_point = ControlPoint::on_segment(1, Vec3::ZERO, 0.0);
        assert_eq!(
            ToolPhase::derive(true, &selection, &cached),
            ToolPhase::ActiveHoveringValid
        );

        cached.errors = ToolErrors::TOO_SHORT;
        assert_eq!(
            ToolPhase::derive(true, &selection, &cached),
            ToolPhase::ActiveHoveringInvalid
        );

        selection.selected_node = Some(4);
        assert_eq!(
            ToolPhase::derive(true, &selection, &cached),
            ToolPhase::NodeSelected
        );
    }

    #[test]
    fn default_state_has_valid_hover() {
        assert!(PublishedState::default().is_hover_valid());
        let failed = PublishedState {
            errors: ToolErrors::RAYCAST_FAILED,
            ..PublishedState::default()
        };
        assert!(!failed.is_hover_valid());
    }
}
