//! Interaktions-Dispatcher: Klicks auf Basis des gecachten Frame-Zustands.
//!
//! Primärklick selektiert einen existierenden Node oder reicht das Einfügen
//! eines neuen Nodes am Control-Point als verzögerte Aktion ein.
//! Sekundärklick hebt die Selektion immer auf.

use super::executor::ExecutorError;
use super::panel::NodePanel;
use super::state::{PublishedState, SelectionState};
use crate::core::{ControlPoint, ControlTarget, ToolErrors, WorldQuery};

/// Grund, aus dem ein Klick ignoriert wurde.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Werkzeug ist deaktiviert
    ToolInactive,
    /// Kein gültiges Cursor-Ziel
    HoverInvalid,
    /// Der gecachte Zustand trägt Validierungsfehler
    Errors(ToolErrors),
    /// Kein aktiver Straßentyp
    NoPrefab,
    /// Node ist in einer nicht unterstützten Konfiguration
    Unsupported(u64),
    /// Weder Node noch Segment getroffen
    NothingTargeted,
    /// Mutations-Queue nimmt keine Aktionen mehr an
    ExecutorClosed,
}

/// Ergebnis eines Klicks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DispatchOutcome {
    /// Klick ohne Wirkung
    Ignored(IgnoreReason),
    /// Existierender Node wurde selektiert
    Selected(u64),
    /// Einfügen wurde eingereicht, Ergebnis folgt asynchron
    InsertionQueued(ControlPoint),
    /// Selektion wurde aufgehoben
    Cleared,
}

/// Verarbeitet einen Primärklick.
///
/// `submit_insertion` reicht das Einfügen am Control-Point beim
/// Welt-Mutationskontext ein; die Selektion ändert sich dabei noch nicht.
pub fn primary_activate<Q, P, F>(
    cached: &PublishedState,
    selection: &mut SelectionState,
    world: &Q,
    panel: &mut P,
    submit_insertion: F,
) -> DispatchOutcome
where
    Q: WorldQuery + ?Sized,
    P: NodePanel + ?Sized,
    F: FnOnce(ControlPoint) -> Result<(), ExecutorError>,
{
    if !cached.is_hover_valid() {
        return ignore(IgnoreReason::HoverInvalid);
    }
    let cp = cached.control_point;
    log::info!(
        "Primärklick: segment {} node {}",
        cp.segment_id().unwrap_or(0),
        cp.node_id().unwrap_or(0)
    );
    if !cached.errors.is_none() {
        return ignore(IgnoreReason::Errors(cached.errors));
    }
    if cached.prefab.is_none() {
        return ignore(IgnoreReason::NoPrefab);
    }

    match cp.target {
        ControlTarget::Node(node_id) => {
            if !world.is_node_supported(node_id) {
                return ignore(IgnoreReason::Unsupported(node_id));
            }
            selection.selected_node = Some(node_id);
            panel.show_node(node_id);
            DispatchOutcome::Selected(node_id)
        }
        ControlTarget::Segment(_) => match submit_insertion(cp) {
            Ok(()) => DispatchOutcome::InsertionQueued(cp),
            Err(e) => {
                log::warn!("Einfügen nicht eingereicht: {}", e);
                DispatchOutcome::Ignored(IgnoreReason::ExecutorClosed)
            }
        },
        ControlTarget::None => ignore(IgnoreReason::NothingTargeted),
    }
}

/// Verarbeitet einen Sekundärklick: Selektion aufheben, Panel schließen.
pub fn secondary_activate<P: NodePanel + ?Sized>(
    selection: &mut SelectionState,
    panel: &mut P,
) -> DispatchOutcome {
    panel.close();
    selection.clear();
    DispatchOutcome::Cleared
}

/// Übernimmt das Ergebnis einer ausgeführten Einfüge-Aktion.
///
/// Nur bei Erfolg wird der neue Node selektiert und angezeigt.
pub fn apply_insertion_result<P: NodePanel + ?Sized>(
    result: Result<u64, ToolErrors>,
    selection: &mut SelectionState,
    panel: &mut P,
) -> bool {
    match result {
        Ok(node_id) => {
            selection.selected_node = Some(node_id);
            panel.show_node(node_id);
            true
        }
        Err(errors) => {
            log::debug!("Einfügen fehlgeschlagen, Selektion bleibt: {:?}", errors);
            false
        }
    }
}

fn ignore(reason: IgnoreReason) -> DispatchOutcome {
    log::debug!("Klick ignoriert: {:?}", reason);
    DispatchOutcome::Ignored(reason)
}
