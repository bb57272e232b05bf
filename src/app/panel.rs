//! Schnittstelle zum externen Node-Panel.

/// Panel, das den selektierten Node anzeigt.
pub trait NodePanel {
    /// Zeigt den Node im Panel an.
    fn show_node(&mut self, node_id: u64);

    /// Schließt das Panel.
    fn close(&mut self);
}

/// Panel ohne Darstellung, protokolliert nur die Aufrufe.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPanel;

impl NodePanel for LogPanel {
    fn show_node(&mut self, node_id: u64) {
        log::info!("Panel: Node {} anzeigen", node_id);
    }

    fn close(&mut self) {
        log::debug!("Panel: schließen");
    }
}
