//! Consumer-Seite des Node-Controllers: läuft im Frame-Kontext.
//!
//! Kopiert einmal pro Frame den veröffentlichten Zustand, verarbeitet Klicks
//! und übernimmt asynchrone Einfüge-Ergebnisse aus dem Mutationskontext.

use super::channel::StateChannel;
use super::dispatcher::{self, DispatchOutcome, IgnoreReason};
use super::events::ToolInput;
use super::executor::MutationExecutor;
use super::overlay;
use super::panel::NodePanel;
use super::producer::ControlPointProducer;
use super::resolver::ControlPointResolver;
use super::state::{PublishedState, SelectionState, ToolPhase};
use crate::core::{NetworkMutator, ToolErrors};
use crate::shared::{OverlayScene, ToolOptions};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

/// Ergebnis einer ausgeführten Einfüge-Aktion, markiert mit der Epoche
/// der Selektion zum Zeitpunkt des Klicks.
#[derive(Debug, Clone, Copy)]
struct InsertionOutcome {
    epoch: u64,
    result: Result<u64, ToolErrors>,
}

/// Node-Controller-Werkzeug im Frame-Kontext.
pub struct NodeControllerTool<W, P> {
    options: ToolOptions,
    channel: Arc<StateChannel<PublishedState>>,
    active: Arc<AtomicBool>,
    cached: PublishedState,
    selection: SelectionState,
    panel: P,
    executor: Box<dyn MutationExecutor<W>>,
    outcome_tx: Sender<InsertionOutcome>,
    outcome_rx: Receiver<InsertionOutcome>,
    /// Wird bei jedem Aktivieren und Deaktivieren erhöht
    epoch: u64,
}

impl<W, P> NodeControllerTool<W, P>
where
    W: NetworkMutator + 'static,
    P: NodePanel,
{
    /// Erstellt Werkzeug und zugehörigen Producer für den Simulations-Tick.
    ///
    /// Das Werkzeug startet deaktiviert.
    pub fn create(
        options: ToolOptions,
        executor: impl MutationExecutor<W> + 'static,
        panel: P,
    ) -> (Self, ControlPointProducer) {
        let channel = Arc::new(StateChannel::new(
            PublishedState::default(),
            options.synchronize_timeout(),
        ));
        let active = Arc::new(AtomicBool::new(false));
        let producer = ControlPointProducer::new(
            ControlPointResolver::from_options(&options),
            Arc::clone(&channel),
            Arc::clone(&active),
        );
        let (outcome_tx, outcome_rx) = mpsc::channel();
        log::debug!(
            "Node-Controller erstellt (Snap-Radius {:.1} m)",
            producer.resolver().snap_radius()
        );

        let tool = Self {
            options,
            channel,
            active,
            cached: PublishedState::default(),
            selection: SelectionState::new(),
            panel,
            executor: Box::new(executor),
            outcome_tx,
            outcome_rx,
            epoch: 0,
        };
        (tool, producer)
    }

    /// Aktiviert das Werkzeug.
    pub fn enable(&mut self) {
        log::debug!("Node-Controller aktiviert");
        self.reset_interaction();
        self.active.store(true, Ordering::Release);
    }

    /// Deaktiviert das Werkzeug. Jederzeit aus dem Frame-Kontext aufrufbar.
    pub fn disable(&mut self) {
        log::debug!("Node-Controller deaktiviert");
        self.active.store(false, Ordering::Release);
        self.reset_interaction();
    }

    /// Gibt `true` zurück, wenn das Werkzeug aktiviert ist.
    pub fn is_enabled(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Frame-Beginn: aktuellen Zustand kopieren, Einfüge-Ergebnisse übernehmen.
    pub fn frame_update(&mut self) {
        if !self.is_enabled() {
            return;
        }
        self.cached = self.channel.consume_latest();

        while let Ok(outcome) = self.outcome_rx.try_recv() {
            if outcome.epoch != self.epoch {
                log::debug!(
                    "Veraltetes Einfüge-Ergebnis verworfen (Epoche {} statt {})",
                    outcome.epoch,
                    self.epoch
                );
                continue;
            }
            dispatcher::apply_insertion_result(outcome.result, &mut self.selection, &mut self.panel);
        }
    }

    /// Verarbeitet einen Primärklick auf Basis des gecachten Zustands.
    pub fn primary_click(&mut self, world: &W) -> DispatchOutcome {
        if !self.is_enabled() {
            return DispatchOutcome::Ignored(IgnoreReason::ToolInactive);
        }
        let epoch = self.epoch;
        let outcome_tx = self.outcome_tx.clone();
        let executor = &self.executor;

        dispatcher::primary_activate(
            &self.cached,
            &mut self.selection,
            world,
            &mut self.panel,
            |control_point| {
                executor.submit(Box::new(move |world: &mut W| {
                    let result = world.insert_node(&control_point);
                    // Empfänger existiert nicht mehr, wenn das Werkzeug entfernt wurde
                    let _ = outcome_tx.send(InsertionOutcome { epoch, result });
                }))
            },
        )
    }

    /// Verarbeitet einen Sekundärklick.
    ///
    /// Ein bereits eingereichtes Einfügen bleibt gültig und selektiert bei
    /// Erfolg den neuen Node.
    pub fn secondary_click(&mut self) -> DispatchOutcome {
        dispatcher::secondary_activate(&mut self.selection, &mut self.panel)
    }

    /// Zentraler Einstieg für Host-Eingaben.
    ///
    /// Liefert für Klicks das Dispatch-Ergebnis, für Lifecycle-Events `None`.
    pub fn handle_input(&mut self, input: ToolInput, world: &W) -> Option<DispatchOutcome> {
        match input {
            ToolInput::Enable => {
                self.enable();
                None
            }
            ToolInput::Disable => {
                self.disable();
                None
            }
            ToolInput::PrimaryClick => Some(self.primary_click(world)),
            ToolInput::SecondaryClick => Some(self.secondary_click()),
        }
    }

    /// Baut die Overlay-Szene dieses Frames.
    pub fn build_overlay(&self, world: &W) -> OverlayScene {
        if !self.is_enabled() {
            return OverlayScene::default();
        }
        overlay::build_overlay(&self.cached, &self.selection, world, &self.options)
    }

    /// Gecachter Zustand dieses Frames.
    pub fn cached_state(&self) -> &PublishedState {
        &self.cached
    }

    /// Aktuelle Selektion.
    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    /// Aktuelle Werkzeug-Phase.
    pub fn phase(&self) -> ToolPhase {
        ToolPhase::derive(self.is_enabled(), &self.selection, &self.cached)
    }

    /// Werkzeug-Optionen.
    pub fn options(&self) -> &ToolOptions {
        &self.options
    }

    /// Anzahl bisheriger Veröffentlichungen im Zustandskanal.
    pub fn published_count(&self) -> u64 {
        self.channel.sequence()
    }

    /// Zugriff auf das Panel.
    pub fn panel(&self) -> &P {
        &self.panel
    }

    fn reset_interaction(&mut self) {
        self.panel.close();
        self.selection.clear();
        self.epoch = self.epoch.wrapping_add(1);
        self.channel.reset();
        self.cached = PublishedState::default();
    }
}
