//! Serialisierte Ausführung verzögerter Welt-Mutationen.
//!
//! Der Frame-Kontext reicht Aktionen ein, der Simulations-Kontext führt sie
//! beim nächsten `run_pending` genau einmal und in Einreichungsreihenfolge aus.

use std::sync::mpsc::{self, Receiver, Sender};
use thiserror::Error;

/// Eine verzögerte Mutation am Weltmodell `W`.
pub type DeferredAction<W> = Box<dyn FnOnce(&mut W) + Send + 'static>;

/// Fehler beim Einreichen einer Aktion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExecutorError {
    /// Die ausführende Queue existiert nicht mehr
    #[error("Mutations-Queue ist geschlossen")]
    Closed,
}

/// Schnittstelle für Kontexte, die Welt-Mutationen serialisiert ausführen.
pub trait MutationExecutor<W>: Send {
    /// Reicht eine Aktion zur späteren Ausführung ein.
    fn submit(&self, action: DeferredAction<W>) -> Result<(), ExecutorError>;
}

/// Empfangsseite: gehört dem Kontext, der die Welt mutieren darf.
pub struct ActionQueue<W> {
    sender: Sender<DeferredAction<W>>,
    receiver: Receiver<DeferredAction<W>>,
}

impl<W> Default for ActionQueue<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> ActionQueue<W> {
    /// Erstellt eine leere Queue.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    /// Liefert einen Sender für andere Kontexte.
    pub fn sender(&self) -> ActionSender<W> {
        ActionSender {
            sender: self.sender.clone(),
        }
    }

    /// Führt alle bis jetzt eingereichten Aktionen aus.
    ///
    /// Aktionen, die währenddessen eingehen, laufen erst beim nächsten Aufruf.
    /// Gibt die Anzahl ausgeführter Aktionen zurück.
    pub fn run_pending(&self, world: &mut W) -> usize {
        let pending: Vec<DeferredAction<W>> = self.receiver.try_iter().collect();
        let count = pending.len();
        for action in pending {
            action(world);
        }
        if count > 0 {
            log::debug!("{} verzögerte Aktion(en) ausgeführt", count);
        }
        count
    }
}

/// Sendeseite einer `ActionQueue`.
pub struct ActionSender<W> {
    sender: Sender<DeferredAction<W>>,
}

impl<W> Clone for ActionSender<W> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<W> ActionSender<W> {
    /// Reicht eine Aktion ein.
    pub fn submit(&self, action: DeferredAction<W>) -> Result<(), ExecutorError> {
        self.sender.send(action).map_err(|_| ExecutorError::Closed)
    }
}

impl<W: 'static> MutationExecutor<W> for ActionSender<W> {
    fn submit(&self, action: DeferredAction<W>) -> Result<(), ExecutorError> {
        ActionSender::submit(self, action)
    }
}
