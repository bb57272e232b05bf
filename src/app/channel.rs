//! Einzel-Slot-Kanal für die Übergabe des letzten vollständigen Zustands.
//!
//! Producer (Simulations-Tick) und Consumer (Frame) laufen mit eigenem Takt.
//! Beide greifen nur kurz und mit begrenzter Wartezeit auf den Slot zu und
//! kopieren den Wert hinein bzw. heraus. Läuft die Wartezeit ab, wird erneut
//! versucht: ein verlorener Tick ließe den Consumer auf veralteten Fehlern sitzen.

use std::sync::{Mutex, MutexGuard, TryLockError};
use std::time::{Duration, Instant};

struct Slot<T> {
    /// Anzahl bisheriger Veröffentlichungen
    sequence: u64,
    value: T,
}

/// Kanal mit genau einem Slot: der zuletzt veröffentlichte Wert.
///
/// Ein `consume_latest()`, das zeitlich mit einem `publish()` überlappt, liefert
/// entweder den alten oder den neuen Wert vollständig, nie eine Mischung.
pub struct StateChannel<T> {
    slot: Mutex<Slot<T>>,
    timeout: Duration,
}

impl<T: Clone> StateChannel<T> {
    /// Erstellt einen Kanal mit Startwert und Wartezeit pro Lock-Versuch.
    pub fn new(initial: T, timeout: Duration) -> Self {
        Self {
            slot: Mutex::new(Slot {
                sequence: 0,
                value: initial,
            }),
            timeout,
        }
    }

    /// Ersetzt den aktuellen Wert.
    ///
    /// Blockiert höchstens `timeout` pro Versuch und versucht es danach erneut.
    pub fn publish(&self, value: T) {
        let previous = {
            let mut slot = self.lock_slot();
            slot.sequence += 1;
            std::mem::replace(&mut slot.value, value)
        };
        // Alter Wert wird außerhalb des kritischen Abschnitts freigegeben
        drop(previous);
    }

    /// Liefert eine Kopie des zuletzt veröffentlichten Werts.
    pub fn consume_latest(&self) -> T {
        self.lock_slot().value.clone()
    }

    /// Liefert Kopie und Sequenznummer des zuletzt veröffentlichten Werts.
    pub fn consume_latest_versioned(&self) -> (u64, T) {
        let slot = self.lock_slot();
        (slot.sequence, slot.value.clone())
    }

    /// Anzahl bisheriger Veröffentlichungen.
    pub fn sequence(&self) -> u64 {
        self.lock_slot().sequence
    }

    fn lock_slot(&self) -> MutexGuard<'_, Slot<T>> {
        let mut retries: u32 = 0;
        loop {
            if let Some(guard) = self.try_lock_for(self.timeout) {
                if retries > 0 {
                    log::trace!("Zustandskanal nach {} Wiederholungen gesperrt", retries);
                }
                return guard;
            }
            retries = retries.saturating_add(1);
            log::trace!("Zustandskanal belegt, neuer Versuch ({})", retries);
        }
    }

    fn try_lock_for(&self, timeout: Duration) -> Option<MutexGuard<'_, Slot<T>>> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.slot.try_lock() {
                Ok(guard) => return Some(guard),
                Err(TryLockError::Poisoned(poisoned)) => {
                    // Der Slot wird nur per Zuweisung ersetzt, ein Abbruch hinterlässt keinen Teilwert
                    log::warn!("Zustandskanal war vergiftet, übernehme letzten Wert");
                    self.slot.clear_poison();
                    return Some(poisoned.into_inner());
                }
                Err(TryLockError::WouldBlock) => {
                    if Instant::now() >= deadline {
                        return None;
                    }
                    std::hint::spin_loop();
                    std::thread::yield_now();
                }
            }
        }
    }
}

impl<T: Clone + Default> StateChannel<T> {
    /// Veröffentlicht den Standardwert (z.B. beim Deaktivieren des Werkzeugs).
    pub fn reset(&self) {
        self.publish(T::default());
    }
}

impl<T: Clone + Default> Default for StateChannel<T> {
    fn default() -> Self {
        Self::new(
            T::default(),
            Duration::from_millis(crate::shared::options::SYNCHRONIZE_TIMEOUT_MS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn starts_with_initial_value() {
        let channel = StateChannel::new(7u32, Duration::from_millis(1));
        assert_eq!(channel.consume_latest_versioned(), (0, 7));
    }

    #[test]
    fn publish_replaces_and_counts() {
        let channel = StateChannel::new(0u32, Duration::from_millis(1));
        channel.publish(1);
        channel.publish(2);

        assert_eq!(channel.consume_latest(), 2);
        assert_eq!(channel.sequence(), 2);
    }

    #[test]
    fn reset_publishes_default() {
        let channel: StateChannel<u32> = StateChannel::default();
        channel.publish(9);
        channel.reset();

        assert_eq!(channel.consume_latest_versioned(), (2, 0));
    }

    #[test]
    fn publish_retries_past_timeout_instead_of_dropping() {
        let channel = Arc::new(StateChannel::new(0u32, Duration::from_millis(1)));
        let guard = channel.slot.lock().expect("Lock erwartet");

        let writer = {
            let channel = Arc::clone(&channel);
            thread::spawn(move || channel.publish(5))
        };

        // Deutlich länger halten als die Wartezeit pro Versuch
        thread::sleep(Duration::from_millis(30));
        assert!(!writer.is_finished());
        drop(guard);

        writer.join().expect("Writer-Thread erwartet");
        assert_eq!(channel.consume_latest_versioned(), (1, 5));
    }

    #[test]
    fn recovers_from_poisoned_slot() {
        let channel = Arc::new(StateChannel::new(3u32, Duration::from_millis(1)));
        {
            let channel = Arc::clone(&channel);
            let _ = thread::spawn(move || {
                let _guard = channel.slot.lock().expect("Lock erwartet");
                panic!("Abbruch im kritischen Abschnitt");
            })
            .join();
        }

        assert_eq!(channel.consume_latest(), 3);
        channel.publish(4);
        assert_eq!(channel.consume_latest(), 4);
    }
}
