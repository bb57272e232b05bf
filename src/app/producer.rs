//! Producer-Seite: läuft im Simulations-Kontext und veröffentlicht pro Tick
//! einen vollständigen Zustand.

use super::channel::StateChannel;
use super::resolver::ControlPointResolver;
use super::state::PublishedState;
use crate::core::{HoverTarget, WorldQuery};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Handle für den Simulations-Tick.
///
/// Teilt sich Kanal und Aktiv-Flag mit dem zugehörigen Werkzeug.
pub struct ControlPointProducer {
    resolver: ControlPointResolver,
    channel: Arc<StateChannel<PublishedState>>,
    active: Arc<AtomicBool>,
}

impl ControlPointProducer {
    pub(crate) fn new(
        resolver: ControlPointResolver,
        channel: Arc<StateChannel<PublishedState>>,
        active: Arc<AtomicBool>,
    ) -> Self {
        Self {
            resolver,
            channel,
            active,
        }
    }

    /// Gibt `true` zurück, solange das Werkzeug aktiviert ist.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Verwendeter Resolver.
    pub fn resolver(&self) -> &ControlPointResolver {
        &self.resolver
    }

    /// Ein Simulations-Tick: Hover auflösen und Ergebnis veröffentlichen.
    ///
    /// Bei deaktiviertem Werkzeug passiert nichts. Gibt `true` zurück,
    /// wenn veröffentlicht wurde.
    pub fn simulation_step<W: WorldQuery + ?Sized>(&self, hover: &HoverTarget, world: &W) -> bool {
        if !self.is_active() {
            return false;
        }

        let (control_point, errors) = self.resolver.resolve(hover, world);
        let prefab = if hover.ray_valid {
            hover
                .hovered_segment
                .and_then(|segment_id| world.segment_prefab(segment_id))
        } else {
            None
        };

        log::trace!("Tick: {} {:?}", control_point, errors);
        self.channel.publish(PublishedState {
            control_point,
            errors,
            prefab,
            hit_position: hover.hit_position,
        });
        true
    }
}
