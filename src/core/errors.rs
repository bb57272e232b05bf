//! Validierungs-Flags eines Control-Points.

use bitflags::bitflags;

bitflags! {
    /// Kombinierbare Validierungsfehler eines Auflösungs-Durchlaufs.
    ///
    /// Leere Menge = vollständig gültig. Einzelne Prüfschritte werden per `|` vereinigt.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ToolErrors: u32 {
        /// Kein gültiges Cursor-Ziel in diesem Tick
        const RAYCAST_FAILED = 0b0000_0001;
        /// Das Segment existiert nicht mehr oder die Position liegt nicht darauf
        const BUILD_POSITION_CONFLICT = 0b0000_0010;
        /// Mindestens ein Teilsegment wäre kürzer als erlaubt
        const TOO_SHORT = 0b0000_0100;
        /// Steigung überschreitet das Limit des Straßentyps
        const SLOPE_TOO_STEEP = 0b0000_1000;
        /// Fremder Node liegt zu nah an der Einfügeposition
        const OBJECT_COLLISION = 0b0001_0000;
    }
}

impl ToolErrors {
    /// Gibt `true` zurück, wenn kein Fehler gesetzt ist.
    #[inline]
    pub fn is_none(self) -> bool {
        self.is_empty()
    }

    /// Gibt `true` zurück, wenn der Cursor in diesem Tick kein gültiges Ziel hatte.
    #[inline]
    pub fn hover_failed(self) -> bool {
        self.contains(Self::RAYCAST_FAILED)
    }
}

#[cfg(test)]
mod tests {
    use super::ToolErrors;

    #[test]
    fn flags_combine_with_or() {
        let errors = ToolErrors::TOO_SHORT | ToolErrors::SLOPE_TOO_STEEP;

        assert!(errors.contains(ToolErrors::TOO_SHORT));
        assert!(errors.contains(ToolErrors::SLOPE_TOO_STEEP));
        assert!(!errors.hover_failed());
        assert!(!errors.is_none());
    }

    #[test]
    fn default_is_valid() {
        assert!(ToolErrors::default().is_none());
    }
}
