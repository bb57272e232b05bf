//! Straßentyp-Beschreibung (Prefab) mit geometrischen Grenzwerten.

use super::ToolErrors;
use glam::Vec3;

/// Beschreibt die geometrischen Einschränkungen eines Straßentyps.
///
/// Zwei Segmente gelten als gleicher Typ, wenn ihre Prefab-Namen übereinstimmen.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkPrefab {
    /// Eindeutiger Name des Straßentyps
    pub name: String,
    /// Halbe Straßenbreite in Metern
    pub half_width: f32,
    /// Minimale Länge eines Segments in Metern
    pub min_segment_length: f32,
    /// Maximale Steigung (Höhe / horizontale Länge)
    pub max_slope: f32,
}

impl NetworkPrefab {
    /// Erstellt einen Straßentyp.
    pub fn new(name: impl Into<String>, half_width: f32, min_segment_length: f32, max_slope: f32) -> Self {
        Self {
            name: name.into(),
            half_width,
            min_segment_length,
            max_slope,
        }
    }

    /// Gibt `true` zurück, wenn beide Prefabs denselben Straßentyp beschreiben.
    pub fn same_type(&self, other: &NetworkPrefab) -> bool {
        self.name == other.name
    }

    /// Prüft, ob ein Node an `candidate` zwischen `start` und `end` eingefügt werden darf.
    ///
    /// Liefert `TOO_SHORT`, wenn eines der beiden Teilsegmente kürzer als
    /// `min_segment_length` würde, und `SLOPE_TOO_STEEP`, wenn eines steiler als
    /// `max_slope` ist. Reine Geometrie, keine Kollisionsprüfung.
    pub fn check_build_position(&self, start: Vec3, candidate: Vec3, end: Vec3) -> ToolErrors {
        let mut errors = ToolErrors::empty();
        for (a, b) in [(start, candidate), (candidate, end)] {
            if a.distance(b) < self.min_segment_length {
                errors |= ToolErrors::TOO_SHORT;
            }
            if slope(a, b) > self.max_slope {
                errors |= ToolErrors::SLOPE_TOO_STEEP;
            }
        }
        errors
    }
}

/// Steigung zwischen zwei Punkten (|Δy| / horizontale XZ-Länge).
fn slope(a: Vec3, b: Vec3) -> f32 {
    let horizontal = glam::Vec2::new(b.x - a.x, b.z - a.z).length();
    if horizontal < f32::EPSILON {
        return 0.0;
    }
    (b.y - a.y).abs() / horizontal
}
