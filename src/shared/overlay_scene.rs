//! Overlay-Szene als expliziter Übergabevertrag zwischen Werkzeug und Renderer.
//!
//! Lebt im shared-Modul, da `app` sie baut und ein externer Renderer sie konsumiert.

use glam::Vec3;

/// Zeichenstil eines Overlay-Kreises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircleStyle {
    /// Nur Umriss
    Outline,
    /// Gefüllt
    Filled,
}

/// Ein zu zeichnender Kreis in Weltkoordinaten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayCircle {
    /// Mittelpunkt
    pub center: Vec3,
    /// Radius in Metern
    pub radius: f32,
    /// Farbe (RGBA)
    pub color: [f32; 4],
    /// Zeichenstil
    pub style: CircleStyle,
}

/// Read-only Daten für einen Overlay-Frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayScene {
    /// Kreise in Zeichenreihenfolge
    pub circles: Vec<OverlayCircle>,
}

impl OverlayScene {
    /// Gibt `true` zurück, wenn nichts zu zeichnen ist.
    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }

    pub(crate) fn push(&mut self, center: Vec3, radius: f32, color: [f32; 4], style: CircleStyle) {
        self.circles.push(OverlayCircle {
            center,
            radius,
            color,
            style,
        });
    }
}
