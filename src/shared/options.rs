//! Zentrale Konfiguration für das Node-Controller-Werkzeug.
//!
//! `ToolOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};
use std::time::Duration;

// ── Snapping ────────────────────────────────────────────────────────

/// Meter pro Welteinheit (Rastergröße des Straßennetzes).
pub const METERS_PER_UNIT: f32 = 8.0;
/// Snap-Radius in Welteinheiten: Treffer näher als das rastet immer auf den Node ein.
pub const SNAP_RADIUS_UNITS: f32 = 2.0;
/// Maximale Distanz Cursor → Segment für die Hover-Erkennung (Meter).
pub const HOVER_PICK_RADIUS: f32 = 8.0;

// ── Synchronisation ─────────────────────────────────────────────────

/// Wartezeit pro Lock-Versuch auf dem Zustandskanal, danach neuer Versuch.
pub const SYNCHRONIZE_TIMEOUT_MS: u64 = 1;

// ── Overlay ─────────────────────────────────────────────────────────

/// Radius der Node-Markierung in Metern.
pub const NODE_CIRCLE_RADIUS: f32 = 4.0;
/// Radius der Cursor-Markierung in Metern.
pub const HIT_MARKER_RADIUS: f32 = 1.0;
/// Farbe für gültige Ziele (RGBA: Cyan).
pub const COLOR_VALID: [f32; 4] = [0.0, 0.8, 1.0, 1.0];
/// Farbe für ungültige/blockierte Ziele (RGBA: Rot-Orange).
pub const COLOR_INVALID: [f32; 4] = [1.0, 0.3, 0.1, 1.0];
/// Farbe des selektierten Nodes (RGBA: Weiß).
pub const COLOR_SELECTED: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
/// Farbe der Zwischenknoten-Nachbarn (RGBA: Grau).
pub const COLOR_MIDDLE: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
/// Farbe der Cursor-Markierung (RGBA: Rot).
pub const COLOR_HIT: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Werkzeug-Optionen.
/// Wird als `node_controller.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToolOptions {
    // ── Snapping ────────────────────────────────────────────────
    /// Meter pro Welteinheit
    pub meters_per_unit: f32,
    /// Snap-Radius in Welteinheiten
    pub snap_radius_units: f32,
    /// Hover-Radius für die Segment-Erkennung in Metern
    pub hover_pick_radius: f32,

    // ── Synchronisation ─────────────────────────────────────────
    /// Wartezeit pro Lock-Versuch in Millisekunden
    pub synchronize_timeout_ms: u64,

    // ── Overlay ─────────────────────────────────────────────────
    /// Radius der Node-Markierung
    pub node_circle_radius: f32,
    /// Radius der Cursor-Markierung
    pub hit_marker_radius: f32,
    /// Farbe gültiger Ziele
    pub color_valid: [f32; 4],
    /// Farbe ungültiger Ziele
    pub color_invalid: [f32; 4],
    /// Farbe des selektierten Nodes
    pub color_selected: [f32; 4],
    /// Farbe der Zwischenknoten-Nachbarn
    pub color_middle: [f32; 4],
    /// Farbe der Cursor-Markierung
    pub color_hit: [f32; 4],
}

impl Default for ToolOptions {
    fn default() -> Self {
        Self {
            meters_per_unit: METERS_PER_UNIT,
            snap_radius_units: SNAP_RADIUS_UNITS,
            hover_pick_radius: HOVER_PICK_RADIUS,
            synchronize_timeout_ms: SYNCHRONIZE_TIMEOUT_MS,
            node_circle_radius: NODE_CIRCLE_RADIUS,
            hit_marker_radius: HIT_MARKER_RADIUS,
            color_valid: COLOR_VALID,
            color_invalid: COLOR_INVALID,
            color_selected: COLOR_SELECTED,
            color_middle: COLOR_MIDDLE,
            color_hit: COLOR_HIT,
        }
    }
}

impl ToolOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("node_controller"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("node_controller.toml")
    }

    /// Snap-Radius in Metern (`snap_radius_units * meters_per_unit`).
    pub fn snap_radius(&self) -> f32 {
        self.snap_radius_units * self.meters_per_unit
    }

    /// Wartezeit pro Lock-Versuch.
    pub fn synchronize_timeout(&self) -> Duration {
        Duration::from_millis(self.synchronize_timeout_ms)
    }
}
