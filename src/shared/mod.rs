//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Typen, die zwischen `app` und einem externen Renderer geteilt werden,
//! um direkte Abhängigkeiten zu vermeiden.

pub mod options;
mod overlay_scene;

pub use options::ToolOptions;
pub use overlay_scene::{CircleStyle, OverlayCircle, OverlayScene};
