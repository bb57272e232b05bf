//! Eingabe-Events des Werkzeugs aus Host-UI und Maus.

/// Eingaben, die der Host an das Werkzeug weiterreicht.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolInput {
    /// Werkzeug wurde ausgewählt
    Enable,
    /// Werkzeug wurde abgewählt
    Disable,
    /// Linksklick in die Welt
    PrimaryClick,
    /// Rechtsklick in die Welt
    SecondaryClick,
}
