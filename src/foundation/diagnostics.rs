use std::fmt;

/// Advisory data-completeness finding. Never fatal; drawing continues for other records.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// No color-table entry; the continent is drawn in fallback red.
    MissingColor {
        /// Continent name as read from the dataset.
        continent: String,
    },
    /// No position-table entry; the continent is left out of the overlay.
    MissingPosition {
        /// Continent name as read from the dataset.
        continent: String,
    },
}

impl Diagnostic {
    /// Continent the finding refers to.
    pub fn continent(&self) -> &str {
        match self {
            Self::MissingColor { continent } | Self::MissingPosition { continent } => continent,
        }
    }

    /// Log this diagnostic at `warn` level.
    pub(crate) fn emit(&self) {
        match self {
            Self::MissingColor { continent } => {
                tracing::warn!(continent = %continent, "no color defined; using fallback red")
            }
            Self::MissingPosition { continent } => {
                tracing::warn!(continent = %continent, "no position defined; skipping overlay")
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColor { continent } => write!(f, "no color defined for {continent}"),
            Self::MissingPosition { continent } => {
                write!(f, "no position defined for {continent}")
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/diagnostics.rs"]
mod tests;
