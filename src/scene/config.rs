use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{RivermapError, RivermapResult};

/// One color-table entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorEntry {
    /// Continent name, matched exactly against trimmed dataset names.
    pub name: String,
    /// Display color as `[r, g, b]`.
    pub rgb: [u8; 3],
}

/// Static continent-name to color mapping. Declaration order is significant: the legend bar
/// draws the entries last-declared first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorTable(pub Vec<ColorEntry>);

impl ColorTable {
    /// Configured color for `name`.
    pub fn get(&self, name: &str) -> Option<Rgba8> {
        self.0
            .iter()
            .find(|e| e.name == name)
            .map(|e| Rgba8::from_rgb(e.rgb))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in declared order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ColorEntry> {
        self.0.iter()
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        let e = |name: &str, rgb: [u8; 3]| ColorEntry {
            name: name.to_string(),
            rgb,
        };
        Self(vec![
            e("Asia", [29, 52, 99]),
            e("Europe", [11, 70, 151]),
            e("South America", [0, 104, 179]),
            e("North America", [0, 150, 217]),
            e("Africa", [100, 191, 237]),
            e("Oceania", [201, 230, 250]),
            e("Australia", [201, 230, 250]),
        ])
    }
}

/// One position-table entry, as fractions of the displayed map size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionEntry {
    /// Continent name.
    pub name: String,
    /// Horizontal fraction of the displayed map width.
    pub x: f64,
    /// Vertical fraction of the displayed map height.
    pub y: f64,
}

/// Static continent-name to relative map position mapping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionTable(pub Vec<PositionEntry>);

impl PositionTable {
    /// Relative `(x, y)` position for `name`.
    pub fn get(&self, name: &str) -> Option<(f64, f64)> {
        self.0
            .iter()
            .find(|e| e.name == name)
            .map(|e| (e.x, e.y))
    }
}

impl Default for PositionTable {
    fn default() -> Self {
        let e = |name: &str, x: f64, y: f64| PositionEntry {
            name: name.to_string(),
            x,
            y,
        };
        Self(vec![
            e("Asia", 0.715, 0.40),
            e("Europe", 0.50, 0.38),
            e("South America", 0.335, 0.69),
            e("North America", 0.23, 0.38),
            e("Africa", 0.53, 0.63),
            e("Oceania", 0.89, 0.82),
            e("Australia", 0.80, 0.73),
        ])
    }
}

/// Text drawn by the visualization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    /// Tooltip line prefix before the continent name.
    pub tooltip_continent: String,
    /// Tooltip line prefix before the river count.
    pub tooltip_rivers: String,
    /// Tooltip line prefix before the tributary count.
    pub tooltip_tributaries: String,
    /// Title of the river-count legend section.
    pub legend_rivers: String,
    /// Title of the tributary legend section.
    pub legend_tributaries: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            tooltip_continent: "Continente: ".to_string(),
            tooltip_rivers: "Fiumi principali: ".to_string(),
            tooltip_tributaries: "Fiumi tributari: ".to_string(),
            legend_rivers: "Numero di fiumi per continente".to_string(),
            legend_tributaries: "Numero di fiumi tributari per continente".to_string(),
        }
    }
}

/// Visualization configuration. Every field is optional in JSON and defaults to the built-in
/// world map setup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    /// Title drawn at the top-left of the canvas.
    pub title: String,
    /// Tooltip and legend text.
    pub labels: Labels,
    /// Continent colors.
    pub color_table: ColorTable,
    /// Continent map positions.
    pub position_table: PositionTable,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            title: "Quanti fiumi ha ogni continente?".to_string(),
            labels: Labels::default(),
            color_table: ColorTable::default(),
            position_table: PositionTable::default(),
        }
    }
}

impl VizConfig {
    /// Parse a configuration from a JSON reader and validate it.
    pub fn from_reader<R: std::io::Read>(r: R) -> RivermapResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| RivermapError::serde(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration from a JSON file on disk and validate it.
    pub fn from_path(path: impl AsRef<Path>) -> RivermapResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            RivermapError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject duplicate table keys and positions outside the map.
    pub fn validate(&self) -> RivermapResult<()> {
        let mut seen = BTreeSet::new();
        for e in self.color_table.iter() {
            if !seen.insert(e.name.as_str()) {
                return Err(RivermapError::validation(format!(
                    "duplicate color_table entry '{}'",
                    e.name
                )));
            }
        }

        let mut seen = BTreeSet::new();
        for e in &self.position_table.0 {
            if !seen.insert(e.name.as_str()) {
                return Err(RivermapError::validation(format!(
                    "duplicate position_table entry '{}'",
                    e.name
                )));
            }
            let in_unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
            if !in_unit(e.x) || !in_unit(e.y) {
                return Err(RivermapError::validation(format!(
                    "position for '{}' must be fractions in [0, 1]",
                    e.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
