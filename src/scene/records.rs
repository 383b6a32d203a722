use std::collections::BTreeMap;

use crate::assets::dataset::DataTable;
use crate::foundation::core::Rgba8;
use crate::foundation::diagnostics::Diagnostic;
use crate::foundation::error::{RivermapError, RivermapResult};
use crate::scene::config::ColorTable;

/// Dataset column holding the continent name.
pub const COL_CONTINENT: &str = "Continent";
/// Dataset column holding the main river count.
pub const COL_RIVER_COUNT: &str = "River_Count";
/// Dataset column holding the tributary sum.
pub const COL_TRIBUTARY_SUM: &str = "Tributary_Sum";

/// One parsed dataset row.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ContinentRecord {
    /// Trimmed continent name.
    pub name: String,
    /// Number of main rivers.
    pub river_count: u32,
    /// Number of tributaries.
    pub tributary_sum: u32,
}

/// Continent name to display color, after table lookup and fallback.
pub type ResolvedColors = BTreeMap<String, Rgba8>;

/// Convert loaded rows into continent records.
///
/// Names are trimmed; duplicates are kept as separate records. Counts must be non-negative
/// integers; anything else fails the load with the offending line and column.
#[tracing::instrument(skip(table), fields(rows = table.row_count()))]
pub fn prepare(table: &DataTable) -> RivermapResult<Vec<ContinentRecord>> {
    for col in [COL_CONTINENT, COL_RIVER_COUNT, COL_TRIBUTARY_SUM] {
        if table.column_index(col).is_none() {
            return Err(RivermapError::data(format!(
                "dataset is missing required column '{col}'"
            )));
        }
    }

    let mut out = Vec::with_capacity(table.row_count());
    for row in 0..table.row_count() {
        let field = |col: &str| table.get(row, col).unwrap_or_default();
        let line = table.line_of(row).unwrap_or_default();

        out.push(ContinentRecord {
            name: field(COL_CONTINENT).trim().to_string(),
            river_count: parse_count(field(COL_RIVER_COUNT), line, COL_RIVER_COUNT)?,
            tributary_sum: parse_count(field(COL_TRIBUTARY_SUM), line, COL_TRIBUTARY_SUM)?,
        });
    }
    tracing::debug!(records = out.len(), "prepared continent records");
    Ok(out)
}

fn parse_count(raw: &str, line: usize, col: &str) -> RivermapResult<u32> {
    raw.trim().parse::<u32>().map_err(|e| {
        RivermapError::data(format!(
            "line {line}: column '{col}' must be a non-negative integer, got '{raw}' ({e})"
        ))
    })
}

/// Resolve each record's display color from `table`.
///
/// Misses fall back to [`Rgba8::FALLBACK_RED`] and yield one [`Diagnostic::MissingColor`] per
/// offending record; the remaining records are still resolved.
pub fn assign_colors(
    records: &[ContinentRecord],
    table: &ColorTable,
) -> (ResolvedColors, Vec<Diagnostic>) {
    let mut colors = ResolvedColors::new();
    let mut diags = Vec::new();
    for r in records {
        let color = match table.get(&r.name) {
            Some(c) => c,
            None => {
                let d = Diagnostic::MissingColor {
                    continent: r.name.clone(),
                };
                d.emit();
                diags.push(d);
                Rgba8::FALLBACK_RED
            }
        };
        colors.insert(r.name.clone(), color);
    }
    (colors, diags)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/records.rs"]
mod tests;
