use std::collections::BTreeSet;

use log::debug;

use super::model::PlayerStatsTable;
use crate::config::POSITIONS;

pub const TEAM_COLUMN: &str = "team";
pub const POSITION_COLUMN: &str = "pos";

// ---------------------------------------------------------------------------
// Filter predicate: which teams and positions are selected
// ---------------------------------------------------------------------------

/// The user's team and position selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub teams: BTreeSet<String>,
    pub positions: BTreeSet<String>,
}

impl FilterSelection {
    /// Everything selected for `table`, i.e. the unfiltered view.
    pub fn all_for(table: &PlayerStatsTable) -> Self {
        Self {
            teams: team_options(table).into_iter().collect(),
            positions: position_options(table).into_iter().collect(),
        }
    }
}

/// Team codes of the table, sorted.
pub fn team_options(table: &PlayerStatsTable) -> Vec<String> {
    table.unique_strings(TEAM_COLUMN)
}

/// The fixed positions, followed by any other position code the table holds
/// (combined codes such as `SF-PF`, or `G`/`F` in early seasons).
pub fn position_options(table: &PlayerStatsTable) -> Vec<String> {
    let mut out: Vec<String> = POSITIONS.iter().map(|p| p.to_string()).collect();
    for pos in table.unique_strings(POSITION_COLUMN) {
        if !out.contains(&pos) {
            out.push(pos);
        }
    }
    out
}

/// Return indices of rows that pass the selection, in table order.
///
/// A row passes a column constraint when:
/// * The table has no such column → passes (no constraint)
/// * The selected set is empty → nothing selected → fails
/// * The row's value for that column is in the selected set → passes
pub fn filtered_indices(table: &PlayerStatsTable, selection: &FilterSelection) -> Vec<usize> {
    let active: Vec<(usize, &BTreeSet<String>)> = [
        (TEAM_COLUMN, &selection.teams),
        (POSITION_COLUMN, &selection.positions),
    ]
    .into_iter()
    .filter_map(|(col, selected)| table.column_index(col).map(|idx| (idx, selected)))
    .collect();
    if active.iter().any(|(_, selected)| selected.is_empty()) {
        return Vec::new();
    }

    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            active
                .iter()
                .all(|(idx, selected)| selected.contains(&row[*idx].to_string()))
        })
        .map(|(i, _)| i)
        .collect()
}

/// Rows of `table` matching the selection, as a new table.
pub fn filter(table: &PlayerStatsTable, selection: &FilterSelection) -> PlayerStatsTable {
    let indices = filtered_indices(table, selection);
    debug!("filter kept {} of {} rows", indices.len(), table.len());
    table.select_rows(&indices)
}
