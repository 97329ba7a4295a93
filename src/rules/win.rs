//! Victory and tie judging shared by all policies
//!
//! Victory is exact: a run of precisely the victory length wins, longer runs
//! (overlines) do not.

use crate::board::{Pos, RunGroups};

use super::{Outcome, Placement};

/// Cells of the first run whose length is exactly `length`
pub fn exact_run(runs: &RunGroups, length: usize) -> Option<Vec<Pos>> {
    runs.iter()
        .find(|(_, cells)| cells.len() == length)
        .map(|(_, cells)| cells.iter().copied().collect())
}

/// Check if any run is longer than `length`
pub fn has_overline(runs: &RunGroups, length: usize) -> bool {
    runs.longest() > length
}

/// Win on an exact run, otherwise tie on a full board when enabled
pub fn judge(placement: &Placement, runs: &RunGroups, length: usize, ties: bool) -> Outcome {
    if let Some(cells) = exact_run(runs, length) {
        return Outcome::Won(cells);
    }
    if ties && placement.fills_board() {
        return Outcome::Tied;
    }
    Outcome::Continue
}
