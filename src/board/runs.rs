//! Run detection around a freshly placed stone
//!
//! Instead of scanning the whole board after each move, the search starts at
//! the queried stone and spreads recursively through same-owner neighbors.
//! Once a neighbor is found on an axis the recursion for that axis stays
//! pinned to it, so the cost is bounded by the run length.

use std::collections::BTreeSet;

use super::{Board, Direction, Pos, Stone};

/// Maximal same-owner runs through one stone, bucketed by axis.
///
/// A stone with no same-owner neighbor on an axis has an empty set for that
/// axis, not a one-element set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunGroups {
    runs: [BTreeSet<Pos>; 4],
}

impl RunGroups {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn slot(dir: Direction) -> usize {
        dir.id() as usize - 1
    }

    /// Cells of the run on one axis
    pub fn get(&self, dir: Direction) -> &BTreeSet<Pos> {
        &self.runs[Self::slot(dir)]
    }

    /// Length of the run on one axis (0 when no neighbor joined it)
    pub fn len(&self, dir: Direction) -> usize {
        self.get(dir).len()
    }

    pub fn insert(&mut self, dir: Direction, pos: Pos) -> bool {
        self.runs[Self::slot(dir)].insert(pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, &BTreeSet<Pos>)> {
        Direction::ALL.into_iter().zip(self.runs.iter())
    }

    /// True when no axis has a run
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(BTreeSet::is_empty)
    }

    /// Longest run over all axes
    pub fn longest(&self) -> usize {
        self.runs.iter().map(BTreeSet::len).max().unwrap_or(0)
    }
}

impl FromIterator<(Direction, Pos)> for RunGroups {
    fn from_iter<I: IntoIterator<Item = (Direction, Pos)>>(iter: I) -> Self {
        let mut groups = RunGroups::new();
        for (dir, pos) in iter {
            groups.insert(dir, pos);
        }
        groups
    }
}

impl Board {
    /// Find the runs through `pos` for the stone standing there.
    ///
    /// A run stops growing once it holds `limit` cells, so an axis reports
    /// either its exact length (below `limit`) or at least `limit`.
    /// Empty and off-board positions yield empty groups.
    pub fn find_runs(&self, pos: Pos, limit: usize) -> RunGroups {
        let mut groups = RunGroups::new();
        let owner = match self.get(pos) {
            Ok(stone) if stone != Stone::Empty => stone,
            _ => return groups,
        };

        let neighbors: Vec<Pos> = self
            .neighbors(pos)
            .filter(|&n| self.stone_at(n) == owner)
            .collect();

        for next in neighbors {
            let dir = match axis_between(pos, next) {
                Some(dir) => dir,
                None => continue,
            };
            let run = &mut groups.runs[RunGroups::slot(dir)];
            if run.len() >= limit || run.contains(&next) {
                continue;
            }
            run.insert(pos);
            run.insert(next);
            self.extend_run(next, owner, dir, run, limit);
        }

        groups
    }

    /// Follow a run along a pinned axis
    fn extend_run(&self, pos: Pos, owner: Stone, dir: Direction, run: &mut BTreeSet<Pos>, limit: usize) {
        if run.len() >= limit {
            return;
        }
        for (dr, dc) in dir.steps() {
            let next = match pos.offset(dr, dc) {
                Some(p) if self.contains(p) => p,
                _ => continue,
            };
            if self.stone_at(next) != owner || run.contains(&next) {
                continue;
            }
            run.insert(next);
            self.extend_run(next, owner, dir, run, limit);
        }
    }
}

fn axis_between(from: Pos, to: Pos) -> Option<Direction> {
    let dr = to.row as i32 - from.row as i32;
    let dc = to.col as i32 - from.col as i32;
    Direction::classify(dr, dc)
}
