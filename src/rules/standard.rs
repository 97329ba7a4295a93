//! Standard Gomoku
//!
//! Freestyle victory plus one legality constraint: Black may not form an
//! overline. Such a placement is refused and taken back. White may form
//! overlines, they just never win.

use crate::board::{RunGroups, Stone};

use super::win::{has_overline, judge};
use super::{Outcome, Placement, Rejection, RulePolicy, RuleSettings};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standard {
    board_size: usize,
    victory_length: usize,
    ties: bool,
}

impl Standard {
    pub const NAME: &'static str = "standard";

    pub fn new(settings: RuleSettings) -> Self {
        Self {
            board_size: settings.board_size,
            victory_length: settings.victory_length,
            ties: settings.ties,
        }
    }

    pub fn boxed(settings: RuleSettings) -> Box<dyn RulePolicy> {
        Box::new(Self::new(settings))
    }

    /// Legality checks run before victory is judged
    fn check_legal(&self, placement: &Placement, runs: &RunGroups) -> Result<(), Rejection> {
        if placement.stone == Stone::Black && has_overline(runs, self.victory_length) {
            return Err(Rejection::new(
                "Overline",
                format!(
                    "Black may not make a line longer than {}.",
                    self.victory_length
                ),
            ));
        }
        Ok(())
    }
}

impl Default for Standard {
    fn default() -> Self {
        Self::new(RuleSettings::default())
    }
}

impl RulePolicy for Standard {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn board_size(&self) -> usize {
        self.board_size
    }

    fn victory_length(&self) -> usize {
        self.victory_length
    }

    fn evaluate(&mut self, placement: &Placement, runs: &RunGroups) -> Outcome {
        if let Err(rejection) = self.check_legal(placement, runs) {
            return Outcome::Rejected(rejection);
        }
        judge(placement, runs, self.victory_length, self.ties)
    }
}
