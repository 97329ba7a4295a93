//! Freestyle Gomoku: the only rule is exact-length victory

use crate::board::RunGroups;

use super::win::judge;
use super::{Outcome, Placement, RulePolicy, RuleSettings};

/// Wins with a run of exactly the victory length; overlines do not count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeStyle {
    board_size: usize,
    victory_length: usize,
    ties: bool,
}

impl FreeStyle {
    pub const NAME: &'static str = "freestyle";

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
}

impl Default for FreeStyle {
    fn default() -> Self {
        Self::new(RuleSettings::default())
    }
}

impl RulePolicy for FreeStyle {
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
        judge(placement, runs, self.victory_length, self.ties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Direction, Pos, Stone};

    fn placement(move_count: usize) -> Placement {
        Placement { pos: Pos::new(7, 7), stone: Stone::Black, move_count, capacity: 225 }
    }

    fn horizontal(len: u8) -> RunGroups {
        (0..len).map(|c| (Direction::Horizontal, Pos::new(7, 3 + c))).collect()
    }

    #[test]
    fn test_exactly_five_wins() {
        let mut rule = FreeStyle::default();
        match rule.evaluate(&placement(9), &horizontal(5)) {
            Outcome::Won(cells) => {
                let expected: Vec<Pos> = (3..8).map(|c| Pos::new(7, c)).collect();
                assert_eq!(cells, expected);
            }
            other => panic!("expected a win, got {:?}", other),
        }
    }

    #[test]
    fn test_overline_does_not_win() {
        let mut rule = FreeStyle::default();
        assert!(matches!(rule.evaluate(&placement(11), &horizontal(6)), Outcome::Continue));
    }

    #[test]
    fn test_short_runs_continue() {
        let mut rule = FreeStyle::default();
        assert!(matches!(rule.evaluate(&placement(1), &RunGroups::new()), Outcome::Continue));
        assert!(matches!(rule.evaluate(&placement(7), &horizontal(4)), Outcome::Continue));
    }

    #[test]
    fn test_custom_length() {
        let mut rule = FreeStyle::new(RuleSettings { victory_length: 4, ..RuleSettings::default() });
        assert!(matches!(rule.evaluate(&placement(7), &horizontal(4)), Outcome::Won(_)));
        assert!(matches!(rule.evaluate(&placement(9), &horizontal(5)), Outcome::Continue));
    }

    #[test]
    fn test_full_board_ties() {
        let mut rule = FreeStyle::default();
        assert!(matches!(rule.evaluate(&placement(225), &horizontal(3)), Outcome::Tied));

        let mut no_ties = FreeStyle::new(RuleSettings { ties: false, ..RuleSettings::default() });
        assert!(matches!(no_ties.evaluate(&placement(225), &horizontal(3)), Outcome::Continue));
    }
}
