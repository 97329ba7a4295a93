//! Pro opening rule
//!
//! Black's first stone goes on the center point and Black's second stone
//! (the third stone of the game) must keep clear of the central area. After
//! the opening the game is judged like freestyle.

use crate::board::{Pos, RunGroups};

use super::win::judge;
use super::{Outcome, Placement, Rejection, RulePolicy, RuleSettings};

/// Minimum Chebyshev distance of the third stone from the center
pub const OPENING_DISTANCE: u8 = 3;

/// Smallest board with room for the third stone outside the central area
pub const MIN_BOARD_SIZE: usize = 2 * OPENING_DISTANCE as usize + 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pro {
    center: Pos,
    board_size: usize,
    victory_length: usize,
    ties: bool,
}

impl Pro {
    pub const NAME: &'static str = "pro";

    pub fn new(settings: RuleSettings) -> Self {
        // Oversized boards never reach a session; saturate instead of wrapping
        let mid = u8::try_from(settings.board_size / 2).unwrap_or(u8::MAX);
        Self {
            center: Pos::new(mid, mid),
            board_size: settings.board_size,
            victory_length: settings.victory_length,
            ties: settings.ties,
        }
    }

    pub fn boxed(settings: RuleSettings) -> Box<dyn RulePolicy> {
        Box::new(Self::new(settings))
    }

    pub fn center(&self) -> Pos {
        self.center
    }

    fn check_opening(&self, placement: &Placement) -> Result<(), Rejection> {
        match placement.move_count {
            1 if placement.pos != self.center => Err(Rejection::new(
                "Pro opening",
                "The first stone must be placed on the center point.",
            )),
            3 if placement.pos.distance(self.center) < OPENING_DISTANCE => Err(Rejection::new(
                "Pro opening",
                format!(
                    "Black's second stone must be at least {} lines away from the center.",
                    OPENING_DISTANCE
                ),
            )),
            _ => Ok(()),
        }
    }
}

impl RulePolicy for Pro {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn board_size(&self) -> usize {
        self.board_size
    }

    fn min_board_size(&self) -> usize {
        MIN_BOARD_SIZE
    }

    fn victory_length(&self) -> usize {
        self.victory_length
    }

    fn evaluate(&mut self, placement: &Placement, runs: &RunGroups) -> Outcome {
        if let Err(rejection) = self.check_opening(placement) {
            return Outcome::Rejected(rejection);
        }
        judge(placement, runs, self.victory_length, self.ties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Stone;

    fn rule() -> Pro {
        Pro::new(RuleSettings { board_size: 15, ..RuleSettings::default() })
    }

    fn at(row: u8, col: u8, move_count: usize) -> Placement {
        let stone = if move_count % 2 == 1 { Stone::Black } else { Stone::White };
        Placement { pos: Pos::new(row, col), stone, move_count, capacity: 225 }
    }

    #[test]
    fn test_center_from_size() {
        assert_eq!(rule().center(), Pos::new(7, 7));
        let small = Pro::new(RuleSettings { board_size: 9, ..RuleSettings::default() });
        assert_eq!(small.center(), Pos::new(4, 4));
        assert_eq!(small.board_size(), 9);
        assert_eq!(small.min_board_size(), MIN_BOARD_SIZE);
    }

    #[test]
    fn test_center_does_not_wrap_on_huge_boards() {
        let huge = Pro::new(RuleSettings { board_size: 600, ..RuleSettings::default() });
        assert_eq!(huge.center(), Pos::new(u8::MAX, u8::MAX));
    }

    #[test]
    fn test_first_stone_on_center() {
        let mut pro = rule();
        assert!(matches!(pro.evaluate(&at(0, 0, 1), &RunGroups::new()), Outcome::Rejected(_)));
        assert!(matches!(pro.evaluate(&at(7, 7, 1), &RunGroups::new()), Outcome::Continue));
    }

    #[test]
    fn test_white_reply_unrestricted() {
        let mut pro = rule();
        assert!(matches!(pro.evaluate(&at(7, 8, 2), &RunGroups::new()), Outcome::Continue));
    }

    #[test]
    fn test_third_stone_distance() {
        let mut pro = rule();
        assert!(matches!(pro.evaluate(&at(9, 9, 3), &RunGroups::new()), Outcome::Rejected(_)));
        assert!(matches!(pro.evaluate(&at(5, 7, 3), &RunGroups::new()), Outcome::Rejected(_)));
        assert!(matches!(pro.evaluate(&at(10, 7, 3), &RunGroups::new()), Outcome::Continue));
        assert!(matches!(pro.evaluate(&at(4, 12, 3), &RunGroups::new()), Outcome::Continue));
    }

    #[test]
    fn test_later_moves_unrestricted() {
        let mut pro = rule();
        assert!(matches!(pro.evaluate(&at(7, 6, 5), &RunGroups::new()), Outcome::Continue));
    }
}
