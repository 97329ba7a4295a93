//! Swap opening rule
//!
//! Once the third stone is down, White may take over Black. The offer is
//! made once per game; victory is judged like freestyle.

use crate::board::RunGroups;
use crate::player::Players;

use super::win::judge;
use super::{Outcome, Placement, RulePolicy, RuleSettings, SwapOffer, SwapOption};

/// Stone count at which the swap is offered
pub const SWAP_MOVE: usize = 3;

pub const PROMPT: &str = "White player, choose your color";
pub const TAKE_BLACK: &str = "Take Black";
pub const HOLD_WHITE: &str = "Hold White";

fn take_black(players: &mut Players) {
    players.exchange_colors();
}

fn hold_white(_players: &mut Players) {}

/// The two-way offer made after the third stone
pub fn offer() -> SwapOffer {
    SwapOffer {
        prompt: PROMPT.to_string(),
        options: vec![
            SwapOption { label: TAKE_BLACK.to_string(), apply: take_black },
            SwapOption { label: HOLD_WHITE.to_string(), apply: hold_white },
        ],
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swap {
    board_size: usize,
    victory_length: usize,
    ties: bool,
    /// Set once the offer has been made this game
    offered: bool,
}

impl Swap {
    pub const NAME: &'static str = "swap";

    pub fn new(settings: RuleSettings) -> Self {
        Self {
            board_size: settings.board_size,
            victory_length: settings.victory_length,
            ties: settings.ties,
            offered: false,
        }
    }

    pub fn boxed(settings: RuleSettings) -> Box<dyn RulePolicy> {
        Box::new(Self::new(settings))
    }

    pub fn offered(&self) -> bool {
        self.offered
    }
}

impl Default for Swap {
    fn default() -> Self {
        Self::new(RuleSettings::default())
    }
}

impl RulePolicy for Swap {
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
        if placement.move_count == SWAP_MOVE && !self.offered {
            self.offered = true;
            return Outcome::SwapRequested(offer());
        }
        judge(placement, runs, self.victory_length, self.ties)
    }

    fn reset(&mut self) {
        self.offered = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Pos, Stone};

    fn at(move_count: usize) -> Placement {
        Placement { pos: Pos::new(2, 2), stone: Stone::Black, move_count, capacity: 225 }
    }

    #[test]
    fn test_offer_once_on_third_stone() {
        let mut swap = Swap::default();
        assert!(matches!(swap.evaluate(&at(1), &RunGroups::new()), Outcome::Continue));
        assert!(matches!(swap.evaluate(&at(2), &RunGroups::new()), Outcome::Continue));
        assert!(matches!(swap.evaluate(&at(3), &RunGroups::new()), Outcome::SwapRequested(_)));
        assert!(swap.offered());
        // A later third stone (after a take-back) does not ask again
        assert!(matches!(swap.evaluate(&at(3), &RunGroups::new()), Outcome::Continue));
    }

    #[test]
    fn test_reset_rearms_offer() {
        let mut swap = Swap::default();
        assert!(matches!(swap.evaluate(&at(3), &RunGroups::new()), Outcome::SwapRequested(_)));
        swap.reset();
        assert!(!swap.offered());
        assert!(matches!(swap.evaluate(&at(3), &RunGroups::new()), Outcome::SwapRequested(_)));
    }

    #[test]
    fn test_options_rebind_players() {
        let offer = offer();
        assert_eq!(offer.prompt, PROMPT);

        let mut players = Players::new("Doge", "Meow");
        (offer.option(HOLD_WHITE).unwrap().apply)(&mut players);
        assert_eq!(players.seated(Stone::Black).name(), "Doge");

        (offer.option(TAKE_BLACK).unwrap().apply)(&mut players);
        assert_eq!(players.seated(Stone::Black).name(), "Meow");
        assert_eq!(players.seated(Stone::White).name(), "Doge");
    }
}
