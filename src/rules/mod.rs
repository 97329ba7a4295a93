//! Rule policies for connect-N games
//!
//! A policy is consulted once per placement, after the stone is already on
//! the board. It sees the placement and the runs through the new stone and
//! decides what happens next:
//! - the move stands ([`Outcome::Continue`])
//! - the move is taken back ([`Outcome::Rejected`])
//! - the mover wins or the board is full ([`Outcome::Won`], [`Outcome::Tied`])
//! - the game pauses for a color swap ([`Outcome::SwapRequested`])
//!
//! Policies are looked up by name through a static registry.

pub mod freestyle;
pub mod pro;
pub mod standard;
pub mod swap;
pub mod win;

use crate::board::{Pos, RunGroups, Stone};
use crate::player::Players;

// Re-exports for convenient access
pub use freestyle::FreeStyle;
pub use pro::Pro;
pub use standard::Standard;
pub use swap::Swap;

/// Run length needed to win unless configured otherwise
pub const DEFAULT_VICTORY_LENGTH: usize = 5;

/// A stone that has just been placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub pos: Pos,
    pub stone: Stone,
    /// Stones on the board, this one included
    pub move_count: usize,
    /// Number of cells on the board
    pub capacity: usize,
}

impl Placement {
    #[inline]
    pub fn fills_board(&self) -> bool {
        self.move_count >= self.capacity
    }
}

/// Why a placement was refused, worded for the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub title: String,
    pub message: String,
}

impl Rejection {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { title: title.into(), message: message.into() }
    }
}

/// Effect of a swap choice on the color binding
pub type SwapAction = fn(&mut Players);

/// One named choice of a swap offer
#[derive(Debug, Clone)]
pub struct SwapOption {
    pub label: String,
    pub apply: SwapAction,
}

/// Choices put to a player when a policy pauses the game
#[derive(Debug, Clone)]
pub struct SwapOffer {
    pub prompt: String,
    pub options: Vec<SwapOption>,
}

impl SwapOffer {
    pub fn labels(&self) -> Vec<String> {
        self.options.iter().map(|o| o.label.clone()).collect()
    }

    pub fn option(&self, label: &str) -> Option<&SwapOption> {
        self.options.iter().find(|o| o.label == label)
    }
}

/// Decision of a policy about one placement
#[derive(Debug, Clone)]
pub enum Outcome {
    Continue,
    Rejected(Rejection),
    /// Cells of the winning run
    Won(Vec<Pos>),
    Tied,
    SwapRequested(SwapOffer),
}

/// A rule set.
///
/// `evaluate` may only depend on its inputs and the policy's own state;
/// `reset` must bring that state back to how it was at construction.
pub trait RulePolicy: Send {
    /// Registry name
    fn name(&self) -> &'static str;

    /// Board dimension the policy was built for
    fn board_size(&self) -> usize;

    /// Smallest board the policy can be played on
    fn min_board_size(&self) -> usize {
        1
    }

    /// Exact run length that wins
    fn victory_length(&self) -> usize;

    /// Cap handed to the run search. One past the victory length so an
    /// overline never reports as an exact win.
    fn scan_limit(&self) -> usize {
        self.victory_length() + 1
    }

    fn evaluate(&mut self, placement: &Placement, runs: &RunGroups) -> Outcome;

    fn reset(&mut self) {}
}

/// Parameters every policy is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSettings {
    pub board_size: usize,
    pub victory_length: usize,
    /// Report a full board without a winner as a tie
    pub ties: bool,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            board_size: crate::board::DEFAULT_BOARD_SIZE,
            victory_length: DEFAULT_VICTORY_LENGTH,
            ties: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("unknown rule `{0}`")]
    UnknownRule(String),
}

/// Builds a boxed policy
pub type PolicyFactory = fn(RuleSettings) -> Box<dyn RulePolicy>;

/// A registered rule set
#[derive(Clone, Copy)]
pub struct RuleEntry {
    pub name: &'static str,
    pub summary: &'static str,
    /// Smallest board the rule set can be played on
    pub min_board_size: usize,
    pub build: PolicyFactory,
}

impl std::fmt::Debug for RuleEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEntry")
            .field("name", &self.name)
            .field("min_board_size", &self.min_board_size)
            .finish()
    }
}

/// All rule sets, by name
pub const REGISTRY: &[RuleEntry] = &[
    RuleEntry {
        name: FreeStyle::NAME,
        summary: "Exactly five in a row wins",
        min_board_size: 1,
        build: FreeStyle::boxed,
    },
    RuleEntry {
        name: Standard::NAME,
        summary: "Freestyle, and Black may not make an overline",
        min_board_size: 1,
        build: Standard::boxed,
    },
    RuleEntry {
        name: Pro::NAME,
        summary: "First stone on the center, third stone away from it",
        min_board_size: pro::MIN_BOARD_SIZE,
        build: Pro::boxed,
    },
    RuleEntry {
        name: Swap::NAME,
        summary: "White may take Black after the third stone",
        min_board_size: 1,
        build: Swap::boxed,
    },
];

pub fn names() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|e| e.name)
}

pub fn lookup(name: &str) -> Result<&'static RuleEntry, RuleError> {
    REGISTRY
        .iter()
        .find(|e| e.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| RuleError::UnknownRule(name.to_string()))
}

/// Build a policy by registry name
pub fn create(name: &str, settings: RuleSettings) -> Result<Box<dyn RulePolicy>, RuleError> {
    lookup(name).map(|entry| (entry.build)(settings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_names() {
        let all: Vec<_> = names().collect();
        assert_eq!(all, vec!["freestyle", "standard", "pro", "swap"]);
    }

    #[test]
    fn test_create_by_name() {
        for name in names() {
            let policy = create(name, RuleSettings::default()).unwrap();
            assert_eq!(policy.name(), name);
            assert_eq!(policy.victory_length(), DEFAULT_VICTORY_LENGTH);
            assert_eq!(policy.scan_limit(), DEFAULT_VICTORY_LENGTH + 1);
        }
        assert_eq!(create("Swap", RuleSettings::default()).unwrap().name(), "swap");
    }

    #[test]
    fn test_unknown_rule() {
        let err = create("renju", RuleSettings::default()).err();
        assert_eq!(err, Some(RuleError::UnknownRule("renju".to_string())));
        assert_eq!(
            RuleError::UnknownRule("renju".into()).to_string(),
            "unknown rule `renju`"
        );
    }

    #[test]
    fn test_swap_offer_lookup() {
        let offer = swap::offer();
        assert_eq!(offer.labels(), vec![swap::TAKE_BLACK, swap::HOLD_WHITE]);
        assert!(offer.option(swap::HOLD_WHITE).is_some());
        assert!(offer.option("Take Both").is_none());
    }
}
