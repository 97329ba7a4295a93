//! Connect-N board game with pluggable Gomoku rules
//!
//! Two players alternately place stones on an N×N board. A rule policy
//! decides after every stone whether it stands, is taken back, wins, or
//! pauses the game for a color swap.
//!
//! # Architecture
//!
//! - [`board`]: grid, move counter and the run search around a new stone
//! - [`rules`]: the [`RulePolicy`] trait, built-in policies and their registry
//! - [`player`]: player names and their color binding
//! - [`session`]: the turn-driving state machine and its game-loop thread
//! - [`channel`]: single-slot hand-off from input events to the game loop
//! - [`config`]: command-line settings
//! - [`ui`]: egui front end
//!
//! # Quick Start
//!
//! ```
//! use gomoku::rules::{FreeStyle, RuleSettings};
//! use gomoku::session::{GameSession, Notice, Progress};
//! use gomoku::{Players, Pos, Stone};
//!
//! let policy = FreeStyle::boxed(RuleSettings::default());
//! let players = Players::new("Doge", "Meow");
//! let mut session = GameSession::new(15, policy, players, Vec::<Notice>::new()).unwrap();
//!
//! assert_eq!(session.submit(Pos::new(7, 7)).unwrap(), Progress::Placed);
//! assert_eq!(session.cell(Pos::new(7, 7)).unwrap(), Stone::Black);
//! assert_eq!(session.turn(), Stone::White);
//! ```

pub mod board;
pub mod channel;
pub mod config;
pub mod player;
pub mod rules;
pub mod session;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Direction, Pos, RunGroups, Stone};
pub use channel::TurnChannel;
pub use config::{Cli, GameConfig};
pub use player::{Player, Players};
pub use rules::{Outcome, RulePolicy};
pub use session::{Controller, GameSession, Phase, Progress, SessionError};
