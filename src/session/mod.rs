//! Turn-driving game session
//!
//! A [`GameSession`] owns the board, the active rule policy and the players.
//! Each request goes through the same cycle:
//!
//! ```text
//! AwaitingMove --place--> Evaluating --Continue-------> AwaitingMove (turn passes)
//!                                    --Rejected-------> AwaitingMove (stone taken back)
//!                                    --Won / Tied-----> Ended
//!                                    --SwapRequested--> Paused --choice--> AwaitingMove
//! ```
//!
//! `restart` is accepted in every state.

pub mod notify;
pub mod runner;

use tracing::{debug, info, instrument};

use crate::board::{Board, BoardError, Pos, Stone};
use crate::config::GameConfig;
use crate::player::{Player, Players};
use crate::rules::{self, Outcome, Placement, Rejection, RuleError, RulePolicy, RuleSettings, SwapOffer};

pub use notify::{Notice, NoticeSink, Presenter};
pub use runner::{spawn, Command, Controller};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("the game has already ended")]
    GameOver,

    #[error("a swap choice is pending")]
    SwapPending,

    #[error("no swap choice is pending")]
    NotPaused,

    #[error("unknown swap option `{0}`")]
    UnknownOption(String),

    #[error("invalid game settings: {0}")]
    InvalidSettings(String),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error("failed to start the game loop")]
    Spawn(#[from] std::io::Error),
}

/// How a finished game ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Won { winner: Stone, cells: Vec<Pos> },
    Tied,
}

/// Session state
#[derive(Debug, Clone)]
pub enum Phase {
    AwaitingMove,
    /// The policy is judging a placement
    Evaluating,
    /// Waiting for one of the offered choices
    Paused(SwapOffer),
    Ended(Verdict),
}

/// What a single placement request led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// Occupied or off-board cell; nothing changed
    Ignored,
    Placed,
    Rejected(Rejection),
    Won { winner: Stone, cells: Vec<Pos> },
    Tied,
    /// Placed, and the game waits for a swap choice
    Paused,
}

pub struct GameSession<P: Presenter> {
    board: Board,
    policy: Box<dyn RulePolicy>,
    players: Players,
    turn: Stone,
    phase: Phase,
    presenter: P,
}

impl<P: Presenter> GameSession<P> {
    pub fn new(
        size: usize,
        policy: Box<dyn RulePolicy>,
        players: Players,
        presenter: P,
    ) -> Result<Self, SessionError> {
        let board = Board::new(size)?;
        if size % 2 == 0 {
            return Err(SessionError::InvalidSettings(format!(
                "board size must be odd, got {}",
                size
            )));
        }
        if policy.board_size() != size {
            return Err(SessionError::InvalidSettings(format!(
                "rule `{}` was built for a {}x{} board, not {}x{}",
                policy.name(),
                policy.board_size(),
                policy.board_size(),
                size,
                size
            )));
        }
        if size < policy.min_board_size() {
            return Err(SessionError::InvalidSettings(format!(
                "rule `{}` needs a board of at least {}x{}",
                policy.name(),
                policy.min_board_size(),
                policy.min_board_size()
            )));
        }
        let length = policy.victory_length();
        if length < 2 || length > size {
            return Err(SessionError::InvalidSettings(format!(
                "victory length {} does not fit a {}x{} board",
                length, size, size
            )));
        }

        info!(size, rule = policy.name(), victory_length = length, "new session");
        Ok(Self {
            board,
            policy,
            players,
            turn: Stone::Black,
            phase: Phase::AwaitingMove,
            presenter,
        })
    }

    /// Build the policy named in `config` from the rule registry
    pub fn from_config(config: &GameConfig, presenter: P) -> Result<Self, SessionError> {
        let policy = rules::create(&config.rule, RuleSettings {
            board_size: config.board_size,
            victory_length: config.victory_length,
            ties: config.ties,
        })?;
        let players = Players::new(config.black.as_str(), config.white.as_str());
        Self::new(config.board_size, policy, players, presenter)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell(&self, pos: Pos) -> Result<Stone, BoardError> {
        self.board.get(pos)
    }

    pub fn move_count(&self) -> usize {
        self.board.move_count()
    }

    pub fn players(&self) -> &Players {
        &self.players
    }

    /// Color to move
    pub fn turn(&self) -> Stone {
        self.turn
    }

    pub fn current_player(&self) -> &Player {
        self.players.seated(self.turn)
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn rule_name(&self) -> &'static str {
        self.policy.name()
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.phase, Phase::Ended(_))
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.phase, Phase::Paused(_))
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        match &self.phase {
            Phase::Ended(verdict) => Some(verdict),
            _ => None,
        }
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Tell the presenter who sits where and whose turn it is
    pub fn announce(&mut self) {
        self.presenter.seats_changed(&self.players);
        self.presenter.turn_changed(self.turn, self.players.seated(self.turn));
    }

    /// Play a stone for the side to move.
    ///
    /// Occupied and off-board cells are absorbed as [`Progress::Ignored`].
    /// Playing after the game ended or while a swap choice is pending is a
    /// caller error.
    #[instrument(skip(self), fields(rule = self.policy.name(), turn = %self.turn))]
    pub fn submit(&mut self, pos: Pos) -> Result<Progress, SessionError> {
        match self.phase {
            Phase::Ended(_) => return Err(SessionError::GameOver),
            Phase::Paused(_) => return Err(SessionError::SwapPending),
            Phase::AwaitingMove | Phase::Evaluating => {}
        }

        let stone = self.turn;
        if let Err(err) = self.board.place(pos, stone) {
            debug!(%err, "placement ignored");
            self.presenter.already_set(pos);
            return Ok(Progress::Ignored);
        }

        self.phase = Phase::Evaluating;
        let runs = self.board.find_runs(pos, self.policy.scan_limit());
        debug!(longest = runs.longest(), "runs through placement");
        let placement = Placement {
            pos,
            stone,
            move_count: self.board.move_count(),
            capacity: self.board.capacity(),
        };
        let outcome = self.policy.evaluate(&placement, &runs);
        self.apply(placement, outcome)
    }

    fn apply(&mut self, placement: Placement, outcome: Outcome) -> Result<Progress, SessionError> {
        let Placement { pos, stone, .. } = placement;
        let progress = match outcome {
            Outcome::Continue => {
                self.presenter.piece_placed(pos, stone);
                self.pass_turn();
                self.phase = Phase::AwaitingMove;
                Progress::Placed
            }
            Outcome::Rejected(rejection) => {
                self.board.clear(pos)?;
                debug!(title = %rejection.title, "placement rejected");
                self.presenter.placement_rejected(pos, &rejection);
                self.phase = Phase::AwaitingMove;
                Progress::Rejected(rejection)
            }
            Outcome::Won(cells) => {
                self.presenter.piece_placed(pos, stone);
                let winner = self.players.seated(stone);
                info!(winner = %winner, stone = %stone, moves = self.board.move_count(), "game won");
                self.presenter.game_won(winner, &cells);
                self.phase = Phase::Ended(Verdict::Won { winner: stone, cells: cells.clone() });
                Progress::Won { winner: stone, cells }
            }
            Outcome::Tied => {
                self.presenter.piece_placed(pos, stone);
                info!(moves = self.board.move_count(), "game tied");
                self.presenter.game_tied();
                self.phase = Phase::Ended(Verdict::Tied);
                Progress::Tied
            }
            Outcome::SwapRequested(offer) => {
                self.presenter.piece_placed(pos, stone);
                self.pass_turn();
                info!(prompt = %offer.prompt, "swap offered");
                self.presenter.swap_offered(&offer);
                self.phase = Phase::Paused(offer);
                Progress::Paused
            }
        };
        Ok(progress)
    }

    fn pass_turn(&mut self) {
        self.turn = self.turn.opponent();
        self.presenter.turn_changed(self.turn, self.players.seated(self.turn));
    }

    /// Resolve a pending swap offer with the option named `label`
    #[instrument(skip(self))]
    pub fn select_swap_option(&mut self, label: &str) -> Result<(), SessionError> {
        let offer = match &self.phase {
            Phase::Paused(offer) => offer,
            _ => return Err(SessionError::NotPaused),
        };
        let apply = offer
            .option(label)
            .map(|option| option.apply)
            .ok_or_else(|| SessionError::UnknownOption(label.to_string()))?;

        apply(&mut self.players);
        self.phase = Phase::AwaitingMove;
        info!(black = %self.players.seated(Stone::Black), white = %self.players.seated(Stone::White), "swap resolved");
        self.presenter.seats_changed(&self.players);
        self.presenter.turn_changed(self.turn, self.players.seated(self.turn));
        Ok(())
    }

    /// Start over with an empty board; Black moves first
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        self.board.reset();
        self.policy.reset();
        self.turn = Stone::Black;
        self.phase = Phase::AwaitingMove;
        info!(rule = self.policy.name(), "session restarted");
        self.presenter.restarted();
        self.presenter.turn_changed(self.turn, self.players.seated(self.turn));
    }
}

impl<P: Presenter + std::fmt::Debug> std::fmt::Debug for GameSession<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("rule", &self.policy.name())
            .field("turn", &self.turn)
            .field("phase", &self.phase)
            .field("move_count", &self.board.move_count())
            .field("players", &self.players)
            .field("presenter", &self.presenter)
            .finish()
    }
}
