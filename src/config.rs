//! Command-line configuration

use clap::Parser;

use crate::board::{DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE};
use crate::rules::{self, DEFAULT_VICTORY_LENGTH};

/// Shortest run length a game can be played to
pub const MIN_VICTORY_LENGTH: usize = 3;

/// Gomoku - connect-N on a square board with selectable rules
#[derive(Parser, Debug, Clone)]
#[command(name = "gomoku")]
#[command(about = "Two-player connect-N board game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Board dimension (odd)
    #[arg(short, long, default_value_t = DEFAULT_BOARD_SIZE)]
    pub size: usize,

    /// Rule set: freestyle, standard, pro or swap
    #[arg(short, long, default_value = "freestyle")]
    pub rule: String,

    /// Run length needed to win
    #[arg(short, long, default_value_t = DEFAULT_VICTORY_LENGTH)]
    pub connect: usize,

    /// Name of the player starting with Black
    #[arg(long, default_value = "Doge")]
    pub black: String,

    /// Name of the player starting with White
    #[arg(long, default_value = "Meow")]
    pub white: String,

    /// Do not end the game as a tie when the board fills up
    #[arg(long)]
    pub no_ties: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("board size {0} must be odd and between 1 and {max}", max = MAX_BOARD_SIZE)]
    BoardSize(usize),

    #[error("victory length {length} must be at least {min} and fit a {size}x{size} board", min = MIN_VICTORY_LENGTH)]
    VictoryLength { length: usize, size: usize },

    #[error(transparent)]
    Rule(#[from] rules::RuleError),

    #[error("rule `{rule}` needs a board of at least {min}x{min}")]
    BoardTooSmall { rule: &'static str, min: usize },
}

/// Validated settings for one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub board_size: usize,
    pub rule: String,
    pub victory_length: usize,
    pub ties: bool,
    pub black: String,
    pub white: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            rule: rules::FreeStyle::NAME.to_string(),
            victory_length: DEFAULT_VICTORY_LENGTH,
            ties: true,
            black: "Doge".to_string(),
            white: "Meow".to_string(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.board_size;
        if size == 0 || size > MAX_BOARD_SIZE || size % 2 == 0 {
            return Err(ConfigError::BoardSize(size));
        }
        if self.victory_length < MIN_VICTORY_LENGTH || self.victory_length > size {
            return Err(ConfigError::VictoryLength { length: self.victory_length, size });
        }
        let entry = rules::lookup(&self.rule)?;
        if size < entry.min_board_size {
            return Err(ConfigError::BoardTooSmall { rule: entry.name, min: entry.min_board_size });
        }
        Ok(())
    }
}

impl Cli {
    pub fn into_config(self) -> Result<GameConfig, ConfigError> {
        let config = GameConfig {
            board_size: self.size,
            rule: self.rule.to_ascii_lowercase(),
            victory_length: self.connect,
            ties: !self.no_ties,
            black: self.black,
            white: self.white,
        };
        config.validate()?;
        Ok(config)
    }
}
