//! Presentation-side mirror of the game, fed by session notices

use std::sync::mpsc::Sender;

use tracing::trace;

use crate::board::{Pos, Stone};
use crate::player::{Player, Players};
use crate::rules::Rejection;
use crate::session::{Notice, NoticeSink};

/// Forwards notices to the GUI thread and wakes it up
pub struct RepaintingSink {
    pub tx: Sender<Notice>,
    pub ctx: egui::Context,
}

impl NoticeSink for RepaintingSink {
    fn push(&mut self, notice: Notice) {
        if self.tx.send(notice).is_err() {
            // The window is gone; nothing left to repaint.
            trace!("notice dropped, GUI receiver closed");
            return;
        }
        self.ctx.request_repaint();
    }
}

/// Game result as shown to the players
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameResult {
    Won { winner: Player, cells: Vec<Pos> },
    Tied,
}

/// Swap choice waiting for a click
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSwap {
    pub prompt: String,
    pub labels: Vec<String>,
}

/// What the window knows about the game.
///
/// Stones only appear here once the game loop reports them.
#[derive(Debug, Clone)]
pub struct GameView {
    size: usize,
    stones: Vec<Stone>,
    pub turn: Stone,
    pub to_move: Option<Player>,
    pub players: Option<Players>,
    pub last_move: Option<Pos>,
    pub move_count: usize,
    pub result: Option<GameResult>,
    pub swap: Option<PendingSwap>,
    pub message: Option<Rejection>,
}

impl GameView {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            stones: vec![Stone::Empty; size * size],
            turn: Stone::Black,
            to_move: None,
            players: None,
            last_move: None,
            move_count: 0,
            result: None,
            swap: None,
            message: None,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn stone(&self, pos: Pos) -> Stone {
        let (row, col) = (pos.row as usize, pos.col as usize);
        if row < self.size && col < self.size {
            self.stones[row * self.size + col]
        } else {
            Stone::Empty
        }
    }

    pub fn winning_cells(&self) -> &[Pos] {
        match &self.result {
            Some(GameResult::Won { cells, .. }) => cells,
            _ => &[],
        }
    }

    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Clicks on the board are only forwarded while this holds
    pub fn accepts_moves(&self) -> bool {
        self.result.is_none() && self.swap.is_none()
    }

    pub fn apply(&mut self, notice: Notice) {
        match notice {
            Notice::PiecePlaced { pos, stone } => {
                let (row, col) = (pos.row as usize, pos.col as usize);
                if row < self.size && col < self.size {
                    self.stones[row * self.size + col] = stone;
                }
                self.last_move = Some(pos);
                self.move_count += 1;
                self.message = None;
            }
            Notice::PlacementRejected { rejection, .. } => self.message = Some(rejection),
            Notice::GameWon { winner, cells } => self.result = Some(GameResult::Won { winner, cells }),
            Notice::GameTied => self.result = Some(GameResult::Tied),
            Notice::SwapOffered { prompt, labels } => self.swap = Some(PendingSwap { prompt, labels }),
            Notice::TurnChanged { turn, player } => {
                self.turn = turn;
                self.to_move = Some(player);
            }
            Notice::AlreadySet(_) => {}
            Notice::SeatsChanged(players) => {
                self.players = Some(players);
                self.swap = None;
            }
            Notice::Restarted => {
                self.stones.fill(Stone::Empty);
                self.last_move = None;
                self.move_count = 0;
                self.result = None;
                self.swap = None;
                self.message = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pieces_follow_notices() {
        let mut view = GameView::new(15);
        view.apply(Notice::PiecePlaced { pos: Pos::new(7, 7), stone: Stone::Black });
        assert_eq!(view.stone(Pos::new(7, 7)), Stone::Black);
        assert_eq!(view.last_move, Some(Pos::new(7, 7)));
        assert_eq!(view.move_count, 1);
        assert_eq!(view.stone(Pos::new(99, 0)), Stone::Empty);
    }

    #[test]
    fn test_rejection_message_clears_on_next_piece() {
        let mut view = GameView::new(15);
        view.apply(Notice::PlacementRejected {
            pos: Pos::new(0, 0),
            rejection: Rejection::new("Overline", "no"),
        });
        assert!(view.message.is_some());
        view.apply(Notice::PiecePlaced { pos: Pos::new(1, 1), stone: Stone::Black });
        assert!(view.message.is_none());
    }

    #[test]
    fn test_swap_blocks_moves_until_seats_change() {
        let mut view = GameView::new(15);
        view.apply(Notice::SwapOffered { prompt: "pick".into(), labels: vec!["a".into(), "b".into()] });
        assert!(!view.accepts_moves());
        view.apply(Notice::SeatsChanged(Players::new("x", "y")));
        assert!(view.accepts_moves());
    }

    #[test]
    fn test_sink_outlives_the_window() {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut sink = RepaintingSink { tx, ctx: egui::Context::default() };
        sink.push(Notice::GameTied);
        assert_eq!(rx.try_recv(), Ok(Notice::GameTied));

        drop(rx);
        sink.push(Notice::Restarted);
    }

    #[test]
    fn test_restart_clears_result() {
        let mut view = GameView::new(15);
        let players = Players::new("Doge", "Meow");
        view.apply(Notice::PiecePlaced { pos: Pos::new(2, 2), stone: Stone::Black });
        view.apply(Notice::GameWon {
            winner: players.seated(Stone::Black).clone(),
            cells: vec![Pos::new(2, 2)],
        });
        assert!(view.is_over());
        assert_eq!(view.winning_cells(), &[Pos::new(2, 2)]);

        view.apply(Notice::Restarted);
        assert!(!view.is_over());
        assert!(view.winning_cells().is_empty());
        assert_eq!(view.stone(Pos::new(2, 2)), Stone::Empty);
        assert_eq!(view.move_count, 0);
    }
}
