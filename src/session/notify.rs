//! Notifications from a game session to whoever presents it

use std::sync::mpsc::Sender;

use crate::board::{Pos, Stone};
use crate::player::{Player, Players};
use crate::rules::{Rejection, SwapOffer};

/// Receiver of session events. Calls are fire-and-forget.
pub trait Presenter {
    fn piece_placed(&mut self, pos: Pos, stone: Stone);

    fn placement_rejected(&mut self, pos: Pos, rejection: &Rejection);

    fn game_won(&mut self, winner: &Player, cells: &[Pos]);

    fn game_tied(&mut self);

    fn swap_offered(&mut self, offer: &SwapOffer);

    fn turn_changed(&mut self, turn: Stone, player: &Player);

    /// A request hit an occupied or off-board cell and was ignored
    fn already_set(&mut self, _pos: Pos) {}

    /// Color binding after a swap choice
    fn seats_changed(&mut self, _players: &Players) {}

    fn restarted(&mut self) {}
}

/// Owned form of every presenter call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    PiecePlaced { pos: Pos, stone: Stone },
    PlacementRejected { pos: Pos, rejection: Rejection },
    GameWon { winner: Player, cells: Vec<Pos> },
    GameTied,
    SwapOffered { prompt: String, labels: Vec<String> },
    TurnChanged { turn: Stone, player: Player },
    AlreadySet(Pos),
    SeatsChanged(Players),
    Restarted,
}

/// Turns presenter calls into [`Notice`]s
pub trait NoticeSink {
    fn push(&mut self, notice: Notice);
}

impl NoticeSink for Vec<Notice> {
    fn push(&mut self, notice: Notice) {
        Vec::push(self, notice);
    }
}

impl NoticeSink for Sender<Notice> {
    fn push(&mut self, notice: Notice) {
        // The presentation side hung up; nothing left to tell.
        let _ = self.send(notice);
    }
}

impl<S: NoticeSink> Presenter for S {
    fn piece_placed(&mut self, pos: Pos, stone: Stone) {
        self.push(Notice::PiecePlaced { pos, stone });
    }

    fn placement_rejected(&mut self, pos: Pos, rejection: &Rejection) {
        self.push(Notice::PlacementRejected { pos, rejection: rejection.clone() });
    }

    fn game_won(&mut self, winner: &Player, cells: &[Pos]) {
        self.push(Notice::GameWon { winner: winner.clone(), cells: cells.to_vec() });
    }

    fn game_tied(&mut self) {
        self.push(Notice::GameTied);
    }

    fn swap_offered(&mut self, offer: &SwapOffer) {
        self.push(Notice::SwapOffered { prompt: offer.prompt.clone(), labels: offer.labels() });
    }

    fn turn_changed(&mut self, turn: Stone, player: &Player) {
        self.push(Notice::TurnChanged { turn, player: player.clone() });
    }

    fn already_set(&mut self, pos: Pos) {
        self.push(Notice::AlreadySet(pos));
    }

    fn seats_changed(&mut self, players: &Players) {
        self.push(Notice::SeatsChanged(players.clone()));
    }

    fn restarted(&mut self) {
        self.push(Notice::Restarted);
    }
}
