//! Game loop thread
//!
//! The session lives on its own thread and is driven through two inputs:
//!
//! - placements go through a [`TurnChannel`], where the newest click wins if
//!   the loop has not picked up the last one yet;
//! - commands (swap choice, restart, shutdown) go through an `mpsc` queue and
//!   are never dropped or overwritten.
//!
//! Pending commands are handled before the next placement. While a swap
//! choice is pending or the game is over the loop only waits for commands.

use std::io;
use std::ops::ControlFlow;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use tracing::{debug, info, trace, warn};

use crate::board::Pos;
use crate::channel::TurnChannel;

use super::{GameSession, Presenter};

/// Non-move input accepted by the game loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SelectSwap(String),
    Restart,
    Shutdown,
}

/// Cloneable handle the presentation layer uses to drive a running session
#[derive(Debug, Clone)]
pub struct Controller {
    moves: TurnChannel<Pos>,
    commands: Sender<Command>,
}

impl Controller {
    fn command(&self, command: Command) {
        if self.commands.send(command).is_err() {
            trace!("game loop already stopped");
            return;
        }
        self.moves.wake();
    }

    pub fn place(&self, pos: Pos) {
        if let Some(stale) = self.moves.deposit(pos) {
            trace!(%stale, "placement superseded before the game loop saw it");
        }
    }

    pub fn select_swap_option(&self, label: impl Into<String>) {
        self.command(Command::SelectSwap(label.into()));
    }

    pub fn restart(&self) {
        self.command(Command::Restart);
    }

    /// Stop the game loop once it has handled any pending request
    pub fn shutdown(&self) {
        self.command(Command::Shutdown);
        self.moves.close();
    }

    pub fn is_shut_down(&self) -> bool {
        self.moves.is_closed()
    }
}

fn wire() -> (Controller, TurnChannel<Pos>, Receiver<Command>) {
    let moves = TurnChannel::new();
    let (commands, inbox) = mpsc::channel();
    let controller = Controller { moves: moves.clone(), commands };
    (controller, moves, inbox)
}

/// Run `session` on a "gaming" thread.
///
/// The thread hands the session back when the controller shuts it down.
pub fn spawn<P>(session: GameSession<P>) -> io::Result<(Controller, JoinHandle<GameSession<P>>)>
where
    P: Presenter + Send + 'static,
{
    let (controller, moves, commands) = wire();
    let handle = thread::Builder::new()
        .name("gaming".to_string())
        .spawn(move || run(session, moves, commands))?;
    Ok((controller, handle))
}

fn run<P: Presenter>(
    mut session: GameSession<P>,
    moves: TurnChannel<Pos>,
    commands: Receiver<Command>,
) -> GameSession<P> {
    info!(rule = session.rule_name(), size = session.board().size(), "game loop started");
    session.announce();

    while next(&mut session, &moves, &commands).is_continue() {}

    // A click deposited just before shutdown is still played
    if accepts_moves(&session) {
        if let Some(pos) = moves.try_take() {
            place(&mut session, &moves, pos);
        }
    }

    info!(moves = session.move_count(), "game loop stopped");
    session
}

/// One step of the loop: drain commands, then wait for whichever input the
/// session can use.
fn next<P: Presenter>(
    session: &mut GameSession<P>,
    moves: &TurnChannel<Pos>,
    commands: &Receiver<Command>,
) -> ControlFlow<()> {
    loop {
        match commands.try_recv() {
            Ok(command) => {
                if handle(session, command).is_break() {
                    return ControlFlow::Break(());
                }
            }
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => return ControlFlow::Break(()),
        }
    }

    if !accepts_moves(session) {
        return match commands.recv() {
            Ok(command) => handle(session, command),
            Err(_) => ControlFlow::Break(()),
        };
    }

    match moves.take_or_wake() {
        Ok(Some(pos)) => {
            place(session, moves, pos);
            ControlFlow::Continue(())
        }
        // A command arrived; it is picked up on the next step
        Ok(None) => ControlFlow::Continue(()),
        Err(_) => ControlFlow::Break(()),
    }
}

fn accepts_moves<P: Presenter>(session: &GameSession<P>) -> bool {
    !session.is_paused() && !session.is_ended()
}

fn place<P: Presenter>(session: &mut GameSession<P>, moves: &TurnChannel<Pos>, pos: Pos) {
    if let Err(err) = session.submit(pos) {
        warn!(%pos, %err, "placement refused");
        return;
    }
    // Clicks made before the game paused or ended are stale
    if !accepts_moves(session) {
        if let Some(stale) = moves.try_take() {
            debug!(%stale, "placement dropped, game no longer takes moves");
        }
    }
}

fn handle<P: Presenter>(session: &mut GameSession<P>, command: Command) -> ControlFlow<()> {
    match command {
        Command::Restart => session.restart(),
        Command::SelectSwap(label) => {
            if let Err(err) = session.select_swap_option(&label) {
                warn!(%label, %err, "swap choice refused");
            }
        }
        Command::Shutdown => return ControlFlow::Break(()),
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Stone;
    use crate::player::Players;
    use crate::rules::{swap, FreeStyle, RuleSettings, Swap};
    use crate::session::Notice;
    use std::time::Duration;

    fn wait_for(rx: &Receiver<Notice>, wanted: impl Fn(&Notice) -> bool) -> Notice {
        loop {
            let notice = rx.recv_timeout(Duration::from_secs(5)).expect("notice");
            if wanted(&notice) {
                return notice;
            }
        }
    }

    fn session(policy: Box<dyn crate::rules::RulePolicy>, cells: &[(u8, u8)]) -> GameSession<Vec<Notice>> {
        let mut session = GameSession::new(15, policy, Players::new("Doge", "Meow"), Vec::new()).unwrap();
        for &(r, c) in cells {
            session.submit(Pos::new(r, c)).unwrap();
        }
        session
    }

    #[test]
    fn test_loop_places_and_stops() {
        let (tx, rx) = mpsc::channel();
        let session = GameSession::new(
            15,
            FreeStyle::boxed(RuleSettings::default()),
            Players::new("Doge", "Meow"),
            tx,
        )
        .unwrap();
        let (controller, handle) = spawn(session).unwrap();

        controller.place(Pos::new(7, 7));
        let placed = wait_for(&rx, |n| matches!(n, Notice::PiecePlaced { .. }));
        assert_eq!(placed, Notice::PiecePlaced { pos: Pos::new(7, 7), stone: Stone::Black });

        controller.restart();
        wait_for(&rx, |n| *n == Notice::Restarted);

        controller.shutdown();
        let session = handle.join().unwrap();
        assert_eq!(session.move_count(), 0);
        assert!(controller.is_shut_down());
    }

    #[test]
    fn test_restart_survives_a_following_click() {
        let settings = RuleSettings { victory_length: 3, ..RuleSettings::default() };
        let ended = session(FreeStyle::boxed(settings), &[(0, 0), (9, 9), (0, 1), (9, 7), (0, 2)]);
        assert!(ended.is_ended());

        let (controller, moves, commands) = wire();
        controller.restart();
        controller.place(Pos::new(7, 7));
        controller.shutdown();
        let session = run(ended, moves, commands);

        assert!(!session.is_ended());
        assert_eq!(session.move_count(), 1);
        assert_eq!(session.cell(Pos::new(7, 7)).unwrap(), Stone::Black);
    }

    #[test]
    fn test_swap_choice_survives_a_following_click() {
        let paused = session(Swap::boxed(RuleSettings::default()), &[(0, 0), (1, 1), (2, 2)]);
        assert!(paused.is_paused());

        let (controller, moves, commands) = wire();
        controller.select_swap_option(swap::HOLD_WHITE);
        controller.place(Pos::new(7, 7));
        controller.shutdown();
        let session = run(paused, moves, commands);

        assert!(!session.is_paused());
        assert_eq!(session.move_count(), 4);
        assert_eq!(session.cell(Pos::new(7, 7)).unwrap(), Stone::White);
        assert_eq!(session.players().seated(Stone::Black).name(), "Doge");
    }

    #[test]
    fn test_paused_loop_waits_for_the_choice() {
        let (tx, rx) = mpsc::channel();
        let session = GameSession::new(
            15,
            Swap::boxed(RuleSettings::default()),
            Players::new("Doge", "Meow"),
            tx,
        )
        .unwrap();
        let (controller, handle) = spawn(session).unwrap();

        for (r, c) in [(0, 0), (1, 1), (2, 2)] {
            let pos = Pos::new(r, c);
            controller.place(pos);
            wait_for(&rx, |n| matches!(n, Notice::PiecePlaced { pos: p, .. } if *p == pos));
        }
        wait_for(&rx, |n| matches!(n, Notice::SwapOffered { .. }));

        controller.select_swap_option(swap::TAKE_BLACK);
        let seats = wait_for(&rx, |n| matches!(n, Notice::SeatsChanged(_)));
        assert!(matches!(seats, Notice::SeatsChanged(ref p) if p.seated(Stone::Black).name() == "Meow"));

        controller.place(Pos::new(5, 5));
        let placed = wait_for(&rx, |n| matches!(n, Notice::PiecePlaced { .. }));
        assert_eq!(placed, Notice::PiecePlaced { pos: Pos::new(5, 5), stone: Stone::White });

        controller.shutdown();
        assert_eq!(handle.join().unwrap().move_count(), 4);
    }

    #[test]
    fn test_moves_after_end_are_dropped() {
        let settings = RuleSettings { victory_length: 3, ..RuleSettings::default() };
        let ended = session(FreeStyle::boxed(settings), &[(0, 0), (9, 9), (0, 1), (9, 7), (0, 2)]);
        let before = ended.presenter().len();

        let (controller, moves, commands) = wire();
        controller.place(Pos::new(4, 4));
        controller.select_swap_option(swap::HOLD_WHITE);
        controller.shutdown();
        let session = run(ended, moves, commands);

        // Only the announcement at start-up was added
        assert_eq!(session.presenter().len(), before + 2);
        assert_eq!(session.move_count(), 5);
    }
}
