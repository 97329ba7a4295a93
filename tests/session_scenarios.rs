//! Whole-game scenarios driven through the public API

use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

use gomoku::config::GameConfig;
use gomoku::rules::{self, swap, FreeStyle, RuleSettings, Swap};
use gomoku::session::{self, GameSession, Notice, Phase, Progress, Verdict};
use gomoku::{Players, Pos, Stone};

fn moves(session: &mut GameSession<Vec<Notice>>, cells: &[(u8, u8)]) -> Vec<Progress> {
    cells
        .iter()
        .map(|&(row, col)| session.submit(Pos::new(row, col)).unwrap())
        .collect()
}

fn wait_for(rx: &Receiver<Notice>, wanted: impl Fn(&Notice) -> bool) -> Notice {
    loop {
        let notice = rx.recv_timeout(Duration::from_secs(5)).expect("game loop went quiet");
        if wanted(&notice) {
            return notice;
        }
    }
}

#[test]
fn freestyle_five_in_a_row_wins() {
    let mut session = GameSession::new(
        15,
        FreeStyle::boxed(RuleSettings::default()),
        Players::new("Doge", "Meow"),
        Vec::new(),
    )
    .unwrap();

    let progress = moves(
        &mut session,
        &[(7, 7), (0, 0), (7, 8), (0, 1), (7, 9), (0, 2), (7, 10), (14, 14)],
    );
    assert!(progress.iter().all(|p| *p == Progress::Placed));

    let cells: Vec<Pos> = (7..=11).map(|col| Pos::new(7, col)).collect();
    let last = session.submit(Pos::new(7, 11)).unwrap();
    assert_eq!(last, Progress::Won { winner: Stone::Black, cells: cells.clone() });
    assert!(matches!(
        session.phase(),
        Phase::Ended(Verdict::Won { winner: Stone::Black, cells: won }) if *won == cells
    ));

    let won = session
        .presenter()
        .iter()
        .find_map(|n| match n {
            Notice::GameWon { winner, cells } => Some((winner.clone(), cells.clone())),
            _ => None,
        })
        .unwrap();
    assert_eq!(won.0.name(), "Doge");
    assert_eq!(won.1, cells);
}

#[test]
fn swap_declined_keeps_colors() {
    let mut session = GameSession::new(
        15,
        Swap::boxed(RuleSettings::default()),
        Players::new("Doge", "Meow"),
        Vec::new(),
    )
    .unwrap();

    let progress = moves(&mut session, &[(0, 0), (1, 1), (2, 2)]);
    assert_eq!(progress, vec![Progress::Placed, Progress::Placed, Progress::Paused]);
    assert!(session.is_paused());
    assert!(session.presenter().contains(&Notice::SwapOffered {
        prompt: swap::PROMPT.to_string(),
        labels: vec![swap::TAKE_BLACK.to_string(), swap::HOLD_WHITE.to_string()],
    }));

    session.select_swap_option(swap::HOLD_WHITE).unwrap();
    assert!(matches!(session.phase(), Phase::AwaitingMove));
    assert_eq!(session.turn(), Stone::White);
    assert_eq!(session.players().seated(Stone::Black).name(), "Doge");
    assert_eq!(session.current_player().name(), "Meow");

    // The offer is made once per game
    let progress = moves(&mut session, &[(3, 3), (4, 4), (5, 6)]);
    assert!(progress.iter().all(|p| *p == Progress::Placed));
}

#[test]
fn swap_offer_returns_after_restart() {
    let mut session = GameSession::new(
        15,
        Swap::boxed(RuleSettings::default()),
        Players::new("Doge", "Meow"),
        Vec::new(),
    )
    .unwrap();

    moves(&mut session, &[(0, 0), (1, 1), (2, 2)]);
    session.select_swap_option(swap::TAKE_BLACK).unwrap();
    assert_eq!(session.players().seated(Stone::Black).name(), "Meow");

    session.restart();
    // Seating survives a restart
    assert_eq!(session.players().seated(Stone::Black).name(), "Meow");
    assert_eq!(session.current_player().name(), "Meow");

    let progress = moves(&mut session, &[(6, 6), (8, 8), (10, 10)]);
    assert_eq!(progress.last(), Some(&Progress::Paused));
}

#[test]
fn config_builds_every_registered_rule() {
    for name in rules::names() {
        let config = GameConfig { rule: name.to_string(), ..GameConfig::default() };
        config.validate().unwrap();
        let session = GameSession::from_config(&config, Vec::<Notice>::new()).unwrap();
        assert_eq!(session.rule_name(), name);
        assert_eq!(session.board().size(), config.board_size);
    }
}

#[test]
fn threaded_game_reaches_a_verdict() {
    let (tx, rx) = channel();
    let session = GameSession::new(
        15,
        FreeStyle::boxed(RuleSettings::default()),
        Players::new("Doge", "Meow"),
        tx,
    )
    .unwrap();
    let (controller, handle) = session::spawn(session).unwrap();

    let script = [(7, 7), (0, 0), (7, 8), (0, 1), (7, 9), (0, 2), (7, 10), (14, 14)];
    for (row, col) in script {
        let pos = Pos::new(row, col);
        controller.place(pos);
        // One request in flight at a time, or the slot would overwrite it
        wait_for(&rx, |n| matches!(n, Notice::PiecePlaced { pos: p, .. } if *p == pos));
    }

    controller.place(Pos::new(7, 11));
    let won = wait_for(&rx, |n| matches!(n, Notice::GameWon { .. }));
    assert!(matches!(won, Notice::GameWon { ref winner, .. } if winner.stone() == Stone::Black));

    controller.shutdown();
    let session = handle.join().unwrap();
    assert!(session.is_ended());
    assert_eq!(session.move_count(), 9);
}
