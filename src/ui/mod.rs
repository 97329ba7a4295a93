//! GUI module for the Gomoku game
//!
//! This module provides a native Rust GUI using egui/eframe. It only renders
//! what the game loop reports and forwards clicks through a
//! [`Controller`](crate::session::Controller).

mod app;
mod board_view;
mod game_state;
mod theme;

pub use app::GomokuApp;
pub use game_state::{GameResult, GameView, PendingSwap, RepaintingSink};
