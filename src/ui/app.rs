//! Main application for the Gomoku GUI

use std::sync::mpsc::{channel, Receiver};
use std::thread::JoinHandle;

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};
use tracing::{debug, warn};

use crate::config::GameConfig;
use crate::session::{self, Controller, GameSession, Notice, SessionError};
use crate::Stone;

use super::board_view::BoardView;
use super::game_state::{GameResult, GameView, RepaintingSink};
use super::theme::*;

const HELP_TEXT: &str = "Please choose the appropriate location.\n\
    The color of the stone following the mouse is the color of the upcoming stone.";

const ABOUT_TEXT: &str = "This is a simple Gomoku.\nWish you a happy game!";

/// Main Gomoku application
pub struct GomokuApp {
    view: GameView,
    board_view: BoardView,
    controller: Controller,
    notices: Receiver<Notice>,
    game_loop: Option<JoinHandle<GameSession<RepaintingSink>>>,
    rule: &'static str,
    /// A swap button was clicked and the game loop has not answered yet
    swap_choice_sent: bool,
    confirm_restart: bool,
    show_help: bool,
    show_about: bool,
}

impl GomokuApp {
    /// Start the game loop for `config` and build the window state
    pub fn new(cc: &eframe::CreationContext<'_>, config: GameConfig) -> Result<Self, SessionError> {
        let (tx, rx) = channel();
        let sink = RepaintingSink { tx, ctx: cc.egui_ctx.clone() };
        let session = GameSession::from_config(&config, sink)?;
        let rule = session.rule_name();
        let (controller, game_loop) = session::spawn(session)?;

        Ok(Self {
            view: GameView::new(config.board_size),
            board_view: BoardView::default(),
            controller,
            notices: rx,
            game_loop: Some(game_loop),
            rule,
            swap_choice_sent: false,
            confirm_restart: false,
            show_help: false,
            show_about: false,
        })
    }

    /// Pull everything the game loop reported since the last frame
    fn drain_notices(&mut self) {
        while let Ok(notice) = self.notices.try_recv() {
            debug!(?notice, "notice");
            self.view.apply(notice);
        }
        if self.view.swap.is_none() {
            self.swap_choice_sent = false;
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("Restart Game (N)").clicked() {
                        self.confirm_restart = true;
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Exit Game").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        ui.close_menu();
                    }
                });

                ui.menu_button("Help", |ui| {
                    if ui.button("Help").clicked() {
                        self.show_help = true;
                        ui.close_menu();
                    }
                    if ui.button("About").clicked() {
                        self.show_about = true;
                        ui.close_menu();
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("Rule: {}", self.rule));
                });
            });
        });
    }

    /// Render the side panel with game info
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(PANEL_BG))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                self.render_title_card(ui);
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                self.render_players_card(ui);
                ui.add_space(10.0);

                self.render_actions_card(ui);

                if let Some(result) = self.view.result.clone() {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui, &result);
                }

                if let Some(rejection) = &self.view.message {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, &rejection.title, &rejection.message);
                }
            });
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("GOMOKU").size(22.0).strong().color(TEXT_PRIMARY));
        });
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new(format!("{0}x{0} board", self.view.size())).size(11.0).color(TEXT_MUTED));
        });
    }

    /// Render turn indicator card
    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let is_black = self.view.turn == Stone::Black;
            let (color_name, accent, stone_color) = if is_black {
                ("BLACK", egui::Color32::from_rgb(70, 70, 75), BLACK_STONE)
            } else {
                ("WHITE", egui::Color32::from_rgb(220, 220, 225), WHITE_STONE)
            };

            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 22.0, accent);
                ui.painter().circle_filled(rect.center(), 16.0, stone_color);

                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(RichText::new(color_name).size(18.0).strong().color(TEXT_PRIMARY));

                    let name = self.view.to_move.as_ref().map(|p| p.name().to_string()).unwrap_or_default();
                    let status = if self.view.is_over() {
                        ("Game over".to_string(), WIN_HIGHLIGHT)
                    } else if self.view.swap.is_some() {
                        ("Choosing colors...".to_string(), STATUS_WARNING)
                    } else {
                        (format!("{} to play", name), STATUS_OK)
                    };
                    ui.label(RichText::new(status.0).size(12.0).color(status.1));
                });
            });
        });
    }

    fn render_players_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("PLAYERS").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);
            if let Some(players) = &self.view.players {
                for player in players.iter() {
                    let symbol = if player.stone() == Stone::Black { "●" } else { "○" };
                    ui.label(RichText::new(format!("{} {}", symbol, player.name())).size(14.0).color(TEXT_PRIMARY));
                }
            }
        });
    }

    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            if ui.button("Restart").clicked() {
                self.confirm_restart = true;
            }

            ui.add_space(8.0);
            ui.label(RichText::new(format!("Move #{}", self.view.move_count)).size(11.0).color(TEXT_SECONDARY));
        });
    }

    fn render_game_over_card(&mut self, ui: &mut egui::Ui, result: &GameResult) {
        let (headline, detail) = match result {
            GameResult::Won { winner, .. } => (format!("{} wins!", winner.name()), format!("playing {}", winner.stone())),
            GameResult::Tied => ("Tie game".to_string(), "the board is full".to_string()),
        };

        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GAME OVER").size(12.0).color(egui::Color32::from_rgb(180, 255, 180)));
                    ui.add_space(8.0);
                    ui.label(RichText::new(headline).size(18.0).strong().color(TEXT_PRIMARY));
                    ui.label(RichText::new(detail).size(11.0).color(TEXT_SECONDARY));
                    ui.add_space(12.0);
                    if ui.button("New Game").clicked() {
                        self.controller.restart();
                    }
                });
            });
    }

    fn render_message_card(ui: &mut egui::Ui, title: &str, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(title).size(12.0).strong().color(TEXT_PRIMARY));
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    /// Render the main board
    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            if let Some(pos) = self.board_view.show(ui, &self.view) {
                self.controller.place(pos);
            }
        });
    }

    /// Modal windows: swap choice, restart confirmation, help and about
    fn render_dialogs(&mut self, ctx: &Context) {
        if let Some(swap) = self.view.swap.clone() {
            egui::Window::new("Swap")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(swap.prompt.as_str());
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        // The window stays up until the game loop reports the new seats
                        for label in &swap.labels {
                            let button = egui::Button::new(label.as_str());
                            if ui.add_enabled(!self.swap_choice_sent, button).clicked() {
                                self.controller.select_swap_option(label.clone());
                                self.swap_choice_sent = true;
                            }
                        }
                    });
                });
        }

        if self.confirm_restart {
            egui::Window::new("Confirm")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label("Do you really want to restart this game?");
                    ui.horizontal(|ui| {
                        if ui.button("Yes").clicked() {
                            self.controller.restart();
                            self.confirm_restart = false;
                        }
                        if ui.button("No").clicked() {
                            self.confirm_restart = false;
                        }
                    });
                });
        }

        egui::Window::new("Help")
            .open(&mut self.show_help)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.label(HELP_TEXT);
            });

        egui::Window::new("About")
            .open(&mut self.show_about)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.label(ABOUT_TEXT);
            });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        ctx.input(|i| {
            // N - Restart (asks first)
            if i.key_pressed(egui::Key::N) {
                self.confirm_restart = true;
            }
        });
    }
}

impl eframe::App for GomokuApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.drain_notices();
        self.handle_input(ctx);

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);
        self.render_dialogs(ctx);
    }
}

impl Drop for GomokuApp {
    fn drop(&mut self) {
        self.controller.shutdown();
        if let Some(handle) = self.game_loop.take() {
            if handle.join().is_err() {
                warn!("game loop panicked");
            }
        }
    }
}
