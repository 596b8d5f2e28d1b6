//! Main application for the tic-tac-toe GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel};

use super::board_view::{BoardOverlay, BoardView};
use super::game_state::GameState;
use super::theme::*;
use crate::{Difficulty, Mark, Outcome, Phase, PlayerResult};

/// Main tic-tac-toe application
pub struct TicTacToeApp {
    state: GameState,
    board_view: BoardView,
    show_debug: bool,
}

impl Default for TicTacToeApp {
    fn default() -> Self {
        Self {
            state: GameState::new(Difficulty::default()),
            board_view: BoardView::default(),
            show_debug: false,
        }
    }
}

impl TicTacToeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    for difficulty in Difficulty::ALL {
                        if ui.button(format!("New Game ({})", difficulty.label())).clicked() {
                            self.state.set_difficulty(difficulty);
                            ui.close_menu();
                        }
                    }
                    ui.separator();
                    if ui.button("Undo").clicked() {
                        self.state.undo();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(self.state.difficulty().label());
                });
            });
        });
    }

    /// Render the side panel with game info and debug
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(220.0)
            .max_width(260.0)
            .frame(Frame::new().fill(egui::Color32::from_rgb(25, 27, 31)))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                ui.label(RichText::new("TIC-TAC-TOE").size(22.0).strong().color(TEXT_PRIMARY));
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                self.render_score_card(ui);
                ui.add_space(10.0);

                self.render_actions_card(ui);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                if self.state.session.phase().is_over() {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui);
                }

                if let Some(msg) = &self.state.message {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, msg);
                }
            });
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(egui::Color32::from_rgb(35, 38, 43))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_turn_card(&self, ui: &mut egui::Ui) {
        let session = &self.state.session;
        let turn = session.active();

        Self::card_frame().show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(turn.symbol().to_string()).size(32.0).strong().color(mark_color(turn)));
                ui.add_space(12.0);

                let status = if self.state.is_ai_thinking() {
                    ("AI thinking...", STATUS_WAIT)
                } else if session.phase().is_over() {
                    ("Game Over", WIN_HIGHLIGHT)
                } else if session.automated().is_none() {
                    ("Player's turn", STATUS_OK)
                } else {
                    ("Your turn", STATUS_OK)
                };
                ui.label(RichText::new(status.0).size(14.0).color(status.1));
                if let Some(elapsed) = self.state.ai_thinking_elapsed() {
                    ui.label(RichText::new(format!("{:.1}s", elapsed.as_secs_f32())).size(11.0).color(TEXT_SECONDARY));
                }
            });

            if session.difficulty().is_windowed() {
                ui.add_space(4.0);
                ui.label(
                    RichText::new("Zen: three marks each, the oldest fades")
                        .size(10.0)
                        .color(TEXT_MUTED),
                );
            }
        });
    }

    fn render_score_card(&self, ui: &mut egui::Ui) {
        let score = self.state.session.scoreboard();

        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("SCORE").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("X {}", score.x_wins)).size(16.0).color(X_COLOR));
                ui.add_space(12.0);
                ui.label(RichText::new(format!("O {}", score.o_wins)).size(16.0).color(O_COLOR));
                ui.add_space(12.0);
                ui.label(RichText::new(format!("Draws {}", score.draws)).size(12.0).color(TEXT_SECONDARY));
            });
        });
    }

    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if ui.add_enabled(self.state.session.can_undo(), egui::Button::new("Undo")).clicked() {
                    self.state.undo();
                }
                if self.state.session.automated().is_none() && ui.button("Hint").clicked() {
                    self.state.request_suggestion();
                }
                if ui.button("New Game").clicked() {
                    self.state.reset();
                }
            });

            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("Move #{}", self.state.session.move_count()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("AI DEBUG").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            if let Some(result) = &self.state.last_ai_result {
                ui.label(RichText::new(format!("{:?}", result.search_type)).size(11.0).strong().color(STATUS_OK));
                ui.label(RichText::new(format!("Score: {}", result.score)).size(10.0).color(TEXT_SECONDARY));
                ui.label(
                    RichText::new(format!("{}ms, {} nodes", result.time_ms, result.nodes))
                        .size(10.0)
                        .color(TEXT_MUTED),
                );
                if let Some(pos) = result.best_move {
                    ui.label(RichText::new(format!("-> cell {pos}")).size(12.0).strong().color(WIN_HIGHLIGHT));
                }
            } else {
                ui.label(RichText::new("Waiting for AI...").size(10.0).color(TEXT_MUTED));
            }
        });
    }

    fn render_game_over_card(&mut self, ui: &mut egui::Ui) {
        let headline = match (self.state.session.phase(), self.state.last_report.and_then(|r| r.result)) {
            (_, Some(PlayerResult::Win)) => "You win!".to_string(),
            (_, Some(PlayerResult::Loss)) => "AI wins".to_string(),
            (Phase::Won(mark), None) => format!("{} wins!", mark.symbol()),
            _ => "Draw".to_string(),
        };

        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GAME OVER").size(12.0).color(egui::Color32::from_rgb(180, 255, 180)));
                    ui.add_space(8.0);
                    ui.label(RichText::new(headline).size(20.0).strong().color(TEXT_PRIMARY));
                    ui.add_space(12.0);
                    if ui.button("Play again").clicked() {
                        self.state.reset();
                    }
                });
            });
    }

    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    /// Render the main board
    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            let session = &self.state.session;
            let winning_line = match session.outcome() {
                Outcome::Win { line, .. } => Some(line),
                _ => None,
            };
            let overlay = BoardOverlay {
                current_turn: session.active(),
                last_move: session.last_move(),
                suggested_move: self.state.suggested_move,
                winning_line,
                fading: [session.fading_cell(Mark::X), session.fading_cell(Mark::O)],
                accepts_input: session.is_human_turn() && !self.state.is_ai_thinking(),
            };

            let clicked = self.board_view.show(ui, session.board(), &overlay);

            if let Some(pos) = clicked {
                if let Err(msg) = self.state.try_place_mark(pos) {
                    self.state.message = Some(msg);
                }
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        ctx.input(|i| {
            if i.key_pressed(egui::Key::D) {
                self.show_debug = !self.show_debug;
            }

            // H - Hint (two players)
            if i.key_pressed(egui::Key::H) && self.state.session.automated().is_none() {
                self.state.request_suggestion();
            }

            if i.key_pressed(egui::Key::U) {
                self.state.undo();
            }

            if i.key_pressed(egui::Key::N) {
                self.state.reset();
            }
        });
    }
}

impl eframe::App for TicTacToeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        self.state.check_ai_result();

        if self.state.is_ai_turn() && !self.state.is_ai_thinking() {
            self.state.start_ai_thinking();
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        // Also polls while an abandoned worker hands the engine back
        if self.state.is_ai_thinking() || self.state.is_ai_turn() {
            ctx.request_repaint();
        }
    }
}

fn mark_color(mark: Mark) -> egui::Color32 {
    match mark {
        Mark::O => O_COLOR,
        _ => X_COLOR,
    }
}
