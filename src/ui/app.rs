//! Main application for the Gomoku GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};

use super::board_view::BoardView;
use super::theme::*;
use crate::board::{format_pos, Stone};
use crate::config::GameConfig;
use crate::game::{GameMode, GameResult, GameState, WinType};

/// Main Gomoku application
pub struct GomokuApp {
    state: GameState,
    board_view: BoardView,
    show_debug: bool,
}

/// Actions requested by buttons, menus and shortcuts during one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    NewGame(GameMode),
    Undo,
    Hint,
    ToggleDebug,
}

impl GomokuApp {
    pub fn new(config: GameConfig) -> Self {
        Self {
            state: GameState::new(config, config.default_mode),
            board_view: BoardView::new(config.board_size.get()),
            show_debug: true,
        }
    }

    fn apply(&mut self, action: Action) {
        let outcome = match action {
            Action::NewGame(mode) => {
                self.state.new_game(mode);
                Ok(())
            }
            Action::Undo => self.state.undo().map(|_| ()),
            Action::Hint => self.state.start_suggestion(),
            Action::ToggleDebug => {
                self.show_debug = !self.show_debug;
                Ok(())
            }
        };

        if let Err(e) = outcome {
            tracing::warn!(?action, error = %e, "Action rejected");
            self.state.message = Some(e.to_string());
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context, actions: &mut Vec<Action>) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    let modes = [
                        ("New Game (PvE - Black)", GameMode::PvE { human_color: Stone::Black }),
                        ("New Game (PvE - White)", GameMode::PvE { human_color: Stone::White }),
                        ("New Game (PvP)", GameMode::PvP),
                    ];
                    for (label, mode) in modes {
                        if ui.button(label).clicked() {
                            actions.push(Action::NewGame(mode));
                            ui.close_menu();
                        }
                    }
                    ui.separator();
                    if ui.button("Undo (U)").clicked() {
                        actions.push(Action::Undo);
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{} - {}", self.state.mode, self.state.board.board_size()));
                });
            });
        });
    }

    /// Render the side panel with game info and debug
    fn render_side_panel(&self, ctx: &Context, actions: &mut Vec<Action>) {
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
                self.render_timer_card(ui);
                ui.add_space(10.0);
                self.render_actions_card(ui, actions);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                if let Some(result) = self.state.game_over {
                    ui.add_space(10.0);
                    if self.render_game_over_card(ui, &result) {
                        actions.push(Action::NewGame(self.state.mode));
                    }
                }

                if let Some(msg) = &self.state.message {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, msg);
                }
            });
    }

    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    /// Clickable label styled as a button
    fn card_button(ui: &mut egui::Ui, text: &str, fill: egui::Color32) -> bool {
        Frame::new()
            .fill(fill)
            .corner_radius(CornerRadius::same(6))
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.add(
                    egui::Label::new(RichText::new(text).size(12.0).color(TEXT_PRIMARY))
                        .sense(egui::Sense::click()),
                )
                .clicked()
            })
            .inner
    }

    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("GOMOKU").size(22.0).strong().color(TEXT_PRIMARY));
        });
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("{} board, five in a row", self.state.board.board_size()))
                    .size(11.0)
                    .color(TEXT_MUTED),
            );
        });
    }

    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let is_black = self.state.current_turn == Stone::Black;
            let accent = if is_black { BLACK_ACCENT } else { WHITE_ACCENT };

            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 22.0, accent);

                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(
                        RichText::new(self.state.current_turn.name().to_uppercase())
                            .size(18.0)
                            .strong()
                            .color(TEXT_PRIMARY),
                    );

                    let (status, color) = if self.state.is_hinting() {
                        ("Finding hint...", TIMER_WARNING)
                    } else if self.state.is_ai_thinking() {
                        ("AI thinking...", TIMER_WARNING)
                    } else if self.state.is_game_over() {
                        ("Game Over", WIN_HIGHLIGHT)
                    } else if self.state.is_ai_turn() {
                        ("AI to move", TIMER_WARNING)
                    } else {
                        ("Your turn", TIMER_NORMAL)
                    };
                    ui.label(RichText::new(status).size(12.0).color(color));
                });
            });
        });
    }

    fn render_timer_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("TIMER").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            if let Some(elapsed) = self.state.ai_thinking_elapsed() {
                let secs = elapsed.as_secs_f32();
                let limit = self.state.config().ai_time_limit_ms as f32 / 1000.0;
                let color = if secs < limit * 0.6 {
                    TIMER_NORMAL
                } else if secs < limit {
                    TIMER_WARNING
                } else {
                    TIMER_CRITICAL
                };
                ui.label(RichText::new(format!("{:.2}s", secs)).size(28.0).strong().color(color));
            } else {
                let elapsed = self.state.move_timer.elapsed();
                ui.label(
                    RichText::new(format!("{:.1}s", elapsed.as_secs_f32()))
                        .size(24.0)
                        .color(TEXT_PRIMARY),
                );
            }

            if let Some(ai_time) = self.state.move_timer.ai_thinking_time {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Last AI: {:.3}s", ai_time.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    fn render_actions_card(&self, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if Self::card_button(ui, "Undo", BUTTON_BG) {
                    actions.push(Action::Undo);
                }
                ui.add_space(4.0);
                if Self::card_button(ui, "Hint", BUTTON_BG) {
                    actions.push(Action::Hint);
                }
                ui.add_space(4.0);
                if Self::card_button(ui, "New", BUTTON_BG) {
                    actions.push(Action::NewGame(self.state.mode));
                }
            });

            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("Move #{}", self.state.move_history.len()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Frame::new()
            .fill(DEBUG_CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new("AI DEBUG").size(10.0).color(TEXT_MUTED));
                ui.add_space(6.0);

                let Some(result) = &self.state.last_ai_result else {
                    ui.label(RichText::new("Waiting for AI...").size(10.0).color(TEXT_MUTED));
                    return;
                };

                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(format!("{:?}", result.search_type))
                                .size(11.0)
                                .strong()
                                .color(TIMER_NORMAL),
                        );
                        ui.label(
                            RichText::new(format!("Score: {}", result.score))
                                .size(10.0)
                                .color(TEXT_SECONDARY),
                        );
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                        ui.vertical(|ui| {
                            ui.label(
                                RichText::new(format!("{}ms", result.time_ms))
                                    .size(10.0)
                                    .color(TEXT_SECONDARY),
                            );
                            ui.label(
                                RichText::new(format!("{} nodes", result.nodes))
                                    .size(10.0)
                                    .color(TEXT_MUTED),
                            );
                        });
                    });
                });

                if let Some(pos) = result.best_move {
                    ui.add_space(4.0);
                    ui.label(
                        RichText::new(format!("-> {}", format_pos(pos, self.state.board.board_size())))
                            .size(12.0)
                            .strong()
                            .color(WIN_HIGHLIGHT),
                    );
                }
            });
    }

    /// Returns true when "New Game" was clicked
    fn render_game_over_card(&self, ui: &mut egui::Ui, result: &GameResult) -> bool {
        let headline = match result.winner {
            Some(winner) => format!("{} WINS!", winner.name().to_uppercase()),
            None => "DRAW".to_string(),
        };
        let detail = match result.win_type {
            WinType::FiveInRow => "by five in a row",
            WinType::Draw => "the board is full",
        };

        Frame::new()
            .fill(GAME_OVER_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GAME OVER").size(12.0).color(TEXT_SECONDARY));
                    ui.add_space(8.0);
                    ui.label(RichText::new(headline).size(18.0).strong().color(TEXT_PRIMARY));
                    ui.add_space(4.0);
                    ui.label(RichText::new(detail).size(11.0).color(TEXT_SECONDARY));
                    ui.add_space(12.0);
                    Self::card_button(ui, "New Game", GAME_OVER_BUTTON)
                })
                .inner
            })
            .inner
    }

    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(MESSAGE_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    fn render_board(&mut self, ctx: &Context) {
        let interactive =
            !self.state.is_game_over() && !self.state.is_ai_thinking() && self.state.is_human_turn();

        CentralPanel::default()
            .frame(Frame::new().fill(BOARD_AREA_BG).inner_margin(10.0))
            .show(ctx, |ui| {
                if let Some(pos) = self.board_view.show(ui, &self.state, interactive) {
                    if let Err(e) = self.state.try_place_stone(pos) {
                        self.state.message = Some(e.to_string());
                    }
                }
            });
    }

    /// Keyboard shortcuts: U undo, H hint, N new game, D debug panel
    fn shortcuts(&self, ctx: &Context) -> Vec<Action> {
        ctx.input(|i| {
            [
                (egui::Key::U, Action::Undo),
                (egui::Key::H, Action::Hint),
                (egui::Key::N, Action::NewGame(self.state.mode)),
                (egui::Key::D, Action::ToggleDebug),
            ]
            .into_iter()
            .filter(|(key, _)| i.key_pressed(*key))
            .map(|(_, action)| action)
            .collect()
        })
    }
}

impl eframe::App for GomokuApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut actions = self.shortcuts(ctx);

        self.state.check_ai_result();

        self.render_menu_bar(ctx, &mut actions);
        self.render_side_panel(ctx, &mut actions);
        self.render_board(ctx);

        for action in actions {
            self.apply(action);
        }

        if self.state.is_ai_turn() && !self.state.is_ai_thinking() && !self.state.is_game_over() {
            self.state.start_ai_thinking();
        }

        if self.state.is_ai_thinking() {
            ctx.request_repaint();
        } else if !self.state.is_game_over() {
            // Keep the move timer ticking
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> GomokuApp {
        let config = GameConfig::new(10)
            .unwrap()
            .with_ai_depth(1)
            .with_hint(1, 50)
            .with_tt_size(1);
        GomokuApp::new(config)
    }

    #[test]
    fn test_apply_actions() {
        let mut app = app();
        app.apply(Action::Undo);
        assert_eq!(app.state.message.as_deref(), Some("Nothing to undo"));

        app.apply(Action::Hint);
        assert!(app.state.is_hinting());
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
        while app.state.is_ai_thinking() && std::time::Instant::now() < deadline {
            app.state.check_ai_result();
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert_eq!(app.state.suggested_move, Some(app.state.board.center()));

        app.apply(Action::NewGame(GameMode::PvP));
        assert_eq!(app.state.mode, GameMode::PvP);
        assert_eq!(app.state.message, None);

        let debug = app.show_debug;
        app.apply(Action::ToggleDebug);
        assert_ne!(app.show_debug, debug);
    }
}
