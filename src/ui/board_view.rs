//! Board rendering for the Gomoku GUI

use egui::{CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use super::theme::*;
use crate::board::{Board, Pos, Stone};
use crate::game::GameState;
use crate::rules::is_valid_move;

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
    /// Lines per side
    size: usize,
}

impl BoardView {
    pub fn new(size: usize) -> Self {
        Self {
            cell_size: 30.0,
            board_rect: Rect::NOTHING,
            size,
        }
    }

    /// Fit the grid into `rect`
    pub fn layout(&mut self, rect: Rect, size: usize) {
        self.size = size;
        self.board_rect = rect;
        self.cell_size = (rect.width() - 2.0 * BOARD_MARGIN) / (size.max(2) as f32 - 1.0);
    }

    /// Render the board and return the clicked cell, if any. Clicks are only
    /// reported when `interactive` is set.
    pub fn show(&mut self, ui: &mut egui::Ui, state: &GameState, interactive: bool) -> Option<Pos> {
        let available = ui.available_size();
        let side = (available.x.min(available.y) - 20.0).max(2.0 * BOARD_MARGIN + 40.0);

        let (response, painter) = ui.allocate_painter(Vec2::new(side, side), Sense::click());
        self.layout(response.rect, state.board.size());

        painter.rect_filled(self.board_rect, CornerRadius::same(4), BOARD_BG);
        self.draw_grid(&painter);
        self.draw_star_points(&painter);
        self.draw_coordinates(&painter);
        self.draw_stones(&painter, &state.board);

        if let Some(pos) = state.last_move {
            let center = self.board_to_screen(pos);
            painter.circle_filled(center, LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
        }

        if let Some(line) = state.game_over.and_then(|r| r.winning_line) {
            self.draw_winning_line(&painter, &line);
        }

        if let Some(pos) = state.suggested_move {
            self.draw_suggestion(&painter, pos, state.current_turn);
        }

        if !interactive {
            return None;
        }

        let board_pos = response.hover_pos().and_then(|p| self.screen_to_board(p))?;
        let is_valid = is_valid_move(&state.board, board_pos);
        let color = if is_valid {
            ghost_stone(state.current_turn, 80)
        } else {
            hover_invalid()
        };
        painter.circle_filled(self.board_to_screen(board_pos), self.stone_radius(), color);

        (response.clicked() && is_valid).then_some(board_pos)
    }

    fn stone_radius(&self) -> f32 {
        self.cell_size * STONE_RADIUS_RATIO
    }

    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let span = (self.size as f32 - 1.0) * self.cell_size;

        for i in 0..self.size {
            let offset = BOARD_MARGIN + i as f32 * self.cell_size;

            let start = self.board_rect.min + Vec2::new(offset, BOARD_MARGIN);
            let end = self.board_rect.min + Vec2::new(offset, BOARD_MARGIN + span);
            painter.line_segment([start, end], stroke);

            let start = self.board_rect.min + Vec2::new(BOARD_MARGIN, offset);
            let end = self.board_rect.min + Vec2::new(BOARD_MARGIN + span, offset);
            painter.line_segment([start, end], stroke);
        }
    }

    fn draw_star_points(&self, painter: &Painter) {
        for pos in star_points(self.size) {
            painter.circle_filled(self.board_to_screen(pos), STAR_POINT_RADIUS, STAR_POINT);
        }
    }

    /// Column letters on top and bottom, row numbers (counted from the bottom) on both sides
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional(12.0);

        for col in 0..self.size {
            let letter = ((b'A' + col as u8) as char).to_string();
            let x = self.board_rect.min.x + BOARD_MARGIN + col as f32 * self.cell_size;

            for y in [self.board_rect.min.y + 14.0, self.board_rect.max.y - 14.0] {
                painter.text(
                    Pos2::new(x, y),
                    egui::Align2::CENTER_CENTER,
                    &letter,
                    font.clone(),
                    GRID_LINE,
                );
            }
        }

        for row in 0..self.size {
            let num = (self.size - row).to_string();
            let y = self.board_rect.min.y + BOARD_MARGIN + row as f32 * self.cell_size;

            for x in [self.board_rect.min.x + 14.0, self.board_rect.max.x - 14.0] {
                painter.text(
                    Pos2::new(x, y),
                    egui::Align2::CENTER_CENTER,
                    &num,
                    font.clone(),
                    GRID_LINE,
                );
            }
        }
    }

    fn draw_stones(&self, painter: &Painter, board: &Board) {
        for (pos, stone) in board
            .positions()
            .map(|p| (p, board.get(p)))
            .filter(|&(_, s)| s != Stone::Empty)
        {
            self.draw_stone(painter, pos, stone);
        }
    }

    /// Draw a single stone with shadow and highlight
    fn draw_stone(&self, painter: &Painter, pos: Pos, stone: Stone) {
        let center = self.board_to_screen(pos);
        let radius = self.stone_radius();
        let shadow_offset = Vec2::new(2.0, 2.0);

        match stone {
            Stone::Black => {
                painter.circle_filled(
                    center + shadow_offset,
                    radius,
                    egui::Color32::from_rgba_unmultiplied(0, 0, 0, 60),
                );
                painter.circle_filled(center, radius, BLACK_STONE);
                painter.circle_filled(
                    center + Vec2::new(-radius * 0.3, -radius * 0.3),
                    radius * 0.2,
                    BLACK_STONE_HIGHLIGHT,
                );
            }
            Stone::White => {
                painter.circle_filled(
                    center + shadow_offset,
                    radius,
                    egui::Color32::from_rgba_unmultiplied(0, 0, 0, 40),
                );
                painter.circle_filled(center, radius, WHITE_STONE);
                painter.circle_stroke(
                    center,
                    radius * 0.85,
                    Stroke::new(radius * 0.1, WHITE_STONE_SHADOW),
                );
            }
            Stone::Empty => {}
        }
    }

    fn draw_winning_line(&self, painter: &Painter, line: &[Pos; 5]) {
        let stroke = Stroke::new(4.0, WIN_HIGHLIGHT);

        for pair in line.windows(2) {
            painter.line_segment(
                [self.board_to_screen(pair[0]), self.board_to_screen(pair[1])],
                stroke,
            );
        }
        for &pos in line {
            painter.circle_stroke(self.board_to_screen(pos), self.stone_radius() + 3.0, stroke);
        }
    }

    fn draw_suggestion(&self, painter: &Painter, pos: Pos, turn: Stone) {
        let center = self.board_to_screen(pos);
        painter.circle_filled(center, self.stone_radius(), ghost_stone(turn, 100));
        painter.circle_stroke(center, self.stone_radius(), Stroke::new(2.0, HINT_MARKER));
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            "?",
            egui::FontId::proportional(14.0),
            HINT_MARKER,
        );
    }

    /// Convert screen coordinates to the nearest board position
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let relative = screen_pos - self.board_rect.min;
        let col = ((relative.x - BOARD_MARGIN + self.cell_size * 0.5) / self.cell_size).floor() as i32;
        let row = ((relative.y - BOARD_MARGIN + self.cell_size * 0.5) / self.cell_size).floor() as i32;

        let size = self.size as i32;
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Some(Pos::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Convert board position to screen coordinates
    pub fn board_to_screen(&self, pos: Pos) -> Pos2 {
        let x = self.board_rect.min.x + BOARD_MARGIN + pos.col as f32 * self.cell_size;
        let y = self.board_rect.min.y + BOARD_MARGIN + pos.row as f32 * self.cell_size;
        Pos2::new(x, y)
    }
}

/// Marker points for a board of `size` lines: the four corner points, plus the
/// center on odd boards. Boards under 9 lines have none.
pub fn star_points(size: usize) -> Vec<Pos> {
    if size < 9 {
        return Vec::new();
    }

    let edge = if size >= 13 { 3 } else { 2 };
    let far = (size - 1 - edge) as u8;
    let near = edge as u8;
    let mut points = vec![
        Pos::new(near, near),
        Pos::new(near, far),
        Pos::new(far, near),
        Pos::new(far, far),
    ];
    if size % 2 == 1 {
        let mid = (size / 2) as u8;
        points.push(Pos::new(mid, mid));
    }
    points
}
