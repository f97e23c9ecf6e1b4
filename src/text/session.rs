//! Text game session: turns one input line into game actions and output

use std::io::Write;

use colored::Colorize;
use tracing::warn;

use super::command::{parse_command, Command};
use super::render::{render_board, render_help, render_result, stone_symbol};
use crate::board::{format_pos, Pos};
use crate::config::GameConfig;
use crate::engine::SearchType;
use crate::error::{GomokuError, MoveError};
use crate::game::{GameMode, GameState};

/// Whether the read loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct TextSession {
    state: GameState,
}

impl TextSession {
    pub fn new(config: GameConfig) -> Self {
        Self {
            state: GameState::new(config, config.default_mode),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Welcome banner, first board, and the AI's opening move when it plays Black
    pub fn start(&mut self, out: &mut impl Write) -> Result<(), GomokuError> {
        writeln!(out, "{}", "Welcome to Gomoku!".bright_blue().bold())?;
        writeln!(
            out,
            "{}",
            format!("{} board, five in a row wins.", self.state.board.board_size()).cyan()
        )?;
        writeln!(out, "{}", "Type 'help' for available commands".dimmed())?;
        self.announce_game(out)
    }

    pub fn prompt(&self) -> String {
        let turn = self.state.current_turn;
        format!("{} ({})> ", turn.name(), stone_symbol(turn))
    }

    /// Handle one line of input. Rejected input is reported and the session continues.
    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> Result<Flow, GomokuError> {
        let command = match parse_command(line, self.state.board.board_size()) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(e) => {
                warn!(input = line.trim(), error = %e, "Rejected command");
                writeln!(out, "{}", format!("Error: {}", e).red())?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Play(pos) => self.play(pos, out)?,
            Command::Undo => match self.state.undo() {
                Ok(n) => {
                    writeln!(out, "Took back {} move{}.", n, if n == 1 { "" } else { "s" })?;
                    render_board(&self.state, out)?;
                }
                Err(e) => report(&e, out)?,
            },
            Command::Hint => match self.state.request_suggestion() {
                Ok(pos) => {
                    writeln!(out, "Hint: {}", self.coord(pos).cyan().bold())?;
                    render_board(&self.state, out)?;
                }
                Err(e) => report(&e, out)?,
            },
            Command::Board => render_board(&self.state, out)?,
            Command::Help => render_help(out)?,
            Command::New(mode) => {
                self.state.new_game(mode.unwrap_or(self.state.mode));
                self.announce_game(out)?;
            }
            Command::Quit => {
                writeln!(out, "Goodbye!")?;
                return Ok(Flow::Quit);
            }
        }

        Ok(Flow::Continue)
    }

    fn play(&mut self, pos: Pos, out: &mut impl Write) -> Result<(), GomokuError> {
        let color = self.state.current_turn;
        if let Err(e) = self.state.try_place_stone(pos) {
            return report(&e, out);
        }
        writeln!(out, "{} plays {}", color.name(), self.coord(pos).bold())?;

        if !self.finish_if_over(out)? && self.state.is_ai_turn() {
            self.ai_reply(out)?;
        }
        if !self.state.is_game_over() {
            render_board(&self.state, out)?;
        }
        Ok(())
    }

    fn ai_reply(&mut self, out: &mut impl Write) -> Result<(), GomokuError> {
        let color = self.state.current_turn;
        match self.state.play_ai_move() {
            Ok(pos) => {
                if let Some(result) = &self.state.last_ai_result {
                    let how = match result.search_type {
                        SearchType::Opening => "opening",
                        SearchType::ImmediateWin => "winning move",
                        SearchType::Defense => "defense",
                        SearchType::AlphaBeta => "search",
                    };
                    writeln!(
                        out,
                        "AI ({}) plays {} {}",
                        color.name(),
                        self.coord(pos).bold(),
                        format!("[{}, {} ms]", how, result.time_ms).dimmed()
                    )?;
                }
                self.finish_if_over(out)?;
            }
            Err(e) => report(&e, out)?,
        }
        Ok(())
    }

    /// Print the result if the game just ended
    fn finish_if_over(&self, out: &mut impl Write) -> Result<bool, GomokuError> {
        match self.state.game_over {
            Some(result) => {
                render_board(&self.state, out)?;
                render_result(&self.state, &result, out)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn announce_game(&mut self, out: &mut impl Write) -> Result<(), GomokuError> {
        writeln!(out, "New game: {}", self.state.mode)?;
        if let GameMode::PvE { human_color } = self.state.mode {
            writeln!(out, "You play {} ({}).", human_color.name(), stone_symbol(human_color))?;
        }
        if self.state.is_ai_turn() {
            self.ai_reply(out)?;
        }
        render_board(&self.state, out)
    }

    fn coord(&self, pos: Pos) -> String {
        format_pos(pos, self.state.board.board_size())
    }
}

fn report(error: &MoveError, out: &mut impl Write) -> Result<(), GomokuError> {
    warn!(error = %error, "Rejected move");
    writeln!(out, "{}", format!("Error: {}", error).red())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Stone;

    fn session() -> TextSession {
        let config = GameConfig::new(10)
            .unwrap()
            .with_ai_depth(2)
            .with_ai_time_limit(100)
            .with_hint(1, 50)
            .with_tt_size(1);
        TextSession::new(config)
    }

    fn run(session: &mut TextSession, line: &str) -> (Flow, String) {
        let mut buf = Vec::new();
        let flow = session.handle_line(line, &mut buf).unwrap();
        (flow, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_start_prints_banner_and_board() {
        let mut s = session();
        let mut buf = Vec::new();
        s.start(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Welcome to Gomoku!"));
        assert!(text.contains("Player vs AI"));
        assert!(s.state().board.is_board_empty());
        assert_eq!(s.prompt(), "Black (X)> ");
    }

    #[test]
    fn test_move_gets_ai_reply() {
        let mut s = session();
        let (flow, text) = run(&mut s, "E5");
        assert_eq!(flow, Flow::Continue);
        assert!(text.contains("Black plays"));
        assert!(text.contains("AI (White) plays"));
        assert_eq!(s.state().board.get(Pos::new(5, 4)), Stone::Black);
        assert_eq!(s.state().move_history.len(), 2);
        assert_eq!(s.state().current_turn, Stone::Black);
    }

    #[test]
    fn test_bad_input_continues() {
        let mut s = session();
        let (flow, text) = run(&mut s, "Z99");
        assert_eq!(flow, Flow::Continue);
        assert!(text.contains("Error"));

        let (flow, text) = run(&mut s, "fly away");
        assert_eq!(flow, Flow::Continue);
        assert!(text.contains("Unknown command"));
        assert!(s.state().move_history.is_empty());
    }

    #[test]
    fn test_overflowing_coordinate_continues() {
        let mut s = session();
        for line in ["E-2147483648", "play E-2147483648", "E99999999999", "E+5"] {
            let (flow, text) = run(&mut s, line);
            assert_eq!(flow, Flow::Continue);
            assert!(text.contains("Error"), "{}: {}", line, text);
        }
        assert!(s.state().move_history.is_empty());
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let mut s = session();
        run(&mut s, "new pvp");
        run(&mut s, "E5");
        let (_, text) = run(&mut s, "e5");
        assert!(text.contains("already occupied"));
        assert_eq!(s.state().move_history.len(), 1);
    }

    #[test]
    fn test_new_as_white_ai_opens() {
        let mut s = session();
        let (_, text) = run(&mut s, "new white");
        assert!(text.contains("AI (Black) plays"));
        assert_eq!(s.state().board.get(Pos::new(4, 4)), Stone::Black);
        assert_eq!(s.prompt(), "White (O)> ");
    }

    #[test]
    fn test_undo_and_hint() {
        let mut s = session();
        let (_, text) = run(&mut s, "undo");
        assert!(text.contains("Nothing to undo"));

        run(&mut s, "E5");
        let (_, text) = run(&mut s, "u");
        assert!(text.contains("Took back 2 moves."));
        assert!(s.state().board.is_board_empty());

        let (_, text) = run(&mut s, "hint");
        assert!(text.contains("Hint:"));
        assert_eq!(s.state().suggested_move, Some(Pos::new(4, 4)));
    }

    #[test]
    fn test_win_announced_and_further_moves_rejected() {
        let mut s = session();
        run(&mut s, "new pvp");
        for (black, white) in [("A1", "A3"), ("B1", "B3"), ("C1", "C3"), ("D1", "D3")] {
            run(&mut s, black);
            run(&mut s, white);
        }
        let (_, text) = run(&mut s, "E1");
        assert!(text.contains("Black wins with five in a row!"));
        assert!(text.contains("A1 B1 C1 D1 E1"));

        let (_, text) = run(&mut s, "J10");
        assert!(text.contains("Game is over"));
    }

    #[test]
    fn test_quit() {
        let mut s = session();
        let (flow, text) = run(&mut s, "quit");
        assert_eq!(flow, Flow::Quit);
        assert!(text.contains("Goodbye!"));
        assert_eq!(run(&mut s, "  Q ").0, Flow::Quit);
        assert_eq!(run(&mut s, "").0, Flow::Continue);
    }
}
