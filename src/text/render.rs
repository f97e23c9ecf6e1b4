//! Board and status rendering for the terminal

use std::io::Write;

use colored::Colorize;

use crate::board::{format_pos, Pos, Stone};
use crate::error::GomokuError;
use crate::game::{GameResult, GameState, WinType};

/// Draw the board with coordinates. The last move, the winning line and the
/// current hint are highlighted.
pub fn render_board(state: &GameState, out: &mut impl Write) -> Result<(), GomokuError> {
    let size = state.board.size();
    let winning_line = state.game_over.and_then(|r| r.winning_line);
    let header: String = (0..size)
        .map(|c| format!("{} ", (b'A' + c as u8) as char))
        .collect();

    writeln!(out)?;
    writeln!(out, "    {}", header.trim_end().dimmed())?;
    for row in 0..size {
        let label = size - row;
        write!(out, "{:>3} ", label.to_string().dimmed())?;
        for col in 0..size {
            let pos = Pos::new(row as u8, col as u8);
            let on_line = winning_line.is_some_and(|line| line.contains(&pos));
            let cell = match state.board.get(pos) {
                Stone::Black => "X".bold(),
                Stone::White => "O".bold(),
                Stone::Empty if state.suggested_move == Some(pos) => "*".cyan().bold(),
                Stone::Empty => ".".dimmed(),
            };
            let cell = if on_line {
                cell.green()
            } else if state.last_move == Some(pos) {
                cell.yellow()
            } else {
                cell
            };
            if col + 1 < size {
                write!(out, "{} ", cell)?;
            } else {
                write!(out, "{}", cell)?;
            }
        }
        writeln!(out, " {}", label.to_string().dimmed())?;
    }
    writeln!(out, "    {}", header.trim_end().dimmed())?;
    writeln!(out)?;
    Ok(())
}

pub fn stone_symbol(stone: Stone) -> &'static str {
    match stone {
        Stone::Black => "X",
        Stone::White => "O",
        Stone::Empty => ".",
    }
}

/// Announce a finished game
pub fn render_result(
    state: &GameState,
    result: &GameResult,
    out: &mut impl Write,
) -> Result<(), GomokuError> {
    match (result.win_type, result.winner) {
        (WinType::FiveInRow, Some(winner)) => {
            let line = result
                .winning_line
                .map(|line| {
                    line.iter()
                        .map(|&p| format_pos(p, state.board.board_size()))
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .unwrap_or_default();
            writeln!(
                out,
                "{} {}",
                format!("{} wins with five in a row!", winner.name()).green().bold(),
                line
            )?;
        }
        _ => writeln!(out, "{}", "Draw: the board is full.".yellow().bold())?,
    }
    writeln!(out, "{}", "Type 'new' to play again or 'undo' to take back.".dimmed())?;
    Ok(())
}

pub fn render_help(out: &mut impl Write) -> Result<(), GomokuError> {
    writeln!(out, "{}", "Commands:".bright_blue().bold())?;
    let commands = [
        ("<coord>, play <coord>", "place a stone, e.g. E5"),
        ("undo, u", "take back your last move"),
        ("hint, h", "ask the AI for a suggestion"),
        ("board, b", "show the board"),
        ("new [black|white|pvp]", "start a new game"),
        ("help, ?", "show this help"),
        ("quit, exit, q", "leave the game"),
    ];
    for (name, description) in commands {
        writeln!(out, "  {:<24}{}", name.cyan(), description)?;
    }
    Ok(())
}
