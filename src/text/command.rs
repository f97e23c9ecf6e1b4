//! Parsing of text front-end commands

use thiserror::Error;

use crate::board::{parse_pos, BoardSize, Pos, Stone};
use crate::error::MoveError;
use crate::game::GameMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(Pos),
    Undo,
    Hint,
    Board,
    Help,
    /// `None` keeps the current mode
    New(Option<GameMode>),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command: '{0}'. Type 'help' for available commands.")]
    Unknown(String),

    #[error("Unknown game mode '{0}'. Use black, white or pvp.")]
    InvalidMode(String),

    #[error(transparent)]
    Move(#[from] MoveError),
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(input: &str, size: BoardSize) -> Result<Option<Command>, CommandError> {
    let lowered = input.trim().to_ascii_lowercase();
    let parts: Vec<&str> = lowered.split_whitespace().collect();

    let command = match parts.as_slice() {
        [] => return Ok(None),
        ["play" | "p", coord] => Command::Play(parse_pos(coord, size)?),
        ["undo" | "u"] => Command::Undo,
        ["hint" | "h"] => Command::Hint,
        ["board" | "b"] => Command::Board,
        ["help" | "?"] => Command::Help,
        ["new" | "n"] => Command::New(None),
        ["new" | "n", mode] => Command::New(Some(parse_mode(mode)?)),
        ["quit" | "exit" | "q"] => Command::Quit,
        [coord] => match parse_pos(coord, size) {
            Ok(pos) => Command::Play(pos),
            Err(MoveError::InvalidCoordinate(_)) => {
                return Err(CommandError::Unknown(input.trim().to_string()))
            }
            Err(e) => return Err(e.into()),
        },
        _ => return Err(CommandError::Unknown(input.trim().to_string())),
    };

    Ok(Some(command))
}

fn parse_mode(mode: &str) -> Result<GameMode, CommandError> {
    match mode {
        "black" | "b" => Ok(GameMode::PvE {
            human_color: Stone::Black,
        }),
        "white" | "w" => Ok(GameMode::PvE {
            human_color: Stone::White,
        }),
        "pvp" => Ok(GameMode::PvP),
        other => Err(CommandError::InvalidMode(other.to_string())),
    }
}
