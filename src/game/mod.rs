//! Game session shared by the text and graphical front-ends

mod state;

pub use state::{AiState, AiTask, GameMode, GameResult, GameState, MoveTimer, WinType};
