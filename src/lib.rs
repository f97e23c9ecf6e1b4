//! Gomoku with a text and a graphical front-end
//!
//! Freestyle Gomoku rules:
//! - Square board, 10x10 by default (5x5 up to 19x19 supported)
//! - Black moves first
//! - 5-in-a-row to win (overlines allowed)
//! - A full board without a five is a draw
//!
//! # Architecture
//!
//! - [`board`]: Board representation with bitboards and `E5` notation
//! - [`rules`]: Win and draw detection
//! - [`eval`]: Position evaluation and heuristics
//! - [`search`]: Alpha-beta search with transposition table
//! - [`engine`]: Main AI engine integrating all components
//! - [`game`]: Game session shared by the front-ends
//! - [`text`] / [`ui`]: Console and window front-ends
//! - [`launcher`]: Picks a front-end from the command line
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{AIEngine, Board, BoardSize, Pos, Stone};
//!
//! let mut board = Board::new(BoardSize::try_from(10).unwrap());
//! let mut engine = AIEngine::with_config(4, 3, 300);
//!
//! board.place_stone(Pos::new(4, 4), Stone::Black);
//!
//! // AI responds as White
//! if let Some(pos) = engine.get_move(&board, Stone::White) {
//!     board.place_stone(pos, Stone::White);
//!     println!("AI plays at {}", gomoku::board::format_pos(pos, board.board_size()));
//! }
//! ```
//!
//! # Search Priority
//!
//! 1. Opening move on an empty board (center)
//! 2. Immediate winning move
//! 3. Defense against the opponent's five or open four
//! 4. Alpha-Beta search with transposition table

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod launcher;
pub mod rules;
pub mod search;
pub mod text;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, BoardSize, Pos, Stone};
pub use config::GameConfig;
pub use engine::{AIEngine, MoveResult, SearchType};
pub use error::{GomokuError, MoveError};
pub use game::{GameMode, GameState};
pub use launcher::{launch, FrontEnd, LaunchConfig, Mode};
