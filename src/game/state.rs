//! Game state management: turns, history, results and the AI opponent

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::board::{format_pos, Board, Pos, Stone};
use crate::config::GameConfig;
use crate::engine::{AIEngine, MoveResult};
use crate::error::MoveError;
use crate::rules::find_five_line_at_pos;

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Player vs AI
    PvE { human_color: Stone },
    /// Player vs Player (hotseat)
    PvP,
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::PvE {
            human_color: Stone::Black,
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameMode::PvE { human_color } => {
                write!(f, "Player vs AI (you play {})", human_color.name())
            }
            GameMode::PvP => write!(f, "Player vs Player"),
        }
    }
}

/// What a background search was started for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiTask {
    /// The AI's own move, played when it arrives
    Move,
    /// A suggestion for the side to play, only shown
    Hint,
}

/// AI computation state
pub enum AiState {
    Idle,
    Thinking {
        task: AiTask,
        receiver: Receiver<MoveResult>,
        start_time: Instant,
    },
}

/// Game result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    /// `None` for a draw
    pub winner: Option<Stone>,
    pub win_type: WinType,
    pub winning_line: Option<[Pos; 5]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinType {
    FiveInRow,
    Draw,
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

/// Main game state
pub struct GameState {
    pub board: Board,
    pub mode: GameMode,
    pub current_turn: Stone,
    pub game_over: Option<GameResult>,
    pub last_move: Option<Pos>,
    pub move_history: Vec<(Pos, Stone)>,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub suggested_move: Option<Pos>,
    pub message: Option<String>,

    config: GameConfig,
    /// Engine for blocking AI moves and hints; background moves build their own
    engine: AIEngine,
}

impl GameState {
    pub fn new(config: GameConfig, mode: GameMode) -> Self {
        Self {
            board: Board::new(config.board_size),
            mode,
            current_turn: Stone::Black,
            game_over: None,
            last_move: None,
            move_history: Vec::new(),
            last_ai_result: None,
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            suggested_move: None,
            message: None,
            engine: AIEngine::with_config(config.tt_size_mb, config.ai_depth, config.ai_time_limit_ms),
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Clear the board and start over in the current mode
    pub fn reset(&mut self) {
        self.board.clear();
        self.current_turn = Stone::Black;
        self.game_over = None;
        self.last_move = None;
        self.move_history.clear();
        self.last_ai_result = None;
        self.ai_state = AiState::Idle;
        self.move_timer = MoveTimer::default();
        self.suggested_move = None;
        self.message = None;
        self.engine.clear_cache();
        info!(mode = %self.mode, size = %self.board.board_size(), "New game");
    }

    /// Start over in another mode
    pub fn new_game(&mut self, mode: GameMode) {
        self.mode = mode;
        self.reset();
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human_color } => self.current_turn == human_color,
            GameMode::PvP => true,
        }
    }

    /// Check if it's the AI's turn
    pub fn is_ai_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human_color } => self.current_turn != human_color,
            GameMode::PvP => false,
        }
    }

    /// Check if AI is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Check if a background hint search is running
    pub fn is_hinting(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { task: AiTask::Hint, .. })
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over.is_some()
    }

    /// Attempt to place a stone for the human player
    pub fn try_place_stone(&mut self, pos: Pos) -> Result<(), MoveError> {
        if self.game_over.is_some() {
            return Err(MoveError::GameOver);
        }
        if self.is_ai_thinking() {
            return Err(MoveError::AiThinking);
        }
        if !self.is_human_turn() {
            return Err(MoveError::NotYourTurn);
        }
        if !self.board.contains(pos.row as i32, pos.col as i32) {
            return Err(MoveError::OutOfBounds {
                row: pos.row as i32,
                col: pos.col as i32,
            });
        }
        if !self.board.is_empty(pos) {
            return Err(MoveError::Occupied(pos));
        }

        self.execute_move(pos);
        Ok(())
    }

    /// Execute a move (for both human and AI)
    fn execute_move(&mut self, pos: Pos) {
        let color = self.current_turn;

        self.board.place_stone(pos, color);
        self.move_history.push((pos, color));
        self.last_move = Some(pos);
        self.suggested_move = None;
        self.move_timer.stop();

        debug!(
            color = color.name(),
            pos = %format_pos(pos, self.board.board_size()),
            moves = self.move_history.len(),
            "Stone placed"
        );

        if let Some(result) = self.check_result(pos, color) {
            match result.winner {
                Some(winner) => info!(winner = winner.name(), moves = self.move_history.len(), "Game won"),
                None => info!(moves = self.move_history.len(), "Game drawn"),
            }
            self.game_over = Some(result);
            return;
        }

        self.current_turn = color.opponent();
        self.move_timer.start();
        self.message = None;
    }

    /// Win through the last move, or a draw when the board filled up
    fn check_result(&self, pos: Pos, color: Stone) -> Option<GameResult> {
        if let Some(line) = find_five_line_at_pos(&self.board, pos, color) {
            return Some(GameResult {
                winner: Some(color),
                win_type: WinType::FiveInRow,
                winning_line: Some(line),
            });
        }

        self.board.is_full().then_some(GameResult {
            winner: None,
            win_type: WinType::Draw,
            winning_line: None,
        })
    }

    fn ensure_ai_can_move(&self) -> Result<(), MoveError> {
        if self.game_over.is_some() {
            return Err(MoveError::GameOver);
        }
        if self.is_ai_thinking() {
            return Err(MoveError::AiThinking);
        }
        if !self.is_ai_turn() {
            return Err(MoveError::NotYourTurn);
        }
        Ok(())
    }

    /// Let the AI move on the calling thread
    pub fn play_ai_move(&mut self) -> Result<Pos, MoveError> {
        self.ensure_ai_can_move()?;

        let result = self.engine.get_move_with_stats(&self.board, self.current_turn);
        self.move_timer.set_ai_time(Duration::from_millis(result.time_ms));
        let best_move = result.best_move;
        self.last_ai_result = Some(result);

        let pos = best_move.ok_or(MoveError::NoMoveFound)?;
        self.execute_move(pos);
        Ok(pos)
    }

    /// Start AI thinking on a background thread. Does nothing unless the AI
    /// is due to move.
    pub fn start_ai_thinking(&mut self) {
        if self.ensure_ai_can_move().is_err() {
            return;
        }
        self.spawn_search(AiTask::Move, self.config.ai_depth, self.config.ai_time_limit_ms);
    }

    /// Start a hint search on a background thread. The suggestion is picked
    /// up by [`GameState::check_ai_result`].
    pub fn start_suggestion(&mut self) -> Result<(), MoveError> {
        if self.game_over.is_some() {
            return Err(MoveError::GameOver);
        }
        if self.is_ai_thinking() {
            return Err(MoveError::AiThinking);
        }
        self.suggested_move = None;
        self.spawn_search(AiTask::Hint, self.config.hint_depth, self.config.hint_time_limit_ms);
        Ok(())
    }

    fn spawn_search(&mut self, task: AiTask, depth: i8, time_limit_ms: u64) {
        let board = self.board.clone();
        let color = self.current_turn;
        let tt_size_mb = self.config.tt_size_mb;

        let (tx, rx) = channel();

        thread::spawn(move || {
            let mut engine = AIEngine::with_config(tt_size_mb, depth, time_limit_ms);
            let result = engine.get_move_with_stats(&board, color);
            if tx.send(result).is_err() {
                debug!(?task, "AI result discarded after the game changed");
            }
        });

        self.ai_state = AiState::Thinking {
            task,
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Check if AI has finished thinking. A finished move is played, a
    /// finished hint becomes the suggested move.
    pub fn check_ai_result(&mut self) {
        let result = match &self.ai_state {
            AiState::Thinking {
                task,
                receiver,
                start_time,
            } => match receiver.try_recv() {
                Ok(result) => Some((*task, result, start_time.elapsed())),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    warn!("AI thread ended without a result");
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        let Some((task, move_result, elapsed)) = result else {
            return;
        };

        self.ai_state = AiState::Idle;
        let best_move = move_result.best_move;
        self.last_ai_result = Some(move_result);

        match (task, best_move) {
            (AiTask::Move, Some(pos)) => {
                self.move_timer.set_ai_time(elapsed);
                self.execute_move(pos);
            }
            (AiTask::Hint, Some(pos)) => self.suggested_move = Some(pos),
            (_, None) => self.message = Some(MoveError::NoMoveFound.to_string()),
        }
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Suggest a move for the side to play with a quick search on the
    /// calling thread
    pub fn request_suggestion(&mut self) -> Result<Pos, MoveError> {
        if self.game_over.is_some() {
            return Err(MoveError::GameOver);
        }
        if self.is_ai_thinking() {
            return Err(MoveError::AiThinking);
        }

        self.engine.set_max_depth(self.config.hint_depth);
        self.engine.set_time_limit(self.config.hint_time_limit_ms);
        let result = self.engine.get_move_with_stats(&self.board, self.current_turn);
        self.engine.set_max_depth(self.config.ai_depth);
        self.engine.set_time_limit(self.config.ai_time_limit_ms);

        self.suggested_move = result.best_move;
        self.last_ai_result = Some(result);
        self.suggested_move.ok_or(MoveError::NoMoveFound)
    }

    /// Undo the last move. In PvE the AI reply is taken back together with
    /// the human move so the human is to play again. Returns the number of
    /// stones removed.
    pub fn undo(&mut self) -> Result<usize, MoveError> {
        if self.is_ai_thinking() {
            return Err(MoveError::AiThinking);
        }

        let human_color = match self.mode {
            GameMode::PvE { human_color } => Some(human_color),
            GameMode::PvP => None,
        };
        let has_human_move = match human_color {
            Some(color) => self.move_history.iter().any(|&(_, c)| c == color),
            None => !self.move_history.is_empty(),
        };
        if !has_human_move {
            return Err(MoveError::NothingToUndo);
        }

        let mut removed = 0;
        while let Some((pos, color)) = self.move_history.pop() {
            self.board.remove_stone(pos);
            self.current_turn = color;
            removed += 1;
            if human_color.map_or(true, |h| h == color) {
                break;
            }
        }

        self.last_move = self.move_history.last().map(|&(pos, _)| pos);
        self.game_over = None;
        self.suggested_move = None;
        self.message = None;
        self.move_timer.start();

        debug!(removed, moves = self.move_history.len(), "Undo");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(size: usize) -> GameConfig {
        GameConfig::new(size)
            .unwrap()
            .with_ai_depth(2)
            .with_ai_time_limit(100)
            .with_hint(1, 50)
            .with_tt_size(1)
    }

    fn pve() -> GameState {
        GameState::new(config(10), GameMode::default())
    }

    fn pvp() -> GameState {
        GameState::new(config(10), GameMode::PvP)
    }

    #[test]
    fn test_new_game_state() {
        let state = pve();
        assert_eq!(state.board.size(), 10);
        assert_eq!(state.current_turn, Stone::Black);
        assert!(state.is_human_turn());
        assert!(!state.is_ai_turn());
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_pvp_turns_alternate() {
        let mut state = pvp();
        state.try_place_stone(Pos::new(4, 4)).unwrap();
        assert_eq!(state.current_turn, Stone::White);
        assert!(state.is_human_turn());
        state.try_place_stone(Pos::new(4, 5)).unwrap();
        assert_eq!(state.current_turn, Stone::Black);
        assert_eq!(state.board.get(Pos::new(4, 5)), Stone::White);
        assert_eq!(state.last_move, Some(Pos::new(4, 5)));
    }

    #[test]
    fn test_rejected_moves() {
        let mut state = pve();
        assert_eq!(
            state.try_place_stone(Pos::new(10, 3)),
            Err(MoveError::OutOfBounds { row: 10, col: 3 })
        );
        state.try_place_stone(Pos::new(4, 4)).unwrap();
        // AI's turn now
        assert_eq!(state.try_place_stone(Pos::new(5, 5)), Err(MoveError::NotYourTurn));

        let mut state = pvp();
        state.try_place_stone(Pos::new(4, 4)).unwrap();
        assert_eq!(
            state.try_place_stone(Pos::new(4, 4)),
            Err(MoveError::Occupied(Pos::new(4, 4)))
        );
        assert_eq!(state.move_history.len(), 1);
    }

    #[test]
    fn test_five_in_row_ends_game() {
        let mut state = pvp();
        for i in 0..4 {
            state.try_place_stone(Pos::new(2, i)).unwrap();
            state.try_place_stone(Pos::new(6, i)).unwrap();
        }
        state.try_place_stone(Pos::new(2, 4)).unwrap();

        let result = state.game_over.unwrap();
        assert_eq!(result.winner, Some(Stone::Black));
        assert_eq!(result.win_type, WinType::FiveInRow);
        assert_eq!(
            result.winning_line,
            Some([
                Pos::new(2, 0),
                Pos::new(2, 1),
                Pos::new(2, 2),
                Pos::new(2, 3),
                Pos::new(2, 4)
            ])
        );
        assert_eq!(state.try_place_stone(Pos::new(6, 4)), Err(MoveError::GameOver));
    }

    #[test]
    fn test_full_board_is_draw() {
        let mut state = GameState::new(config(5), GameMode::PvP);
        let rows = ["BBWWB", "WWBBW", "BBWWB", "WWBBW", "BBWWB"];
        let mut black = Vec::new();
        let mut white = Vec::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                let pos = Pos::new(r as u8, c as u8);
                if ch == 'B' {
                    black.push(pos);
                } else {
                    white.push(pos);
                }
            }
        }
        for i in 0..black.len() {
            state.try_place_stone(black[i]).unwrap();
            if let Some(&w) = white.get(i) {
                state.try_place_stone(w).unwrap();
            }
        }

        let result = state.game_over.unwrap();
        assert_eq!(result.winner, None);
        assert_eq!(result.win_type, WinType::Draw);
    }

    #[test]
    fn test_play_ai_move_blocking() {
        let mut state = pve();
        assert_eq!(state.play_ai_move(), Err(MoveError::NotYourTurn));
        state.try_place_stone(Pos::new(4, 4)).unwrap();

        let pos = state.play_ai_move().unwrap();
        assert_eq!(state.board.get(pos), Stone::White);
        assert_eq!(state.current_turn, Stone::Black);
        assert!(state.last_ai_result.is_some());
    }

    #[test]
    fn test_ai_moves_first_as_black() {
        let mut state = GameState::new(
            config(10),
            GameMode::PvE {
                human_color: Stone::White,
            },
        );
        assert!(state.is_ai_turn());
        assert_eq!(state.play_ai_move(), Ok(Pos::new(4, 4)));
        assert!(state.is_human_turn());
    }

    #[test]
    fn test_background_ai_thinking() {
        let mut state = pve();
        state.try_place_stone(Pos::new(4, 4)).unwrap();
        state.start_ai_thinking();
        assert!(state.is_ai_thinking());
        assert!(!state.is_hinting());
        assert_eq!(state.try_place_stone(Pos::new(0, 0)), Err(MoveError::AiThinking));

        wait_for_ai(&mut state);

        assert!(!state.is_ai_thinking());
        assert_eq!(state.move_history.len(), 2);
        assert_eq!(state.current_turn, Stone::Black);
    }

    #[test]
    fn test_suggestion() {
        let mut state = pvp();
        state.try_place_stone(Pos::new(4, 4)).unwrap();
        let hint = state.request_suggestion().unwrap();
        assert!(state.board.is_empty(hint));
        assert_eq!(state.suggested_move, Some(hint));

        state.try_place_stone(hint).unwrap();
        assert_eq!(state.suggested_move, None);
    }

    fn wait_for_ai(state: &mut GameState) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while state.is_ai_thinking() && Instant::now() < deadline {
            state.check_ai_result();
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_background_suggestion() {
        let mut state = pve();
        state.try_place_stone(Pos::new(4, 4)).unwrap();
        state.play_ai_move().unwrap();
        let history = state.move_history.len();

        state.start_suggestion().unwrap();
        assert!(state.is_hinting());
        assert_eq!(state.start_suggestion(), Err(MoveError::AiThinking));
        assert_eq!(state.undo(), Err(MoveError::AiThinking));

        wait_for_ai(&mut state);

        assert!(!state.is_hinting());
        let hint = state.suggested_move.unwrap();
        assert!(state.board.is_empty(hint));
        // Shown, not played
        assert_eq!(state.move_history.len(), history);
        assert_eq!(state.current_turn, Stone::Black);
    }

    #[test]
    fn test_undo_pve_removes_pair() {
        let mut state = pve();
        assert_eq!(state.undo(), Err(MoveError::NothingToUndo));

        state.try_place_stone(Pos::new(4, 4)).unwrap();
        state.play_ai_move().unwrap();
        assert_eq!(state.undo(), Ok(2));
        assert!(state.board.is_board_empty());
        assert_eq!(state.current_turn, Stone::Black);
        assert_eq!(state.last_move, None);
    }

    #[test]
    fn test_undo_after_win() {
        let mut state = pvp();
        for i in 0..4 {
            state.try_place_stone(Pos::new(2, i)).unwrap();
            state.try_place_stone(Pos::new(6, i)).unwrap();
        }
        state.try_place_stone(Pos::new(2, 4)).unwrap();
        assert!(state.is_game_over());

        assert_eq!(state.undo(), Ok(1));
        assert!(!state.is_game_over());
        assert_eq!(state.current_turn, Stone::Black);
        assert_eq!(state.last_move, Some(Pos::new(6, 3)));
    }

    #[test]
    fn test_new_game_switches_mode() {
        let mut state = pvp();
        state.try_place_stone(Pos::new(1, 1)).unwrap();
        state.new_game(GameMode::PvE {
            human_color: Stone::White,
        });
        assert!(state.board.is_board_empty());
        assert!(state.move_history.is_empty());
        assert!(state.is_ai_turn());
    }
}
