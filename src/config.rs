//! Game configuration shared by both front-ends

use crate::board::BoardSize;
use crate::error::GomokuError;
use crate::game::GameMode;

/// Settings a front-end needs to start a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub board_size: BoardSize,
    /// Maximum alpha-beta depth for AI moves
    pub ai_depth: i8,
    /// Time budget for AI moves in milliseconds
    pub ai_time_limit_ms: u64,
    /// Hints use a shallower, faster search
    pub hint_depth: i8,
    pub hint_time_limit_ms: u64,
    /// Transposition table size for each engine, in megabytes
    pub tt_size_mb: usize,
    pub default_mode: GameMode,
}

impl GameConfig {
    pub const DEFAULT_AI_DEPTH: i8 = 4;
    pub const DEFAULT_AI_TIME_MS: u64 = 500;
    pub const DEFAULT_HINT_DEPTH: i8 = 3;
    pub const DEFAULT_HINT_TIME_MS: u64 = 200;
    pub const DEFAULT_TT_SIZE_MB: usize = 16;

    /// Validate `board_size` and fill in default AI settings.
    pub fn new(board_size: usize) -> Result<Self, GomokuError> {
        Ok(Self {
            board_size: BoardSize::try_from(board_size)?,
            ai_depth: Self::DEFAULT_AI_DEPTH,
            ai_time_limit_ms: Self::DEFAULT_AI_TIME_MS,
            hint_depth: Self::DEFAULT_HINT_DEPTH,
            hint_time_limit_ms: Self::DEFAULT_HINT_TIME_MS,
            tt_size_mb: Self::DEFAULT_TT_SIZE_MB,
            default_mode: GameMode::default(),
        })
    }

    #[must_use]
    pub fn with_ai_depth(mut self, depth: i8) -> Self {
        self.ai_depth = depth.max(1);
        self
    }

    #[must_use]
    pub fn with_ai_time_limit(mut self, time_ms: u64) -> Self {
        self.ai_time_limit_ms = time_ms;
        self
    }

    #[must_use]
    pub fn with_hint(mut self, depth: i8, time_ms: u64) -> Self {
        self.hint_depth = depth.max(1);
        self.hint_time_limit_ms = time_ms;
        self
    }

    #[must_use]
    pub fn with_tt_size(mut self, size_mb: usize) -> Self {
        self.tt_size_mb = size_mb;
        self
    }

    #[must_use]
    pub fn with_default_mode(mut self, mode: GameMode) -> Self {
        self.default_mode = mode;
        self
    }
}
