//! Startup front-end selection
//!
//! The first command-line argument picks the front-end: `--ui` starts the
//! text front-end, anything else (including nothing) opens the window.
//! Other arguments are ignored.

use std::ffi::OsStr;

use tracing::{debug, info};

use crate::error::GomokuError;
use crate::text::TextFrontEnd;
use crate::ui::GraphicalFrontEnd;

/// Board dimension every front-end is built with
pub const DEFAULT_BOARD_SIZE: usize = 10;

/// First-argument flag selecting the text front-end
pub const UI_FLAG: &str = "--ui";

/// Which front-end to start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Text,
    Graphical,
}

/// Settings resolved from the command line, consumed by [`launch_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchConfig {
    pub mode: Mode,
    pub board_size: usize,
}

impl LaunchConfig {
    /// Resolve the arguments that follow the program name. Never fails.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mode = match args.into_iter().next() {
            Some(first) if first.as_ref() == OsStr::new(UI_FLAG) => Mode::Text,
            _ => Mode::Graphical,
        };

        Self {
            mode,
            board_size: DEFAULT_BOARD_SIZE,
        }
    }
}

/// Capability shared by every front-end: build for a board size, then run
/// until the user leaves.
pub trait FrontEnd: Sized {
    const NAME: &'static str;

    fn construct(board_size: usize) -> Result<Self, GomokuError>;

    fn run(self) -> Result<(), GomokuError>;
}

/// Build exactly one front-end of the selected kind and hand control to it.
/// Whatever construction or `run` returns is passed through untouched.
pub fn launch_with<T, G>(config: LaunchConfig) -> Result<(), GomokuError>
where
    T: FrontEnd,
    G: FrontEnd,
{
    match config.mode {
        Mode::Text => start::<T>(config.board_size),
        Mode::Graphical => start::<G>(config.board_size),
    }
}

fn start<F: FrontEnd>(board_size: usize) -> Result<(), GomokuError> {
    debug!(front_end = F::NAME, board_size, "Constructing front-end");
    let front_end = F::construct(board_size)?;
    info!(front_end = F::NAME, board_size, "Running front-end");
    front_end.run()
}

/// Entry point used by the binary
pub fn launch<I, S>(args: I) -> Result<(), GomokuError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let config = LaunchConfig::from_args(args);
    info!(mode = ?config.mode, board_size = config.board_size, "Launch configuration");
    launch_with::<TextFrontEnd, GraphicalFrontEnd>(config)
}
