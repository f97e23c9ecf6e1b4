//! Console front-end
//!
//! A line-oriented session on stdin/stdout using `rustyline` for editing and
//! history. Moves are typed as coordinates such as `E5`.

mod command;
mod render;
mod session;

pub use command::{parse_command, Command, CommandError};
pub use render::{render_board, render_help, render_result};
pub use session::{Flow, TextSession};

use std::io::{self, Write};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use crate::config::GameConfig;
use crate::error::GomokuError;
use crate::launcher::FrontEnd;

pub struct TextFrontEnd {
    session: TextSession,
}

impl FrontEnd for TextFrontEnd {
    const NAME: &'static str = "text";

    fn construct(board_size: usize) -> Result<Self, GomokuError> {
        let config = GameConfig::new(board_size)?;
        Ok(Self {
            session: TextSession::new(config),
        })
    }

    fn run(mut self) -> Result<(), GomokuError> {
        let mut editor = DefaultEditor::new().map_err(|e| GomokuError::Terminal(e.to_string()))?;
        let mut out = io::stdout();

        self.session.start(&mut out)?;

        loop {
            out.flush()?;
            match editor.readline(&self.session.prompt()) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = editor.add_history_entry(line.as_str());
                    }
                    if self.session.handle_line(&line, &mut out)? == Flow::Quit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                    debug!("Input closed");
                    writeln!(out, "\nGoodbye!")?;
                    break;
                }
                Err(e) => return Err(GomokuError::Terminal(e.to_string())),
            }
        }

        Ok(())
    }
}
