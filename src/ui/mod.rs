//! GUI module for the Gomoku game
//!
//! This module provides a native Rust GUI using egui/eframe.

mod app;
mod board_view;
mod theme;

pub use app::GomokuApp;

use crate::config::GameConfig;
use crate::error::GomokuError;
use crate::launcher::FrontEnd;

/// Window front-end: one `eframe` native window running a [`GomokuApp`]
pub struct GraphicalFrontEnd {
    config: GameConfig,
}

impl FrontEnd for GraphicalFrontEnd {
    const NAME: &'static str = "graphical";

    fn construct(board_size: usize) -> Result<Self, GomokuError> {
        Ok(Self {
            config: GameConfig::new(board_size)?,
        })
    }

    fn run(self) -> Result<(), GomokuError> {
        let config = self.config;
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1000.0, 750.0])
                .with_min_inner_size([800.0, 600.0])
                .with_title(format!("Gomoku {}", config.board_size)),
            ..Default::default()
        };

        eframe::run_native(
            "Gomoku",
            options,
            Box::new(move |_cc| Ok(Box::new(GomokuApp::new(config)))),
        )
        .map_err(|e| GomokuError::Gui(e.to_string()))
    }
}
