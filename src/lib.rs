//! widgrid
//!
//! Windowed grid of live-updating widgets. Only the cells near the viewport
//! are realized; value updates for everything else are stored without
//! touching the layout.
//!
//! The crate follows a Pure Core / Impure Shell split: `model`, `parser`,
//! `view_state` and `state` are headless and deterministic; `source`,
//! `logging` and `view` own threads, files and the terminal.

pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;

// Re-export main loop integration
pub mod integration;
