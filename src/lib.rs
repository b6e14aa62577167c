//! NBA per-game player statistics explorer.
//!
//! The library holds the whole load → clean → filter → export / chart
//! pipeline; the `hoops-explorer` binary wraps it in an egui window.

pub mod app;
pub mod charts;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;
