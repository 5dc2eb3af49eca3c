//! UI modules for the nearby map screen.

pub mod analysis;
pub mod app_shell;
pub mod constants;
pub mod controls;
pub mod map_pane;
pub mod results;
pub mod utils;
