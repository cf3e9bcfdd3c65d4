// Library surface shared by the binary and the headless integration tests.
pub mod app;
pub mod app_dirs;
pub mod classify;
pub mod config;
pub mod difficulty;
pub mod editor;
pub mod keymap;
pub mod logging;
pub mod runtime;
pub mod session;
pub mod stats;
pub mod text;
pub mod timer;
pub mod ui;
pub mod util;
