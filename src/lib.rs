pub mod app;
pub mod catalog;
pub mod config;
pub mod form;
pub mod presets;
pub mod prompt;
pub mod shared;
pub mod tui;
