pub mod cli;
pub mod document;
pub mod find_panel;
pub mod search;
pub mod utils;

/// Application name, used for window titles and the configuration directory
pub const APP_NAME: &str = "Quill";
