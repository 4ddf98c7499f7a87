/// the terminal user interface
pub mod tui;
