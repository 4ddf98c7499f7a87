pub mod events;
pub use events::Event;

pub mod ui;
pub use ui::Ui;

pub mod screens;
pub use screens::{EventHandler, Popups};

pub mod widgets;
