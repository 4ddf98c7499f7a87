pub mod guide;
pub use guide::Guide;
pub mod log;
pub use log::Log;

use crate::{ui::tui::Event as UiEvent, Error};
use crossterm::event::Event;

/// The popups
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Popups {
    Log,
}

/// The event handler trait
#[async_trait::async_trait]
pub trait EventHandler {
    /// Handle an event, returning the UI event it produced, if any
    async fn handle_event(&mut self, evt: &Event) -> Result<Option<UiEvent>, Error>;
}
