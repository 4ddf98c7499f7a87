/// the engine configuration
pub mod config;
pub use config::Config;

/// the lesson engine
pub mod engine;
pub use engine::{Engine, FAILURE_MESSAGE};

/// the errors this crate can produce
pub mod error;
pub use error::Error;

/// the lesson fetcher and its backend seam
pub mod fetcher;
pub use fetcher::{Backend, Fetcher, Request};

/// the Gemini backend
pub mod gemini;
pub use gemini::Gemini;

/// the lesson model
pub mod lesson;
pub use lesson::{Example, Lesson};

/// the engine log
pub mod log;
pub use log::Log;

/// the messages sent to/from the engine
pub mod message;
pub use message::Message;

/// the per-topic prompts
pub mod prompt;

/// the selectable topics
pub mod topic;
pub use topic::{Icon, MenuEntry, Topic, MENU};

/// the engine state
pub(crate) mod state;
pub(crate) use state::State;
