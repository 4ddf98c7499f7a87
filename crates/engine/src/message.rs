use crate::{Config, Lesson, Topic};
use std::{fmt, sync::Arc};

/// Engine messages
pub enum Message {
    /// Configuration message  UI --> Engine
    Config {
        config: Box<dyn Config + Send + 'static>,
    },
    /// Select a topic  UI --> Engine
    SelectTopic {
        /// the chosen topic
        topic: Topic,
    },
    /// Retry the failed topic  UI --> Engine
    Retry,
    /// No topic chosen yet  UI <-- Engine
    Idle,
    /// A lesson is being generated  UI <-- Engine
    Loading {
        /// the topic being fetched
        topic: Topic,
    },
    /// Show a lesson  UI <-- Engine
    ShowLesson {
        /// the topic of the lesson
        topic: Topic,
        /// the lesson
        lesson: Arc<Lesson>,
    },
    /// Loading a lesson failed  UI <-- Engine
    Error {
        /// the topic that failed
        topic: Topic,
        /// the user-facing message
        error: String,
    },
    /// Quit   UI <-> Engine
    Quit,
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Config { .. } => write!(f, "Config"),
            Message::SelectTopic { topic } => write!(f, "SelectTopic({topic})"),
            Message::Retry => write!(f, "Retry"),
            Message::Idle => write!(f, "Idle"),
            Message::Loading { topic } => write!(f, "Loading({topic})"),
            Message::ShowLesson { topic, lesson } => {
                write!(f, "ShowLesson({topic}, {:?})", lesson.title)
            }
            Message::Error { topic, error } => write!(f, "Error({topic}, {error:?})"),
            Message::Quit => write!(f, "Quit"),
        }
    }
}
