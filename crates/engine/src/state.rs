use crate::{Lesson, Topic};
use std::sync::Arc;

// The state machine for the engine
//
//      ┌─────┐
//      │ Nil │
//      └──┬──┘
//      <Config>
//         ├──────[no start topic]──────┐
//         │                            ▼
//         │                        ┌──────┐
//  [start topic]                   │ Idle │
//         │                        └──┬───┘
//         │                    <SelectTopic>
//         ▼                           │
//  ┌─────────────────┐                │
//  │ Loading (topic) │◄───────────────┘
//  └──┬───────────┬──┘◄──────<SelectTopic [other topic]>──────┐
//     │           │  ▲                                        │
// [success]  [failure]└─────<Retry>──────┐                    │
//     ▼           ▼                      │                    │
//  ┌──────────────────────┐    ┌─────────┴────────────────┐   │
//  │ Ready (topic,lesson) │    │ Failed (topic, message)  ├───┤
//  └──────────┬───────────┘    └──────────────────────────┘   │
//             └───────────────────────────────────────────────┘
//
// Every transition into Loading takes a new request token. A fetch result is only applied while
// the engine is Loading under the token the fetch was started with.

/// the engine state
#[derive(Clone, Debug, Default)]
pub enum State {
    /// unconfigured
    #[default]
    Nil,
    /// no topic selected yet
    Idle,
    /// waiting for the lesson of a topic
    Loading { topic: Topic },
    /// showing a lesson
    Ready { topic: Topic, lesson: Arc<Lesson> },
    /// the last fetch failed
    Failed { topic: Topic, message: String },
    /// quit
    Quit,
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            State::Nil => write!(f, "Nil"),
            State::Idle => write!(f, "Idle"),
            State::Loading { topic } => write!(f, "Loading({topic})"),
            State::Ready { topic, .. } => write!(f, "Ready({topic})"),
            State::Failed { topic, .. } => write!(f, "Failed({topic})"),
            State::Quit => write!(f, "Quit"),
        }
    }
}
