use engine::Topic;

/// UI events
#[derive(Clone, Debug)]
pub enum Event {
    /// quit the application
    Quit,
    /// show the log popup
    ShowLog,
    /// close the currently shown popup
    Back,
    /// ask the engine for a topic
    SelectTopic(Topic),
    /// ask the engine to retry the failed topic
    Retry,
    /// export the lesson on screen
    Export,
}
