use engine::Message;

/// Errors generated from this crate
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParsing(#[from] serde_yaml::Error),

    /// Tokio Channel error
    #[error("Tokio Channel error: {0}")]
    TokioChannel(#[from] tokio::sync::mpsc::error::SendError<Message>),

    /// Engine error
    #[error(transparent)]
    Engine(#[from] engine::Error),

    /// Project directories error
    #[error("Project directories error: {0}")]
    ProjectDirs(String),

    /// Export requested without a lesson on screen
    #[error("No lesson to export")]
    NoLesson,
}
