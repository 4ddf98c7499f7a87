/// Errors generated from this crate
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API key not found: configure the API_KEY environment variable")]
    MissingCredential,

    #[error("Empty response from the generative content API")]
    EmptyResponse,

    #[error("Malformed lesson response: {0}")]
    MalformedResponse(String),

    #[error("Network failure: {0}")]
    NetworkFailure(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unknown topic: {0}")]
    UnknownTopic(String),

    #[error("Invalid state change from {0} via {1}")]
    InvalidStateChange(String, String),

    #[error("Logger error: {0}")]
    Logger(String),

    #[error("UI Channel Closed")]
    UiChannelClosed,
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::NetworkFailure(err.to_string())
    }
}
