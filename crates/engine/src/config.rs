use crate::Topic;

/// This is the trait for all configuration impls
pub trait Config: Send + Sync {
    /// Get the credential for the generative content API, if one was found
    fn api_key(&self) -> Option<String>;
    /// Get the randomness setting sent with every request
    fn temperature(&self) -> f32;
    /// Get the topic selected at startup. None starts on the landing screen
    fn start_topic(&self) -> Option<Topic>;
}
