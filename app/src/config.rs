use crate::Error;
use directories::ProjectDirs;
use engine::{fetcher::DEFAULT_TEMPERATURE, gemini, Topic};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    path::{Path, PathBuf},
};
use tracing::info;

/// The variable consulted when the configured one is unset
const FALLBACK_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Represents the application configuration
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// the topic selected at startup, none shows the landing screen
    start_topic: Option<Topic>,
    /// the generative model name
    model: String,
    /// the REST endpoint of the generative API
    endpoint: String,
    /// the randomness setting sent with every request
    temperature: f32,
    /// the environment variable holding the API key
    api_key_env: String,
    #[serde(skip)]
    data_dir: PathBuf,
    #[serde(skip)]
    api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_topic: Some(Topic::Oop),
            model: gemini::DEFAULT_MODEL.to_string(),
            endpoint: gemini::DEFAULT_ENDPOINT.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            api_key_env: "API_KEY".to_string(),
            data_dir: PathBuf::new(),
            api_key: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("start_topic", &self.start_topic)
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("temperature", &self.temperature)
            .field("api_key_env", &self.api_key_env)
            .field("data_dir", &self.data_dir)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Config {
    /// Load the Config from a file, creating it if necessary
    pub fn load() -> Result<Self, Error> {
        // Get the application data directory
        let project_dirs = ProjectDirs::from("io", "pyguide", "pyguide").ok_or_else(|| {
            Error::ProjectDirs("Could not determine project directories".to_string())
        })?;

        // create the data directory if needed
        let data_dir = project_dirs.data_dir().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;

        // create the config directory if needed
        let config_dir = project_dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;

        // Load the config from a file or create a new one
        let config_path = config_dir.join("config.yaml");
        let mut config = if config_path.exists() {
            info!("Loading config from: {}", config_path.display());
            Self::from_yaml(&std::fs::read_to_string(&config_path)?)?
        } else {
            info!("Writing default config to: {}", config_path.display());
            let config = Config::default();
            serde_yaml::to_writer(std::fs::File::create(&config_path)?, &config)?;
            config
        };

        config.data_dir = data_dir;
        config.api_key = api_key_from(&config.api_key_env, |name| std::env::var(name).ok());
        info!("Start topic: {:?}", config.start_topic);
        info!("Model: {} at {}", config.model, config.endpoint);
        Ok(config)
    }

    /// Parse the config file contents; missing fields take their defaults
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Override the startup topic
    pub fn set_start_topic(&mut self, topic: Option<Topic>) {
        self.start_topic = topic;
    }

    /// Get the path to the application data directory
    pub fn data_dir(&self) -> &Path {
        self.data_dir.as_path()
    }

    /// Get the generative model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the generative API endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl engine::Config for Config {
    fn api_key(&self) -> Option<String> {
        self.api_key.clone()
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }

    fn start_topic(&self) -> Option<Topic> {
        self.start_topic
    }
}

/// Look up the API key under `name`, then under the fallback variable. Blank values count as
/// unset.
pub fn api_key_from<F>(name: &str, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    [name, FALLBACK_API_KEY_ENV]
        .into_iter()
        .filter_map(|var| lookup(var))
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}
