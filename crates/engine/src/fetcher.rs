use crate::{prompt, Error, Lesson, Topic};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// The default randomness setting, low so the output follows the prompt closely
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// A request for generated lesson content
#[derive(Clone, Debug)]
pub struct Request {
    /// the topic the prompt was built for
    pub topic: Topic,
    /// the natural-language prompt
    pub prompt: String,
    /// the output-shape constraint
    pub schema: Value,
    /// the randomness setting
    pub temperature: f32,
}

/// The seam between the fetcher and a generative content service
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Send one request and return the generated text, or None if the service produced no text
    async fn generate(&self, api_key: &str, request: &Request) -> Result<Option<String>, Error>;
}

/// Fetches whole lessons for topics. Cloning is cheap and clones share the backend.
#[derive(Clone)]
pub struct Fetcher {
    backend: Arc<dyn Backend>,
    api_key: Option<String>,
    temperature: f32,
}

impl Fetcher {
    /// Create a fetcher without a credential
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            api_key: None,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Set the credential used for every request
    pub fn set_api_key(&mut self, api_key: Option<String>) {
        self.api_key = api_key;
    }

    /// Set the randomness setting
    pub fn set_temperature(&mut self, temperature: f32) {
        self.temperature = temperature;
    }

    /// Build the request for a topic
    pub fn request(&self, topic: Topic) -> Request {
        Request {
            topic,
            prompt: prompt::build(topic),
            schema: Lesson::schema(),
            temperature: self.temperature,
        }
    }

    /// Fetch the lesson for a topic. Fails with `MissingCredential` before touching the network
    /// when no key is set.
    pub async fn fetch(&self, topic: Topic) -> Result<Lesson, Error> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(Error::MissingCredential)?;

        let request = self.request(topic);
        info!("(engine) requesting lesson for topic {}", topic);

        let text = self
            .backend
            .generate(api_key, &request)
            .await?
            .ok_or(Error::EmptyResponse)?;

        let lesson = Lesson::from_json(&text)?;
        if lesson.examples.len() != prompt::EXAMPLE_COUNT {
            warn!(
                "(engine) lesson for {} has {} examples, asked for {}",
                topic,
                lesson.examples.len(),
                prompt::EXAMPLE_COUNT
            );
        }
        Ok(lesson)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    /// replies with fixed text and records what it was asked
    struct Canned {
        reply: Option<String>,
        calls: AtomicUsize,
        last: Mutex<Option<(String, Request)>>,
    }

    impl Canned {
        fn new(reply: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.map(str::to_string),
                calls: AtomicUsize::new(0),
                last: Mutex::new(None),
            })
        }
    }

    #[async_trait::async_trait]
    impl Backend for Canned {
        async fn generate(
            &self,
            api_key: &str,
            request: &Request,
        ) -> Result<Option<String>, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some((api_key.to_string(), request.clone()));
            Ok(self.reply.clone())
        }
    }

    fn fetcher(backend: Arc<Canned>, key: Option<&str>) -> Fetcher {
        let mut fetcher = Fetcher::new(backend);
        fetcher.set_api_key(key.map(str::to_string));
        fetcher
    }

    const VALID: &str =
        r#"{"title":"T","introduction":"I","keyConcepts":["a","b"],"examples":[]}"#;

    #[tokio::test]
    async fn test_missing_credential_fails_before_network() {
        let backend = Canned::new(Some(VALID));
        let err = fetcher(backend.clone(), None)
            .fetch(Topic::Oop)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingCredential));
        assert!(err.to_string().contains("API"));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_blank_credential_is_missing() {
        let backend = Canned::new(Some(VALID));
        let err = fetcher(backend.clone(), Some("  "))
            .fetch(Topic::Api)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingCredential));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_no_text_is_empty_response() {
        let err = fetcher(Canned::new(None), Some("key"))
            .fetch(Topic::Oop)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::EmptyResponse));

        let err = fetcher(Canned::new(Some("")), Some("key"))
            .fetch(Topic::Oop)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::EmptyResponse));
    }

    #[tokio::test]
    async fn test_bad_json_is_malformed() {
        let err = fetcher(Canned::new(Some("{\"title\":\"T\"}")), Some("key"))
            .fetch(Topic::Oop)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_request_carries_prompt_schema_and_key() {
        let backend = Canned::new(Some(VALID));
        let lesson = fetcher(backend.clone(), Some("secret"))
            .fetch(Topic::Api)
            .await
            .unwrap();
        assert_eq!(lesson.key_concepts, vec!["a", "b"]);

        let (key, request) = backend.last.lock().unwrap().clone().unwrap();
        assert_eq!(key, "secret");
        assert_eq!(request.topic, Topic::Api);
        assert!(request.prompt.contains(prompt::title(Topic::Api)));
        assert_eq!(request.schema, Lesson::schema());
        assert_eq!(request.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_backend_error_propagates() {
        struct Down;

        #[async_trait::async_trait]
        impl Backend for Down {
            async fn generate(&self, _: &str, _: &Request) -> Result<Option<String>, Error> {
                Err(Error::NetworkFailure("connection refused".to_string()))
            }
        }

        let mut fetcher = Fetcher::new(Arc::new(Down));
        fetcher.set_api_key(Some("key".to_string()));
        assert!(matches!(
            fetcher.fetch(Topic::Oop).await,
            Err(Error::NetworkFailure(_))
        ));
    }
}
