use crate::{Backend, Config, Error, Fetcher, Lesson, Message, State, Topic};
use std::sync::Arc;
use tokio::{
    select,
    sync::mpsc::{self, Receiver, Sender},
};
use tracing::{debug, error, info, warn};

/// The only failure text ever shown to the user
pub const FAILURE_MESSAGE: &str = "Não foi possível carregar o material didático. Verifique sua \
    conexão ou a chave de API.";

/// The outcome of one fetch, tagged with the request token it was started under
struct Completion {
    token: u64,
    topic: Topic,
    result: Result<Lesson, Error>,
}

/// The lesson engine
pub struct Engine {
    /// The channel from the UI
    from_ui: Receiver<Message>,
    /// The channel to the UI
    to_ui: Sender<Message>,
    /// Finished fetches
    from_fetches: Receiver<Completion>,
    /// Cloned into every fetch task
    to_engine: Sender<Completion>,
    /// The content fetcher
    fetcher: Fetcher,
    /// The engine state
    state: State,
    /// The token of the most recently started fetch
    token: u64,
}

impl Engine {
    /// Creates a new instance of the engine
    pub fn new(to_ui: Sender<Message>, from_ui: Receiver<Message>, backend: Arc<dyn Backend>) -> Self {
        info!("(engine) engine initialized");
        let (to_engine, from_fetches) = mpsc::channel(16);
        Engine {
            from_ui,
            to_ui,
            from_fetches,
            to_engine,
            fetcher: Fetcher::new(backend),
            state: State::Nil,
            token: 0,
        }
    }

    /// Runs the engine
    pub async fn run(&mut self) -> Result<(), Error> {
        loop {
            select! {
                biased;

                // Process messages from the UI
                msg = self.from_ui.recv() => {
                    let Some(msg) = msg else {
                        info!("(engine) UI channel closed");
                        return Ok(());
                    };
                    let changed = match msg {
                        Message::Config { config } => {
                            info!("(engine) Configuring engine with:");
                            info!("(engine) - credential present: {}", config.api_key().is_some());
                            info!("(engine) - temperature: {}", config.temperature());
                            info!("(engine) - start topic: {:?}", config.start_topic());
                            self.config(config)
                        }
                        Message::SelectTopic { topic } => {
                            info!("(engine) Selecting topic: {}", topic);
                            self.select_topic(topic)
                        }
                        Message::Retry => {
                            info!("(engine) Retrying");
                            self.retry()
                        }
                        Message::Quit => {
                            info!("(engine) Quitting engine");
                            self.state = State::Quit;
                            // the UI may already be gone
                            if self.send_message().await.is_err() {
                                debug!("(engine) UI closed before the quit acknowledgement");
                            }
                            return Ok(());
                        }
                        other => {
                            debug!("(engine) Ignoring message: {:?}", other);
                            Ok(false)
                        }
                    };

                    match changed {
                        Ok(true) => {
                            if self.send_message().await.is_err() {
                                info!("(engine) UI channel closed");
                                return Ok(());
                            }
                        }
                        Ok(false) => {}
                        Err(e) => warn!("(engine) {}", e),
                    }
                }
                // Process finished fetches
                Some(done) = self.from_fetches.recv() => {
                    if self.complete(done) && self.send_message().await.is_err() {
                        info!("(engine) UI channel closed");
                        return Ok(());
                    }
                }
            }
        }
    }

    /// send the current state to the UI
    async fn send_message(&self) -> Result<(), Error> {
        let msg = match &self.state {
            State::Nil => {
                info!("(engine) Tried sending message when in Nil");
                return Ok(());
            }
            State::Idle => Message::Idle,
            State::Loading { topic } => Message::Loading { topic: *topic },
            State::Ready { topic, lesson } => Message::ShowLesson {
                topic: *topic,
                lesson: lesson.clone(),
            },
            State::Failed { topic, message } => Message::Error {
                topic: *topic,
                error: message.clone(),
            },
            State::Quit => Message::Quit,
        };
        info!("(engine) Sending {:?}", msg);
        self.to_ui
            .send(msg)
            .await
            .map_err(|_| Error::UiChannelClosed)
    }

    /// config the engine
    fn config(&mut self, config: Box<dyn Config + Send + 'static>) -> Result<bool, Error> {
        // invariant: the engine is in the Nil state
        if !matches!(self.state, State::Nil) {
            return Err(Error::InvalidStateChange(
                self.state.to_string(),
                "config".to_string(),
            ));
        }

        self.fetcher.set_api_key(config.api_key());
        self.fetcher.set_temperature(config.temperature());

        match config.start_topic() {
            // Nil -> Loading
            Some(topic) => self.start_fetch(topic),
            // Nil -> Idle
            None => self.state = State::Idle,
        }
        Ok(true)
    }

    /// select a topic; reselecting the topic that is shown or loading is a no-op
    fn select_topic(&mut self, topic: Topic) -> Result<bool, Error> {
        match &self.state {
            State::Nil | State::Quit => Err(Error::InvalidStateChange(
                self.state.to_string(),
                "select_topic".to_string(),
            )),
            State::Ready { topic: current, .. } | State::Loading { topic: current }
                if *current == topic =>
            {
                info!("(engine) Topic {} already selected", topic);
                Ok(false)
            }
            _ => {
                self.start_fetch(topic);
                Ok(true)
            }
        }
    }

    /// retry the failed topic
    fn retry(&mut self) -> Result<bool, Error> {
        // invariant: the engine is in the Failed state
        if let State::Failed { topic, .. } = self.state {
            // Failed -> Loading
            self.start_fetch(topic);
            Ok(true)
        } else {
            Err(Error::InvalidStateChange(
                self.state.to_string(),
                "retry".to_string(),
            ))
        }
    }

    /// move to Loading under a new token and spawn the fetch
    fn start_fetch(&mut self, topic: Topic) {
        self.token = self.token.wrapping_add(1);
        self.state = State::Loading { topic };

        let token = self.token;
        let fetcher = self.fetcher.clone();
        let to_engine = self.to_engine.clone();
        debug!("(engine) Starting request {} for {}", token, topic);
        tokio::spawn(async move {
            let result = fetcher.fetch(topic).await;
            if to_engine
                .send(Completion {
                    token,
                    topic,
                    result,
                })
                .await
                .is_err()
            {
                debug!("(engine) Engine gone before request {} finished", token);
            }
        });
    }

    /// apply a finished fetch if it is still the latest; returns true if the state changed
    fn complete(&mut self, done: Completion) -> bool {
        let loading = matches!(self.state, State::Loading { topic } if topic == done.topic);
        if done.token != self.token || !loading {
            info!(
                "(engine) Discarding stale result for {} (request {}, current {})",
                done.topic, done.token, self.token
            );
            return false;
        }

        self.state = match done.result {
            // Loading -> Ready
            Ok(lesson) => {
                info!(
                    "(engine) Lesson for {} ready with {} examples",
                    done.topic,
                    lesson.examples.len()
                );
                State::Ready {
                    topic: done.topic,
                    lesson: Arc::new(lesson),
                }
            }
            // Loading -> Failed
            Err(e) => {
                error!("(engine) Failed to load lesson for {}: {}", done.topic, e);
                State::Failed {
                    topic: done.topic,
                    message: FAILURE_MESSAGE.to_string(),
                }
            }
        };
        true
    }
}
