use crate::{
    export,
    ui::tui::{screens, Event as UiEvent, EventHandler, Popups},
    Config, Error,
};
use crossterm::event::{Event, EventStream, KeyCode};
use engine::Message;
use futures::{future::FutureExt, StreamExt};
use futures_timer::Delay;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget, DefaultTerminal};
use std::time::{Duration, Instant};
use tokio::{
    select,
    sync::mpsc::{Receiver, Sender},
};
use tracing::{error, info};

/// Tui implementation of the UI
pub struct Ui {
    /// The sender to the engine
    to_engine: Sender<Message>,
    /// The receiver from the engine
    from_engine: Receiver<Message>,
    /// The receiver from the logger
    from_logger: Receiver<String>,
    /// The configuration
    config: Config,
    /// show a popup
    show_popup: Option<Popups>,
    /// The log popup
    log_screen: screens::Log,
    /// The main screen
    guide_screen: screens::Guide,
}

impl Ui {
    /// Create a new UI
    pub fn new(
        to_engine: Sender<Message>,
        from_engine: Receiver<Message>,
        from_logger: Receiver<String>,
        config: Config,
    ) -> Self {
        Self {
            to_engine,
            from_engine,
            from_logger,
            config,
            show_popup: None,
            log_screen: screens::Log::default(),
            guide_screen: screens::Guide::new(),
        }
    }

    /// async run loop
    pub async fn run(&mut self) -> Result<(), Error> {
        // initialize the terminal
        let mut terminal = ratatui::init();
        let result = self.event_loop(&mut terminal).await;
        ratatui::restore();

        // Quit the engine
        info!("Quitting...");
        self.to_engine.send(Message::Quit).await?;

        result
    }

    async fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<(), Error> {
        // initialize the input event stream
        let mut reader = EventStream::new();

        // set our timeout to ~16.67 ms (60 FPS)
        let target_frame_duration = Duration::from_secs_f64(1.0 / 60.0);

        // initial timeout
        let mut timeout = Delay::new(target_frame_duration);

        // the UI event from input
        let mut input_event: Option<Event> = None;

        // the engine message received
        let mut engine_event: Option<Message> = None;

        // the logger message received
        let mut log_msg: Option<String> = None;

        // running
        let mut running = true;

        // send the config message to the engine
        self.to_engine
            .send(Message::Config {
                config: Box::new(self.config.clone()),
            })
            .await?;

        while running {
            let event = reader.next().fuse();

            // get the next events
            select! {
                maybe_event = event => {
                    match maybe_event {
                        Some(Ok(evt)) => {
                            input_event = Some(evt);
                        }
                        Some(Err(e)) => {
                            error!("Error reading event: {}", e);
                            running = false;
                        }
                        None => running = false,
                    }
                }
                Some(msg) = self.from_engine.recv() => {
                    engine_event = Some(msg);
                }
                Some(msg) = self.from_logger.recv() => {
                    log_msg = Some(msg);
                }
                _ = &mut timeout => {}
            }

            // time the actual work
            let start = Instant::now();

            // add log line
            if let Some(msg) = log_msg.take() {
                self.log_screen.add_message(msg);
            }

            // handle the engine event
            if let Some(msg) = engine_event.take() {
                self.on_message(&msg);
            }

            // handle the input event
            if let Some(evt) = input_event.take() {
                running = self.on_event(&evt).await;
            }

            // render the UI
            if let Err(e) = terminal.draw(|f| f.render_widget(&mut *self, f.area())) {
                error!("Error drawing UI: {e}");
            }

            // adjust the timeout for the next loop to account for the time spent doing work. this
            // is to maintain a constant frame rate of 60 FPS
            let elapsed = start.elapsed();
            let adjusted_timeout = if elapsed < target_frame_duration {
                target_frame_duration - elapsed
            } else {
                Duration::from_millis(1)
            };
            timeout = Delay::new(adjusted_timeout);
        }

        Ok(())
    }

    /// Handle messages from the engine
    pub fn on_message(&mut self, msg: &Message) {
        info!("Received message: {:?}", msg);
        self.guide_screen.on_message(msg);
    }

    /// Handle events from the input, returns false when the UI should stop
    pub async fn on_event(&mut self, evt: &Event) -> bool {
        // get the next ui_event if there is one
        let top = (&mut *self).handle_event(evt).await;
        let handled = match top {
            Ok(None) => match self.show_popup {
                Some(Popups::Log) => (&mut self.log_screen).handle_event(evt).await,
                None => (&mut self.guide_screen).handle_event(evt).await,
            },
            other => other,
        };

        let ui_event = match handled {
            Ok(Some(ui_event)) => ui_event,
            Ok(None) => return true,
            Err(e) => {
                error!("Error handling event: {e}");
                return true;
            }
        };

        match self.on_ui_event(ui_event).await {
            Ok(running) => running,
            Err(e) => {
                error!("Error handling UI event: {e}");
                true
            }
        }
    }

    /// Act on a UI event, returns false when the UI should stop
    async fn on_ui_event(&mut self, ui_event: UiEvent) -> Result<bool, Error> {
        match ui_event {
            UiEvent::Quit => return Ok(false),
            UiEvent::ShowLog => {
                info!("showing log popup");
                self.show_popup = Some(Popups::Log);
            }
            UiEvent::Back => {
                if self.show_popup.is_some() {
                    info!("closing popup");
                    self.show_popup = None;
                }
            }
            UiEvent::SelectTopic(topic) => {
                info!("Select topic: {}", topic);
                self.to_engine.send(Message::SelectTopic { topic }).await?;
            }
            UiEvent::Retry => {
                info!("Retry");
                self.to_engine.send(Message::Retry).await?;
            }
            UiEvent::Export => {
                let (topic, lesson) = self.guide_screen.lesson().ok_or(Error::NoLesson)?;
                let path = export::export(self.config.data_dir(), topic, &lesson)?;
                self.guide_screen
                    .set_notice(format!("Exportado para {}", path.display()));
                if let Err(e) = webbrowser::open(&path.to_string_lossy()) {
                    error!("Failed to open {}: {}", path.display(), e);
                }
            }
        }
        Ok(true)
    }
}

#[async_trait::async_trait]
impl EventHandler for &mut Ui {
    async fn handle_event(&mut self, evt: &Event) -> Result<Option<UiEvent>, Error> {
        match evt {
            Event::Key(key) => match key.code {
                // These key bindings work on every screen
                KeyCode::Char('q') | KeyCode::Char('Q') => {
                    info!("Quit");
                    Ok(Some(UiEvent::Quit))
                }
                KeyCode::Char('b') | KeyCode::Esc if self.show_popup.is_some() => {
                    Ok(Some(UiEvent::Back))
                }
                KeyCode::Char('`') => Ok(Some(UiEvent::ShowLog)),
                _ => Ok(None), // not handled at the top level
            },
            _ => {
                Ok(None) // not handled at the top level
            }
        }
    }
}

impl Widget for &mut Ui {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&mut self.guide_screen, area, buf);
        match self.show_popup {
            Some(Popups::Log) => {
                Widget::render(&mut self.log_screen, area, buf);
            }
            None => {}
        }
    }
}
