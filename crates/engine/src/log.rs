use crate::Error;
use std::{
    fmt::{self, Write as _},
    fs::{File, OpenOptions},
    io::Write,
    path::Path,
    sync::Mutex,
};
use tokio::sync::mpsc::{self, Receiver, Sender};
use tracing::{
    field::{Field, Visit},
    Event, Subscriber,
};
use tracing_subscriber::{
    filter::EnvFilter, layer::Context, prelude::*, registry::LookupSpan, Layer,
};

/// How many lines the UI may lag behind before lines are dropped
const BACKLOG: usize = 64;

// Tracing layer that mirrors every event to the log file and the UI
struct MpscLayer {
    sender: Sender<String>,
    file: Option<Mutex<File>>,
}

// Collects the message and any extra fields of an event
#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: String,
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

impl<S> Layer<S> for MpscLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let level = *event.metadata().level();
        let msg = format!("[{}]: {}{}", level, visitor.message, visitor.fields);

        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let _ = writeln!(f, "{msg}");
                let _ = f.flush();
            }
        }

        // a full channel drops the line rather than block the caller
        let _ = self.sender.try_send(msg);
    }
}

/// Tracing logger that filters log events, writes them to a file and feeds them over an mpsc
/// channel for the TUI log popup.
pub struct Log;

impl Log {
    /// Installs the global subscriber and returns the receiver for formatted log lines. The
    /// filter comes from `RUST_LOG`. Passing no path disables the log file.
    pub fn init<P: AsRef<Path>>(path: Option<P>) -> Result<Receiver<String>, Error> {
        let (sender, receiver) = mpsc::channel(BACKLOG);
        let file = match path {
            Some(path) => Some(Mutex::new(
                OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .open(path)?,
            )),
            None => None,
        };

        let filter = EnvFilter::from_default_env();
        let layer = MpscLayer { sender, file }.with_filter(filter);

        tracing_subscriber::registry()
            .with(layer)
            .try_init()
            .map_err(|e| Error::Logger(e.to_string()))?;

        Ok(receiver)
    }
}
