use anyhow::Result;
use clap::Parser;
use engine::{Engine, Gemini, Log, Message, Topic};
use pyguide::{ui::tui::Ui, Config};
use std::{path::PathBuf, sync::Arc};

/// A terminal guide that presents AI-generated Python lessons
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Where to write the log file
    #[arg(long, default_value = "log.txt")]
    log: PathBuf,

    /// The topic to open at startup (oop or api)
    #[arg(long, conflicts_with = "landing")]
    topic: Option<Topic>,

    /// Start on the landing screen instead of a topic
    #[arg(long)]
    landing: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // initialize the logger
    let from_logger = Log::init(Some(&args.log))?;

    // Load the configuration
    let mut config = Config::load()?;
    if args.landing {
        config.set_start_topic(None);
    } else if let Some(topic) = args.topic {
        config.set_start_topic(Some(topic));
    }

    // The generative API client
    let backend = Gemini::new(config.endpoint(), config.model())?;

    // Create the message channels
    let (to_engine, from_ui) = tokio::sync::mpsc::channel::<Message>(100);
    let (to_ui, from_engine) = tokio::sync::mpsc::channel::<Message>(100);

    // Initialize the engine
    let mut engine = Engine::new(to_ui, from_ui, Arc::new(backend));

    // Initialize the ui
    let mut ui = Ui::new(to_engine, from_engine, from_logger, config);

    // run the engine and ui side by side
    let engine_handle = tokio::spawn(async move { engine.run().await });
    let ui_handle = tokio::spawn(async move { ui.run().await });

    // Wait for the engine and ui to finish
    let (engine_result, ui_result) = tokio::try_join!(engine_handle, ui_handle)?;

    // Check for errors
    if let Err(e) = engine_result {
        eprintln!("Engine error: {}", e);
    }
    if let Err(e) = ui_result {
        eprintln!("UI error: {}", e);
    }

    Ok(())
}
