pub mod config;
pub use config::Config;
pub mod error;
pub use error::Error;
pub mod export;
pub mod ui;
