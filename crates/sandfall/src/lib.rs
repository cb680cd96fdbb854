//! Headless runner for the Sandfall pixel simulation

pub mod app;
pub mod config;
pub mod scenario;
pub mod snapshot;

pub use app::{App, FixedTimestep};
pub use config::AppConfig;
