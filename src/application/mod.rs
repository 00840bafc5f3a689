pub mod app;
pub mod config;
pub mod screen;

pub use config::Config;
pub use screen::{Screen, ScreenError};
