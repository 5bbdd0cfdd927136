pub mod config;
pub mod logging;
pub mod session;
pub mod utils;
pub mod views;

pub use config::{AppConfig, ConfigError, DisplayConfig};
pub use session::{Session, render_batch};
