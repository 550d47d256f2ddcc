pub mod config;
pub mod format;

pub use config::{Config, ConfigError, load_registry, parse_registry};
