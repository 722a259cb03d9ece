//! Application configuration
//!
//! Static configuration is loaded once at startup from an optional TOML
//! file, then overridden by environment variables. Access goes through
//! [`get_config`]; the instance is process-wide and immutable.

mod r#impl;
mod structs;

pub use r#impl::{get_config, init_config};
pub use structs::{AppConfig, LoggingConfig, ServerConfig, StorageConfig};
