//! Utilities

pub mod config_store;

pub use config_store::{default_config_path, load_config, save_config};
