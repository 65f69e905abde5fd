//! Infrastructure layer - external adapters (database, filesystem).
//!
//! This layer handles all I/O operations and external dependencies.

pub mod config;
pub mod local_storage;

pub use config::{config_file_path, ensure_config_exists, load_config, render_config};
pub use local_storage::LocalStorage;
