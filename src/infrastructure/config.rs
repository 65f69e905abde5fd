//! Configuration file management.
//!
//! Handles loading the TOML configuration and writing the commented default.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppConfig, AppError, Result};

/// Default configuration file content.
const DEFAULT_CONFIG: &str = r#"# Print Shop Configuration
# Auto-generated - edit as needed. Amounts are decimal strings.

[pricing]
# Single-sided, per page
bw_page = "1.50"
color_page = "4.00"

# Double-sided, per physical sheet
bw_sheet_double = "2.50"
color_sheet_double = "8.00"

# Paper surcharge per single-sided page (double-sided pages pay half)
premium_surcharge = "0.50"
glossy_surcharge = "1.00"

[delivery]
# Flat delivery fee below the free-delivery threshold
fee = "20.00"
free_threshold = "99.00"
default_location = "CUTM Bhubaneswar"

[paths]
# Custom data directory (optional, defaults to ~/.print-shop)
# data_dir = "/custom/path"
"#;

/// Get the path to the default configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    AppConfig::default_data_dir().join("config.toml")
}

/// Load configuration from `path`, or from the default location.
///
/// A missing file yields the built-in defaults.
///
/// # Errors
/// Returns error if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let config_path = path.map_or_else(config_file_path, Path::to_path_buf);

    if config_path.exists() {
        load_config_from_file(&config_path)
    } else {
        tracing::debug!(path = %config_path.display(), "No config file, using defaults");
        Ok(AppConfig::default())
    }
}

/// Load configuration from a specific file.
///
/// # Errors
/// Returns error if file cannot be read or parsed.
pub fn load_config_from_file(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Failed to read config file: {}", path.display()), e))?;

    let config = toml::from_str(&content).map_err(|e| AppError::Config {
        message: format!("Failed to parse config file: {e}"),
    })?;

    tracing::debug!(path = %path.display(), "Loaded configuration");

    Ok(config)
}

/// Create the default configuration file at `path` if it doesn't exist.
///
/// Returns whether a file was written.
///
/// # Errors
/// Returns error if file cannot be created.
pub fn ensure_config_exists(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::io("Failed to create config directory", e))?;
    }

    fs::write(path, DEFAULT_CONFIG)
        .map_err(|e| AppError::io("Failed to create default config", e))?;

    tracing::info!(path = %path.display(), "Created default configuration");

    Ok(true)
}

/// Render a configuration as TOML.
///
/// # Errors
/// Returns error if serialization fails.
pub fn render_config(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(config).map_err(|e| AppError::Config {
        message: format!("Failed to serialize config: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Money;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_matches_built_in_defaults() {
        let config: AppConfig = toml::from_str(DEFAULT_CONFIG).unwrap();
        let defaults = AppConfig::default();
        assert_eq!(config.pricing, defaults.pricing);
        assert_eq!(config.delivery.fee, defaults.delivery.fee);
        assert_eq!(config.delivery.free_threshold, defaults.delivery.free_threshold);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let absent = dir.path().join("absent.toml");
        let config = load_config(Some(absent.as_path())).unwrap();
        assert_eq!(config.pricing.bw_page, Money::from_minor(150));
    }

    #[test]
    fn test_ensure_then_load() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("conf").join("config.toml");

        assert!(ensure_config_exists(&config_path).unwrap());
        assert!(!ensure_config_exists(&config_path).unwrap());

        let loaded = load_config(Some(config_path.as_path())).unwrap();
        assert_eq!(loaded.delivery.default_location, "CUTM Bhubaneswar");
    }

    #[test]
    fn test_render_and_reload() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        let mut config = AppConfig::default();
        config.pricing.glossy_surcharge = Money::from_minor(125);
        fs::write(&config_path, render_config(&config).unwrap()).unwrap();

        let loaded = load_config_from_file(&config_path).unwrap();
        assert_eq!(loaded.pricing.glossy_surcharge, Money::from_minor(125));
    }

    #[test]
    fn test_bad_amount_is_a_config_error() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[pricing]\nbw_page = \"cheap\"\n").unwrap();

        assert!(matches!(
            load_config_from_file(&config_path),
            Err(AppError::Config { .. })
        ));
    }
}
