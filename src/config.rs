//! Configuration system for the AdLab studio
//!
//! Supports multiple configuration sources with the following precedence
//! (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (ADLAB_* prefix)
//! 3. Configuration file (TOML)
//! 4. Default values

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Main studio configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Catalog connection settings
    pub catalog: CatalogSettings,

    /// Concept generator settings
    pub generator: GeneratorSettings,

    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Catalog connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Catalog base URL (empty = use the bundled demo catalog)
    pub base_url: String,

    /// API key sent with catalog requests (empty = anonymous)
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Concept generator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Simulated latency per generation batch (ms)
    pub latency_ms: u64,

    /// Concepts generated when no count is given
    pub default_count: u32,

    /// Largest batch a single call may request
    pub max_count: u32,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log file path (empty = no file logging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Maximum log file size in MB before rotation
    pub max_file_size_mb: u64,

    /// Number of rotated log files to keep
    pub max_files: u32,

    /// Enable JSON formatted logging
    pub json_format: bool,
}

// Default implementations

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogSettings::default(),
            generator: GeneratorSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            timeout_secs: 30,
        }
    }
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            latency_ms: 1000,
            default_count: 2,
            max_count: 10,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            max_file_size_mb: 100,
            max_files: 5,
            json_format: false,
        }
    }
}

impl CatalogSettings {
    /// Whether the bundled demo catalog should be used
    pub fn is_demo(&self) -> bool {
        self.base_url.is_empty()
    }
}

impl StudioConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Self::default();

        // 1. Load from config file if it exists
        let config_file = Self::find_config_file(config_path)?;
        if let Some(path) = config_file {
            debug!(path = %path.display(), "Loading configuration file");
            let content = fs::read_to_string(&path).map_err(|e| Error::IoRead {
                path: path.clone(),
                source: e,
            })?;
            config = toml::from_str(&content).map_err(|e| Error::ConfigParse {
                message: e.to_string(),
                source: Some(e),
            })?;
            info!(path = %path.display(), "Configuration loaded from file");
        }

        // 2. Apply environment variable overrides
        config.apply_env_overrides();

        // 3. Expand paths
        config.expand_paths();

        // 4. Validate
        config.validate()?;

        Ok(config)
    }

    /// Find the configuration file to use
    fn find_config_file(explicit_path: Option<&str>) -> Result<Option<PathBuf>> {
        // If explicit path provided, use it (error if not found)
        if let Some(path) = explicit_path {
            let expanded = shellexpand::tilde(path);
            let path = PathBuf::from(expanded.as_ref());
            if path.exists() {
                return Ok(Some(path));
            } else {
                return Err(Error::config_not_found(path));
            }
        }

        // Search in standard locations
        let search_paths = [
            // Current directory
            PathBuf::from("adlab.toml"),
            // User config directory
            dirs::config_dir()
                .map(|p| p.join("adlab").join("studio.toml"))
                .unwrap_or_default(),
            // Home directory
            dirs::home_dir()
                .map(|p| p.join(".adlab").join("studio.toml"))
                .unwrap_or_default(),
            // System config (Linux)
            PathBuf::from("/etc/adlab/studio.toml"),
        ];

        for path in &search_paths {
            if path.exists() {
                debug!(path = %path.display(), "Found configuration file");
                return Ok(Some(path.clone()));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // Catalog settings
        if let Ok(val) = std::env::var("ADLAB_CATALOG_URL") {
            self.catalog.base_url = val;
        }
        if let Ok(val) = std::env::var("ADLAB_CATALOG_API_KEY") {
            self.catalog.api_key = val;
        }
        if let Ok(val) = std::env::var("ADLAB_CATALOG_TIMEOUT_SECS") {
            if let Ok(n) = val.parse() {
                self.catalog.timeout_secs = n;
            }
        }

        // Generator settings
        if let Ok(val) = std::env::var("ADLAB_GENERATOR_LATENCY_MS") {
            if let Ok(n) = val.parse() {
                self.generator.latency_ms = n;
            }
        }
        if let Ok(val) = std::env::var("ADLAB_GENERATOR_DEFAULT_COUNT") {
            if let Ok(n) = val.parse() {
                self.generator.default_count = n;
            }
        }
        if let Ok(val) = std::env::var("ADLAB_GENERATOR_MAX_COUNT") {
            if let Ok(n) = val.parse() {
                self.generator.max_count = n;
            }
        }

        // Logging settings
        if let Ok(val) = std::env::var("ADLAB_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("ADLAB_LOG_FILE") {
            self.logging.file = Some(val);
        }
        if let Ok(val) = std::env::var("ADLAB_LOG_JSON") {
            self.logging.json_format = val.to_lowercase() == "true" || val == "1";
        }
    }

    /// Expand ~ and other path variables
    fn expand_paths(&mut self) {
        if let Some(ref file) = self.logging.file {
            self.logging.file = Some(expand_path(file));
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Validate catalog URL (empty selects the demo catalog)
        if !self.catalog.base_url.is_empty()
            && !self.catalog.base_url.starts_with("http://")
            && !self.catalog.base_url.starts_with("https://")
        {
            return Err(Error::config_field_invalid(
                "catalog.base_url",
                "Catalog base URL must start with http:// or https://",
            ));
        }
        if self.catalog.timeout_secs == 0 {
            return Err(Error::config_field_invalid(
                "catalog.timeout_secs",
                "Catalog timeout must be at least 1 second",
            ));
        }

        // Validate generator counts
        if self.generator.max_count == 0 {
            return Err(Error::config_field_invalid(
                "generator.max_count",
                "max_count must be at least 1",
            ));
        }
        if self.generator.default_count == 0
            || self.generator.default_count > self.generator.max_count
        {
            return Err(Error::config_field_invalid(
                "generator.default_count",
                "default_count must be between 1 and max_count",
            ));
        }

        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config_field_invalid(
                "logging.level",
                format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            ));
        }

        Ok(())
    }
}

/// Expand ~ and environment variables in paths
fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .unwrap_or_else(|_| std::borrow::Cow::Borrowed(path))
        .into_owned()
}

/// Initialize a new configuration file
pub fn init_config(path: Option<&str>, force: bool) -> Result<()> {
    let config_path = path
        .map(|p| PathBuf::from(expand_path(p)))
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".adlab")
                .join("studio.toml")
        });

    // Check if file exists
    if config_path.exists() && !force {
        return Err(Error::config_validation(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        )));
    }

    // Create parent directories
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    // Generate default config with comments
    let config_content = generate_default_config();

    // Write the file
    fs::write(&config_path, config_content).map_err(|e| Error::IoWrite {
        path: config_path.clone(),
        source: e,
    })?;

    println!("Configuration file created: {}", config_path.display());
    Ok(())
}

/// Generate default configuration content with comments
fn generate_default_config() -> String {
    r#"# AdLab Studio Configuration
# https://github.com/adlab/studio

[catalog]
# Catalog base URL (PostgREST-style row API).
# Leave empty to use the bundled demo catalog.
base_url = ""

# API key sent with catalog requests (leave empty for anonymous access)
api_key = ""

# Request timeout in seconds
timeout_secs = 30

[generator]
# Simulated latency per generation batch (milliseconds)
latency_ms = 1000

# Concepts generated when no count is given
default_count = 2

# Largest batch a single call may request
max_count = 10

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log file path (comment out to disable file logging)
# file = "~/.adlab/logs/studio.log"

# Maximum log file size in MB before rotation
max_file_size_mb = 100

# Number of rotated log files to keep
max_files = 5

# Enable JSON formatted logging
json_format = false
"#
    .to_string()
}
