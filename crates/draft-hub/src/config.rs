// Configuration loading and parsing (config/hub.toml).

use serde::Deserialize;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file inside `config/` (and `defaults/`).
pub const CONFIG_FILE: &str = "hub.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// hub.toml structs
// ---------------------------------------------------------------------------

/// The assembled configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub reports: ReportsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    /// Path to the dataset JSON, relative to the working directory.
    pub path: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardConfig {
    /// Maximum number of board entries to show; 0 shows every prospect.
    #[serde(default)]
    pub limit: usize,
}

impl BoardConfig {
    pub fn limit(&self) -> Option<usize> {
        (self.limit > 0).then_some(self.limit)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportsConfig {
    pub default_rating: u8,
    pub max_rating: u8,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            default_rating: 5,
            max_rating: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Directory for the log file.
    pub directory: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "draft_hub=info,warn".into(),
            directory: "logs".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportConfig {
    /// When set, the board is also written to this CSV path.
    #[serde(default)]
    pub board_csv: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/hub.toml` relative to `base_dir`.
///
/// Does not copy defaults; prefer `load_config()`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = std::fs::read_to_string(&path).map_err(|_| ConfigError::FileNotFound {
        path: path.clone(),
    })?;
    let config = parse_config(&text, &path)?;
    validate(&config)?;
    Ok(config)
}

fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Copy any file in `defaults/` that is missing from `config/`.
/// Returns the files that were copied. `.example` files are skipped.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the crate root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir)
        .map_err(|e| copy_error(format!("failed to create config directory: {e}")))?;

    let entries = std::fs::read_dir(&defaults_dir)
        .map_err(|e| copy_error(format!("failed to read defaults directory: {e}")))?;

    let mut copied = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| copy_error(format!("failed to read defaults entry: {e}")))?
            .path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }

        let target = config_dir.join(file_name);
        match OpenOptions::new().write(true).create_new(true).open(&target) {
            Ok(mut dest) => {
                let content = std::fs::read(&path)
                    .map_err(|e| copy_error(format!("failed to read {}: {e}", path.display())))?;
                dest.write_all(&content)
                    .map_err(|e| copy_error(format!("failed to write {}: {e}", target.display())))?;
                copied.push(target);
            }
            // Already in config/; never overwrite user edits.
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(copy_error(format!(
                    "failed to create {}: {e}",
                    target.display()
                )));
            }
        }
    }

    Ok(copied)
}

/// Load config relative to the current working directory, copying defaults
/// first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

fn copy_error(message: String) -> ConfigError {
    ConfigError::DefaultsCopyError { message }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.dataset.path.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "dataset.path".into(),
            message: "must not be empty".into(),
        });
    }

    let reports = &config.reports;
    if reports.max_rating == 0 {
        return Err(ConfigError::ValidationError {
            field: "reports.max_rating".into(),
            message: "must be greater than 0".into(),
        });
    }
    if !(1..=reports.max_rating).contains(&reports.default_rating) {
        return Err(ConfigError::ValidationError {
            field: "reports.default_rating".into(),
            message: format!(
                "must be between 1 and {} inclusive, got {}",
                reports.max_rating, reports.default_rating
            ),
        });
    }

    if config.logging.filter.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "logging.filter".into(),
            message: "must not be empty".into(),
        });
    }

    if let Some(csv_path) = &config.export.board_csv {
        if csv_path.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "export.board_csv".into(),
                message: "must not be empty when set".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
