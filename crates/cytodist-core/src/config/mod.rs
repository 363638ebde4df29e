//! Run configuration management.
//!
//! This module provides configuration loading from `cytodist.yml`, the
//! global verbose flag, and the resolved analysis configuration passed into
//! the batch aggregator.

mod defaults;

pub use defaults::{
    AnalysisConfig, DropletAreaChannels, MicrotubuleChannels, PairChannels,
    DEFAULT_MIN_OBJECT_SIZE, DEFAULT_PIXEL_TO_MICRON,
};

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

// Global verbose flag for controlling debug output
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set the global verbose flag. When true, debug messages will be printed.
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::SeqCst);
}

/// Check if verbose mode is enabled.
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Print a message to stderr only if verbose mode is enabled.
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if $crate::config::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Canonical list of candidate config file names we search for on disk.
const CONFIG_FILENAMES: &[&str] = &["cytodist.yml", "cytodist.yaml"];

/// Complete configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CytodistConfig {
    pub defaults: AnalysisConfig,
}

/// Public handle that stores the loaded configuration, its source path, and warnings.
pub struct ConfigHandle {
    pub config: CytodistConfig,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

impl ConfigHandle {
    fn with_config(config: CytodistConfig, source: Option<PathBuf>, warnings: Vec<String>) -> Self {
        Self {
            config,
            source,
            warnings,
        }
    }
}

/// Load configuration from disk, optionally forcing a specific path.
pub fn load_config(custom_path: Option<&Path>) -> ConfigHandle {
    let mut warnings = Vec::new();
    let candidates = get_config_candidates(custom_path);

    for candidate in candidates {
        if !candidate.exists() || !candidate.is_file() {
            continue;
        }

        match fs::read_to_string(&candidate) {
            Ok(contents) => match serde_yaml::from_str::<CytodistConfig>(&contents) {
                Ok(mut config) => {
                    config.defaults.sanitize();
                    let source = fs::canonicalize(&candidate).unwrap_or(candidate);
                    return ConfigHandle::with_config(config, Some(source), warnings);
                }
                Err(err) => warnings.push(format!(
                    "Failed to parse config {}: {}",
                    candidate.display(),
                    err
                )),
            },
            Err(err) => warnings.push(format!(
                "Failed to read config {}: {}",
                candidate.display(),
                err
            )),
        }
    }

    warnings.push("No config found; using built-in defaults.".to_string());
    ConfigHandle::with_config(CytodistConfig::default(), None, warnings)
}

/// Get list of config file candidates to try
fn get_config_candidates(custom_path: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = custom_path {
        candidates.push(path.to_path_buf());
    }

    if let Ok(env_path) = std::env::var("CYTODIST_CONFIG") {
        candidates.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(cwd.join("config").join(name));
            candidates.push(cwd.join(name));
        }
    }

    if let Some(home_dir) = dirs::home_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(home_dir.join("cytodist").join(name));
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_falls_back_to_defaults_with_warning() {
        let handle = load_config(Some(Path::new("/nonexistent/cytodist.yml")));
        assert!(handle.source.is_none());
        assert!(!handle.warnings.is_empty());
        assert_eq!(
            handle.config.defaults.min_object_size,
            DEFAULT_MIN_OBJECT_SIZE
        );
    }

    #[test]
    fn explicit_config_file_is_loaded_and_sanitized() {
        let dir = std::env::temp_dir().join(format!("cytodist-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("cytodist.yml");
        fs::write(
            &path,
            "defaults:\n  pixel_to_micron: -5.0\n  min_object_size: 8\n",
        )
        .unwrap();

        let handle = load_config(Some(&path));
        assert!(handle.source.is_some());
        assert_eq!(handle.config.defaults.min_object_size, 8);
        // Invalid factor clamped back by sanitize()
        assert!(handle.config.defaults.pixel_to_micron > 0.0);
    }
}
