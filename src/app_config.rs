use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::{Path, PathBuf};

use crate::file_utils::FileManager;
use crate::localization::dictionary::DEFAULT_DELIMITER;
use crate::localization::planner::DEFAULT_MAX_CONCURRENT_NODES;

/// Application configuration module
/// This module handles the settings persisted between sessions: the language
/// pair, where the dictionary and exceptions live, and runtime tuning.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Source language code, as written in the dictionary header
    pub source_language: String,

    /// Target language code, as written in the dictionary header
    pub target_language: String,

    /// Dictionary file (header of language codes, one phrase per column)
    #[serde(default = "default_dictionary_path")]
    pub dictionary_path: PathBuf,

    /// Field delimiter of the dictionary file
    #[serde(default = "default_delimiter")]
    pub dictionary_delimiter: char,

    /// Exception patterns file, one regular expression per line
    #[serde(default)]
    pub exceptions_path: Option<PathBuf>,

    /// Maximum number of text nodes planned concurrently
    #[serde(default = "default_max_concurrent_nodes")]
    pub max_concurrent_nodes: usize,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: "EN".to_string(),
            target_language: "FR".to_string(),
            dictionary_path: default_dictionary_path(),
            dictionary_delimiter: default_delimiter(),
            exceptions_path: None,
            max_concurrent_nodes: default_max_concurrent_nodes(),
            log_level: LogLevel::default(),
        }
    }
}

fn default_dictionary_path() -> PathBuf {
    PathBuf::from("dictionary.tsv")
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

fn default_max_concurrent_nodes() -> usize {
    DEFAULT_MAX_CONCURRENT_NODES
}

impl Config {
    /// Load the configuration, writing a default one if the file is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if FileManager::file_exists(path) {
            return Self::load(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Load the configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Persist the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        FileManager::write_to_file(path, &json)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.source_language.trim().is_empty() {
            return Err(anyhow!("Source language code must not be empty"));
        }
        if self.target_language.trim().is_empty() {
            return Err(anyhow!("Target language code must not be empty"));
        }
        if self.source_language == self.target_language {
            return Err(anyhow!(
                "Source and target language are both '{}'",
                self.source_language
            ));
        }
        if matches!(self.dictionary_delimiter, '\n' | '\r') {
            return Err(anyhow!("Dictionary delimiter cannot be a line break"));
        }
        if self.max_concurrent_nodes == 0 {
            return Err(anyhow!("max_concurrent_nodes must be at least 1"));
        }
        Ok(())
    }
}
