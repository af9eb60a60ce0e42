//! Application configuration for docgrounder.
//!
//! User config lives at `~/.docgrounder/docgrounder.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DocGrounderError, Result};
use crate::types::CatalogEntry;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "docgrounder.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".docgrounder";

// ---------------------------------------------------------------------------
// Config structs (matching docgrounder.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Extraction settings.
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Corpus file settings.
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Classes to extract, in order. Defaults to the common JDK classes.
    #[serde(default = "default_catalog")]
    pub catalog: Vec<CatalogEntry>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            extract: ExtractConfig::default(),
            corpus: CorpusConfig::default(),
            catalog: default_catalog(),
        }
    }
}

/// `[extract]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Base URL of the reference documentation site.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Mandatory pause between successive requests, in milliseconds.
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            pause_ms: default_pause_ms(),
        }
    }
}

fn default_base_url() -> String {
    "https://docs.oracle.com/en/java/javase/17/docs/api".into()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_pause_ms() -> u64 {
    1000
}

/// `[corpus]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Path to the persisted corpus JSON file.
    #[serde(default = "default_corpus_path")]
    pub path: String,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: default_corpus_path(),
        }
    }
}

fn default_corpus_path() -> String {
    "data/java-docs.json".into()
}

/// The default extraction catalog: commonly asked-about JDK classes.
pub fn default_catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("java.util", "ArrayList"),
        CatalogEntry::new("java.util", "HashMap"),
        CatalogEntry::new("java.util", "HashSet"),
        CatalogEntry::new("java.util", "LinkedList"),
        CatalogEntry::new("java.lang", "String"),
        CatalogEntry::new("java.lang", "Integer"),
        CatalogEntry::new("java.lang", "Object"),
        CatalogEntry::new("java.io", "File"),
        CatalogEntry::new("java.io", "FileReader"),
        CatalogEntry::new("java.io", "BufferedReader"),
    ]
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.docgrounder/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| DocGrounderError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.docgrounder/docgrounder.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DocGrounderError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        DocGrounderError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| DocGrounderError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| DocGrounderError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DocGrounderError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
