//! Shared types, error model, and configuration for docgrounder.
//!
//! This crate is the foundation depended on by all other docgrounder crates.
//! It provides:
//! - [`DocGrounderError`] — the unified error type
//! - Domain types ([`DocRecord`], [`Member`], [`Field`], [`CatalogEntry`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CorpusConfig, ExtractConfig, config_dir, config_file_path, default_catalog,
    init_config, load_config, load_config_from,
};
pub use error::{DocGrounderError, Result};
pub use types::{CatalogEntry, DocRecord, Field, Member, Parameter};
