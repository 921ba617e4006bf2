//! Shared types, error model, and configuration for Docweave.
//!
//! This crate is the foundation depended on by all other Docweave crates.
//! It provides:
//! - [`DocweaveError`] — the unified error type
//! - Domain types ([`ContentSet`], [`FragmentRecord`], [`FragmentContent`], [`BatchId`])
//! - Configuration ([`AppConfig`], [`StyleConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, AssemblyPlanEntry, DefaultsConfig, FontSpec, StyleConfig, StyleDefaults,
    config_dir, config_file_path, init_config, load_config, load_config_from,
};
pub use error::{DocweaveError, Result};
pub use types::{
    BatchId, CURRENT_SCHEMA_VERSION, ContentBlock, ContentSet, ExtractionLogEntry,
    ExtractionStatus, FragmentContent, FragmentRecord, TableData,
};
