// src/config/mod.rs

//! Layered configuration for launched software.
//!
//! Responsibilities:
//! - Define the document model (`model.rs`).
//! - Read YAML/TOML documents from disk (`loader.rs`).
//! - Check deserialized documents and build typed views (`validate.rs`).
//! - Flatten env-var layers (`env.rs`).
//! - Resolve the active version and merged environment (`resolver.rs`).

pub mod env;
pub mod loader;
pub mod model;
pub mod resolver;
pub mod validate;

pub use env::{ResolvedEnvironment, merge_env_layers};
pub use loader::{DocumentFormat, load_document, load_global_config, load_software_config};
pub use model::{
    EnvVars, GlobalConfig, RawDocument, RawGlobalConfig, RawSoftwareConfig, Settings,
    SoftwareConfig,
};
pub use resolver::{
    ConfigResolver, GLOBAL_CONFIG_ENV, ResolvedConfig, VersionSelection, select_version,
};
