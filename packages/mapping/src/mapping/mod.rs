//! Mapping configuration: which XML nodes feed which model fields.
//!
//! A [`MappingConfig`] is built once, either through the builders in
//! [`types`] or by the YAML [`loader`], and is read-only afterwards.

pub mod loader;
pub mod types;

pub use loader::{load_config, load_config_file};
pub use types::{FieldConfig, MappingConfig, ModelMapping};
