//! XML Mapping - Map XML fragments onto domain models.
//!
//! This crate fills already-instantiated models from XML according to a
//! declarative per-model field mapping, so feeds can be transcribed into
//! native objects without hand-written parsing code per model.
//!
//! # Example
//!
//! ```
//! use xml_mapping::{load_config, MappingManager, NoContext, ProcessorRegistry, Record, Value};
//!
//! let yaml = r#"
//! mappings:
//!   Product:
//!     fields:
//!       name:
//!         nodes: [title]
//!         processor: [trim, uppercase]
//!       label:
//!         nodes: [brand, title]
//!         separator: " - "
//! "#;
//! let config = load_config(yaml, &ProcessorRegistry::with_builtins()).unwrap();
//! let manager = MappingManager::new(config).unwrap();
//!
//! let mut product = Record::scaffold("Product", manager.config().get("Product").unwrap());
//! manager
//!     .process_str(&NoContext, &mut product, "<p><title> fiets </title><brand>Gazelle</brand></p>")
//!     .unwrap();
//!
//! assert_eq!(product.field("name"), Some(&Value::from("FIETS")));
//! assert_eq!(product.field("label"), Some(&Value::from("Gazelle -  fiets ")));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants and validation helpers
//! - [`error`]: Error types and Result alias
//! - [`value`]: Dynamic values flowing through the pipeline
//! - [`model`]: The `Model` trait and the dynamic `Record`
//! - [`mapping`]: Mapping configuration types and the YAML loader
//! - [`xml`]: Node expressions, node snapshots and DOM helpers
//! - [`processor`]: Processor references, registry and built-ins
//! - [`accessor`]: Read and write model fields by path
//! - [`extract`]: Evaluate node expressions against the XML
//! - [`pipeline`]: Default/separator policy and processor chaining
//! - [`manager`]: The mapping manager tying it all together
//! - [`cli`]: Command-line interface

pub mod accessor;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod manager;
pub mod mapping;
pub mod model;
pub mod pipeline;
pub mod processor;
pub mod value;
pub mod xml;

// Re-export the main entry points
pub use manager::MappingManager;
pub use mapping::{load_config, load_config_file};

// Re-export commonly used items
pub use error::{MappingError, Result};
pub use mapping::{FieldConfig, MappingConfig, ModelMapping};
pub use model::{Accessor, Assignment, Model, Record};
pub use processor::{NoContext, Processor, ProcessorContext, ProcessorRegistry};
pub use value::Value;
