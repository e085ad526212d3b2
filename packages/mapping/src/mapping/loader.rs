//! YAML loader for mapping files.
//!
//! A mapping file lists model identifiers under `mappings`, each with the
//! field paths to fill:
//!
//! ```yaml
//! mappings:
//!   Product:
//!     fields:
//!       name:
//!         nodes: ["title", "name"]
//!         processor: [trim, [importer, normalizeName]]
//!       origin:
//!         default: feed
//! ```
//!
//! Processor entries are tagged here: a string is looked up in the
//! [`ProcessorRegistry`], a `[target, method]` pair becomes a bound
//! processor resolved at mapping time.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::types::{FieldConfig, MappingConfig, ModelMapping};
use crate::config::MAX_CONFIG_SIZE;
use crate::error::{MappingError, Result};
use crate::model::Record;
use crate::processor::{Processor, ProcessorRegistry};
use crate::value::Value;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDocument {
    /// Accepted for compatibility; logging goes through `tracing`.
    #[serde(default)]
    logger: Option<String>,
    mappings: serde_yaml::Mapping,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawModel {
    fields: serde_yaml::Mapping,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawField {
    #[serde(default)]
    default: serde_yaml::Value,
    #[serde(default)]
    nodes: Vec<String>,
    #[serde(default)]
    processor: Vec<RawProcessor>,
    #[serde(default)]
    separator: Option<String>,
    #[serde(default)]
    raw: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawProcessor {
    Name(String),
    Bound(String, String),
}

/// Load a mapping configuration from a YAML string.
///
/// # Arguments
/// * `yaml` - The mapping file contents
/// * `registry` - Plain processors available to the file
///
/// # Returns
/// A validated `MappingConfig` with compiled expressions and tagged processors
///
/// # Errors
/// Returns `Yaml` for malformed documents, `InvalidExpression` for node
/// expressions that do not compile and `InvalidConfig` for structural
/// problems or unknown processor names.
///
/// # Examples
/// ```
/// use xml_mapping::{load_config, ProcessorRegistry};
///
/// let yaml = r#"
/// mappings:
///   Product:
///     fields:
///       name:
///         nodes: [title]
///         processor: [trim]
/// "#;
/// let config = load_config(yaml, &ProcessorRegistry::with_builtins()).unwrap();
/// assert_eq!(config.len(), 1);
/// ```
pub fn load_config(yaml: &str, registry: &ProcessorRegistry) -> Result<MappingConfig> {
    if yaml.len() > MAX_CONFIG_SIZE {
        tracing::warn!(
            size = yaml.len(),
            max = MAX_CONFIG_SIZE,
            "Mapping content exceeds size limit"
        );
        return Err(MappingError::InvalidConfig(format!(
            "mapping content exceeds maximum size limit ({MAX_CONFIG_SIZE} bytes)"
        )));
    }

    let document: RawDocument = serde_yaml::from_str(yaml)?;
    if let Some(logger) = &document.logger {
        tracing::debug!(logger = %logger, "Ignoring logger setting, logging uses tracing");
    }

    let mut config = MappingConfig::new();
    for (key, raw_model) in document.mappings {
        let identifier = key_to_string(&key)?;
        let raw_model: RawModel = serde_yaml::from_value(raw_model)?;
        let mapping = build_model(&identifier, raw_model, registry)?;
        config = config.with_model(identifier, mapping);
    }

    config.validate()?;
    tracing::debug!(models = config.len(), "Loaded mapping configuration");

    Ok(config)
}

/// Load a mapping configuration from a YAML file.
///
/// # Errors
/// Returns `Io` if the file cannot be read, `InvalidConfig` if it is too
/// large, and any error of [`load_config`].
pub fn load_config_file<P: AsRef<Path>>(path: P, registry: &ProcessorRegistry) -> Result<MappingConfig> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "Loading mapping file");

    let size = fs::metadata(path)?.len();
    if size > MAX_CONFIG_SIZE as u64 {
        return Err(MappingError::InvalidConfig(format!(
            "mapping file exceeds maximum size limit ({MAX_CONFIG_SIZE} bytes)"
        )));
    }

    let content = fs::read_to_string(path)?;
    load_config(&content, registry)
}

fn build_model(identifier: &str, raw: RawModel, registry: &ProcessorRegistry) -> Result<ModelMapping> {
    let mut mapping = ModelMapping::new();

    for (key, raw_field) in raw.fields {
        let path = key_to_string(&key)?;
        // `name:` with nothing after it is a field with all defaults
        let raw_field: RawField = if raw_field.is_null() {
            RawField::default()
        } else {
            serde_yaml::from_value(raw_field)?
        };
        let field = build_field(identifier, &path, raw_field, registry)?;
        mapping = mapping.with_field(path, field);
    }

    Ok(mapping)
}

fn build_field(
    identifier: &str,
    path: &str,
    raw: RawField,
    registry: &ProcessorRegistry,
) -> Result<FieldConfig> {
    let mut field = FieldConfig::new()
        .with_nodes(&raw.nodes)?
        .with_raw(raw.raw);

    if !raw.default.is_null() {
        field = field.with_default(yaml_to_value(path, raw.default)?);
    }
    if let Some(separator) = raw.separator {
        field = field.with_separator(separator);
    }

    for entry in raw.processor {
        let processor = match entry {
            RawProcessor::Name(name) => registry.resolve(&name).ok_or_else(|| {
                MappingError::InvalidConfig(format!(
                    "unknown processor '{name}' for field '{path}' of model '{identifier}'"
                ))
            })?,
            RawProcessor::Bound(target, method) => Processor::bound(target, method),
        };
        field = field.with_processor(processor);
    }

    Ok(field)
}

/// Convert a YAML value into a mapping value. Mappings become records named after their key.
fn yaml_to_value(name: &str, yaml: serde_yaml::Value) -> Result<Value> {
    Ok(match yaml {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => Value::List(
            items
                .into_iter()
                .map(|item| yaml_to_value(name, item))
                .collect::<Result<Vec<_>>>()?,
        ),
        serde_yaml::Value::Mapping(map) => {
            let mut record = Record::new(name);
            for (key, value) in map {
                let key = key_to_string(&key)?;
                let value = yaml_to_value(&key, value)?;
                record.insert(key, value);
            }
            Value::Object(record)
        }
        serde_yaml::Value::Tagged(tagged) => {
            return Err(MappingError::InvalidConfig(format!(
                "tagged value '{}' is not supported in '{name}'",
                tagged.tag
            )));
        }
    })
}

fn key_to_string(key: &serde_yaml::Value) -> Result<String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        other => Err(MappingError::InvalidConfig(format!(
            "mapping keys must be scalars, found {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PRODUCT_YAML: &str = r#"
logger: monolog.logger
mappings:
  Product:
    fields:
      name:
        nodes: ["title", "name"]
        processor: [trim, uppercase]
      address/city:
        nodes: ["address/city"]
      tags:
        nodes: ["tags/tag"]
        raw: true
      label:
        nodes: ["brand", "title"]
        separator: " - "
      origin:
        default: "feed"
        processor: [[importer, stampOrigin]]
  Customer:
    fields:
      name:
        nodes: [name]
"#;

    fn load(yaml: &str) -> Result<MappingConfig> {
        load_config(yaml, &ProcessorRegistry::with_builtins())
    }

    #[test]
    fn test_load_full_document() {
        let config = load(PRODUCT_YAML).unwrap();

        let ids: Vec<_> = config.models().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["Product", "Customer"]);

        let product = config.get("Product").unwrap();
        let paths: Vec<_> = product.fields().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["name", "address/city", "tags", "label", "origin"]);

        let name = product.get("name").unwrap();
        assert_eq!(name.nodes.len(), 2);
        let labels: Vec<_> = name.processor.iter().map(Processor::label).collect();
        assert_eq!(labels, vec!["trim", "uppercase"]);
        assert!(!name.raw);
        assert!(name.default.is_none());

        assert!(product.get("tags").unwrap().raw);
        assert_eq!(product.get("label").unwrap().separator.as_deref(), Some(" - "));

        let origin = product.get("origin").unwrap();
        assert_eq!(origin.default, Some(Value::from("feed")));
        assert!(origin.nodes.is_empty());
        assert!(origin.processor[0].is_bound());
        assert_eq!(origin.processor[0].label(), "importer::stampOrigin");
    }

    #[test]
    fn test_unknown_processor_is_rejected() {
        let yaml = "mappings:\n  P:\n    fields:\n      name:\n        nodes: [a]\n        processor: [nope]\n";
        let err = load(yaml).unwrap_err();
        assert!(err.to_string().contains("unknown processor 'nope'"));
    }

    #[test]
    fn test_invalid_expression_is_rejected() {
        let yaml = "mappings:\n  P:\n    fields:\n      name:\n        nodes: ['a[']\n";
        let err = load(yaml).unwrap_err();
        assert!(matches!(err, MappingError::InvalidExpression { .. }));
    }

    #[test]
    fn test_structural_errors() {
        // No models at all
        assert!(matches!(
            load("mappings: {}\n"),
            Err(MappingError::InvalidConfig(_))
        ));
        // Missing fields key
        assert!(matches!(load("mappings:\n  P: {}\n"), Err(MappingError::Yaml(_))));
        // Empty fields
        assert!(matches!(
            load("mappings:\n  P:\n    fields: {}\n"),
            Err(MappingError::InvalidConfig(_))
        ));
        // Unknown field option
        assert!(matches!(
            load("mappings:\n  P:\n    fields:\n      a:\n        nodes: [a]\n        xpath: b\n"),
            Err(MappingError::Yaml(_))
        ));
        // Field without nodes or default
        assert!(matches!(
            load("mappings:\n  P:\n    fields:\n      a:\n"),
            Err(MappingError::InvalidConfig(_))
        ));
        // Malformed processor pair
        assert!(load("mappings:\n  P:\n    fields:\n      a:\n        nodes: [a]\n        processor: [[x]]\n").is_err());
    }

    #[test]
    fn test_default_values_are_converted() {
        let yaml = r#"
mappings:
  P:
    fields:
      count:
        default: 3
      ratio:
        default: 0.5
      meta:
        default:
          source: feed
          tags: [a, b]
"#;
        let config = load(yaml).unwrap();
        let p = config.get("P").unwrap();

        assert_eq!(p.get("count").unwrap().default, Some(Value::Int(3)));
        assert_eq!(p.get("ratio").unwrap().default, Some(Value::Float(0.5)));

        let meta = p.get("meta").unwrap().default.clone().unwrap();
        let record = meta.as_object().unwrap();
        assert_eq!(record.name(), "meta");
        assert_eq!(record.field("source"), Some(&Value::from("feed")));
        assert_eq!(record.field("tags"), Some(&Value::from(vec!["a", "b"])));
    }

    #[test]
    fn test_tagged_default_is_rejected() {
        let yaml = "mappings:\n  P:\n    fields:\n      a:\n        default: !custom x\n";
        assert!(matches!(load(yaml), Err(MappingError::InvalidConfig(_))));
    }

    #[test]
    fn test_size_limit() {
        let yaml = format!("# {}\n", "x".repeat(MAX_CONFIG_SIZE));
        let err = load(&yaml).unwrap_err();
        assert!(err.to_string().contains("maximum size limit"));
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapping.yaml");
        fs::write(&path, PRODUCT_YAML).unwrap();

        let config = load_config_file(&path, &ProcessorRegistry::with_builtins()).unwrap();
        assert_eq!(config.len(), 2);

        let missing = load_config_file(dir.path().join("missing.yaml"), &ProcessorRegistry::new());
        assert!(matches!(missing, Err(MappingError::Io(_))));
    }
}
