//! Configuration types for model and field mappings.

use crate::config::{validate_field_path, validate_model_identifier};
use crate::error::{MappingError, Result};
use crate::processor::Processor;
use crate::value::Value;
use crate::xml::NodeExpr;

/// How a single model field is filled.
#[derive(Debug, Clone, Default)]
pub struct FieldConfig {
    /// Used instead of the XML when present and truthy.
    pub default: Option<Value>,

    /// Node expressions evaluated relative to the mapped element, in order.
    pub nodes: Vec<NodeExpr>,

    /// Processors applied to the computed value, in order.
    pub processor: Vec<Processor>,

    /// Joins multiple extracted values when set (ignored in raw mode).
    pub separator: Option<String>,

    /// Keep every matched node instead of the first text value.
    pub raw: bool,
}

impl FieldConfig {
    /// Create an empty field configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Compile and append node expressions.
    ///
    /// # Errors
    /// Returns `InvalidExpression` if any expression does not compile.
    ///
    /// # Examples
    /// ```
    /// use xml_mapping::FieldConfig;
    ///
    /// let field = FieldConfig::new().with_nodes(["title", "name"]).unwrap();
    /// assert_eq!(field.nodes.len(), 2);
    /// assert!(FieldConfig::new().with_nodes(["title["]).is_err());
    /// ```
    pub fn with_nodes<I, S>(self, nodes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = nodes
            .into_iter()
            .map(|node| NodeExpr::parse(node.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.with_node_exprs(parsed))
    }

    /// Append already compiled node expressions.
    #[must_use]
    pub fn with_node_exprs(mut self, nodes: impl IntoIterator<Item = NodeExpr>) -> Self {
        self.nodes.extend(nodes);
        self
    }

    /// Append a processor to the chain.
    #[must_use]
    pub fn with_processor(mut self, processor: Processor) -> Self {
        self.processor.push(processor);
        self
    }

    /// Set the separator for joining multiple values.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// Enable or disable raw mode.
    #[must_use]
    pub fn with_raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    /// The default, if it is set and truthy.
    #[must_use]
    pub fn effective_default(&self) -> Option<&Value> {
        self.default.as_ref().filter(|d| d.is_truthy())
    }
}

/// Field configurations of one model, in processing order.
#[derive(Debug, Clone, Default)]
pub struct ModelMapping {
    fields: Vec<(String, FieldConfig)>,
}

impl ModelMapping {
    /// Create an empty model mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, or replace the configuration of an existing path.
    #[must_use]
    pub fn with_field(mut self, path: impl Into<String>, field: FieldConfig) -> Self {
        let path = path.into();
        match self.fields.iter_mut().find(|(p, _)| *p == path) {
            Some((_, slot)) => *slot = field,
            None => self.fields.push((path, field)),
        }
        self
    }

    /// Fields in processing order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldConfig)> {
        self.fields.iter().map(|(p, f)| (p.as_str(), f))
    }

    /// Configuration of a field path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&FieldConfig> {
        self.fields.iter().find(|(p, _)| p == path).map(|(_, f)| f)
    }

    /// Number of configured fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn validate(&self, identifier: &str) -> Result<()> {
        if self.fields.is_empty() {
            return Err(MappingError::InvalidConfig(format!(
                "model '{identifier}' has no fields"
            )));
        }

        for (path, field) in &self.fields {
            validate_field_path(path)?;
            if field.nodes.is_empty() && field.effective_default().is_none() {
                return Err(MappingError::InvalidConfig(format!(
                    "field '{path}' of model '{identifier}' needs nodes or a default"
                )));
            }
        }

        Ok(())
    }
}

/// The complete mapping configuration: model identifiers in match order.
#[derive(Debug, Clone, Default)]
pub struct MappingConfig {
    models: Vec<(String, ModelMapping)>,
}

impl MappingConfig {
    /// Create an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a model, or replace the mapping of an existing identifier.
    ///
    /// Declaration order is match order: the first identifier a model
    /// satisfies wins.
    #[must_use]
    pub fn with_model(mut self, identifier: impl Into<String>, mapping: ModelMapping) -> Self {
        let identifier = identifier.into();
        match self.models.iter_mut().find(|(id, _)| *id == identifier) {
            Some((_, slot)) => *slot = mapping,
            None => self.models.push((identifier, mapping)),
        }
        self
    }

    /// Models in declaration order.
    pub fn models(&self) -> impl Iterator<Item = (&str, &ModelMapping)> {
        self.models.iter().map(|(id, m)| (id.as_str(), m))
    }

    /// Mapping registered under an exact identifier.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&ModelMapping> {
        self.models
            .iter()
            .find(|(id, _)| id == identifier)
            .map(|(_, m)| m)
    }

    /// Number of configured models.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether no models are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Check the structural rules of a configuration.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if there are no models, a model has no
    /// fields, an identifier or field path is malformed, or a field has
    /// neither nodes nor a truthy default.
    pub fn validate(&self) -> Result<()> {
        if self.models.is_empty() {
            return Err(MappingError::InvalidConfig(
                "at least one model mapping is required".to_string(),
            ));
        }

        for (identifier, mapping) in &self.models {
            validate_model_identifier(identifier)?;
            mapping.validate(identifier)?;
        }

        Ok(())
    }
}
