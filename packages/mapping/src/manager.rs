//! The mapping manager: resolves a model's mapping and fills its fields.

use roxmltree::{Document, Node};

use crate::accessor;
use crate::error::{MappingError, Result};
use crate::mapping::{MappingConfig, ModelMapping};
use crate::model::Model;
use crate::pipeline;
use crate::processor::ProcessorContext;

/// Maps XML elements onto models according to a [`MappingConfig`].
///
/// The configuration is validated once on construction and never changes
/// afterwards, so a manager can be shared between threads.
#[derive(Debug, Clone)]
pub struct MappingManager {
    config: MappingConfig,
}

impl MappingManager {
    /// Create a manager for a configuration.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the configuration fails validation.
    pub fn new(config: MappingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &MappingConfig {
        &self.config
    }

    /// Find the mapping for a model: the first configured identifier the
    /// model is an instance of, in declaration order.
    #[must_use]
    pub fn resolve(&self, model: &dyn Model) -> Option<&ModelMapping> {
        self.resolve_entry(model).map(|(_, mapping)| mapping)
    }

    fn resolve_entry(&self, model: &dyn Model) -> Option<(&str, &ModelMapping)> {
        self.config
            .models()
            .find(|(identifier, _)| model.is_instance_of(identifier))
    }

    /// Map `xml` onto `model` and hand the same model back.
    ///
    /// Fields are processed in configuration order. For each field the old
    /// value is read, the new value computed from the default or the XML,
    /// passed through the processors and written back.
    ///
    /// # Arguments
    /// * `context` - Resolves bound processors; use [`NoContext`](crate::NoContext) if there are none
    /// * `model` - The model to fill
    /// * `xml` - The element node expressions are evaluated against
    ///
    /// # Errors
    /// Returns `UnmappedModel` before touching any field if no mapping
    /// matches. Path, value and processor errors abort the remaining
    /// fields; fields already written keep their new value.
    ///
    /// # Examples
    /// ```
    /// use roxmltree::Document;
    /// use xml_mapping::{
    ///     FieldConfig, MappingConfig, MappingManager, ModelMapping, NoContext, Record, Value,
    /// };
    ///
    /// let config = MappingConfig::new().with_model(
    ///     "Product",
    ///     ModelMapping::new().with_field("name", FieldConfig::new().with_nodes(["title"]).unwrap()),
    /// );
    /// let manager = MappingManager::new(config).unwrap();
    ///
    /// let doc = Document::parse("<product><title>Fiets</title></product>").unwrap();
    /// let mut record = Record::new("Product").with_field("name", Value::Null);
    /// manager.process_model(&NoContext, &mut record, doc.root_element()).unwrap();
    ///
    /// assert_eq!(record.field("name"), Some(&Value::from("Fiets")));
    /// ```
    pub fn process_model<'m, M: Model>(
        &self,
        context: &dyn ProcessorContext,
        model: &'m mut M,
        xml: Node<'_, '_>,
    ) -> Result<&'m mut M> {
        self.process_dyn(context, &mut *model, xml)?;
        Ok(model)
    }

    /// Like [`process_model`](Self::process_model), for trait objects.
    ///
    /// # Errors
    /// See [`process_model`](Self::process_model).
    pub fn process_dyn(
        &self,
        context: &dyn ProcessorContext,
        model: &mut dyn Model,
        xml: Node<'_, '_>,
    ) -> Result<()> {
        let Some((identifier, mapping)) = self.resolve_entry(&*model) else {
            return Err(MappingError::UnmappedModel {
                model: model.model_name().to_string(),
            });
        };

        tracing::debug!(
            model = model.model_name(),
            mapping = identifier,
            fields = mapping.len(),
            element = xml.tag_name().name(),
            "Mapping model"
        );

        for (path, field) in mapping.fields() {
            let old_value = accessor::read(&*model, path)?;
            let value = pipeline::compute(field, xml);
            let value =
                pipeline::apply_processors(path, value, &field.processor, context, &old_value, &*model)?;

            tracing::trace!(field = path, value = ?value, "Writing field");
            accessor::write(model, path, value)?;
        }

        Ok(())
    }

    /// Parse `xml` and map its root element onto `model`.
    ///
    /// # Errors
    /// Returns `XmlParse` for malformed XML, otherwise see
    /// [`process_model`](Self::process_model).
    pub fn process_str<'m, M: Model>(
        &self,
        context: &dyn ProcessorContext,
        model: &'m mut M,
        xml: &str,
    ) -> Result<&'m mut M> {
        let doc = Document::parse(xml)?;
        self.process_model(context, model, doc.root_element())
    }
}
