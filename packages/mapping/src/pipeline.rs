//! Value pipeline: combine default, extracted values and separator into one
//! value, then run it through the field's processor chain.

use roxmltree::Node;

use crate::error::{MappingError, Result};
use crate::extract::extract;
use crate::mapping::FieldConfig;
use crate::model::Model;
use crate::processor::{Processor, ProcessorContext};
use crate::value::Value;

/// Compute the value of a field before processors run.
///
/// 1. A truthy default wins; the XML is not consulted.
/// 2. In raw mode all matched nodes are returned as one list.
/// 3. Otherwise the extracted values are joined with the separator, or
///    the first one is taken when no separator is configured.
///
/// Nothing extracted yields the empty string.
pub fn compute(field: &FieldConfig, xml: Node<'_, '_>) -> Value {
    if let Some(default) = field.effective_default() {
        return default.clone();
    }

    let values = extract(xml, &field.nodes, field.raw);
    if values.is_empty() {
        return Value::String(String::new());
    }
    if field.raw {
        return Value::List(values);
    }

    match &field.separator {
        Some(separator) => Value::String(
            values
                .iter()
                .map(Value::to_text)
                .collect::<Vec<_>>()
                .join(separator.as_str()),
        ),
        None => values.into_iter().next().unwrap_or_default(),
    }
}

/// Thread `value` through `processors` in order.
///
/// Plain processors receive the value only. Bound processors are resolved
/// against `context` and also receive the field's value before mapping
/// and the model itself.
///
/// # Errors
/// Returns `ProcessorInvocation` if the context cannot resolve a bound
/// processor or any processor fails. Remaining processors are skipped.
pub fn apply_processors(
    field_path: &str,
    mut value: Value,
    processors: &[Processor],
    context: &dyn ProcessorContext,
    old_value: &Value,
    model: &dyn Model,
) -> Result<Value> {
    for processor in processors {
        let result = match processor {
            Processor::Plain { func, .. } => func(value),
            Processor::Bound { target, method } => context
                .invoke(target, method, value, old_value, model)
                .unwrap_or_else(|| Err(format!("context does not provide {target}::{method}"))),
        };

        value = result.map_err(|reason| MappingError::ProcessorInvocation {
            field: field_path.to_string(),
            processor: processor.label(),
            reason,
        })?;
    }

    Ok(value)
}
