//! Error types for the mapping engine.
//!
//! A single `MappingError` covers both the mapping-time failures
//! (unmapped model, path resolution, processor invocation) and the
//! configuration-time failures raised while loading a mapping file.

use thiserror::Error;

/// Main error type for the mapping library.
#[derive(Debug, Error)]
pub enum MappingError {
    /// No configured model identifier matches the model.
    #[error("No model mapping found for '{model}'")]
    UnmappedModel { model: String },

    /// A field path segment is neither a member nor a conventional accessor.
    #[error("Cannot resolve segment '{segment}' of field path '{path}': {reason}")]
    PathResolution {
        path: String,
        segment: String,
        reason: String,
    },

    /// The model refused the value written to a field.
    #[error("Model rejected value for '{path}': {reason}")]
    InvalidValue { path: String, reason: String },

    /// A processor could not be resolved or failed while running.
    #[error("Processor '{processor}' failed for field '{field}': {reason}")]
    ProcessorInvocation {
        field: String,
        processor: String,
        reason: String,
    },

    /// A node expression could not be compiled.
    #[error("Invalid node expression '{expression}': {reason}")]
    InvalidExpression { expression: String, reason: String },

    /// The mapping configuration violates a structural rule.
    #[error("Invalid mapping configuration: {0}")]
    InvalidConfig(String),

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MappingError {
    /// Build a `PathResolution` error for a segment of a path.
    pub(crate) fn path(path: &str, segment: &str, reason: impl Into<String>) -> Self {
        Self::PathResolution {
            path: path.to_string(),
            segment: segment.to_string(),
            reason: reason.into(),
        }
    }

    /// Build an `InvalidExpression` error.
    pub(crate) fn expression(expression: &str, reason: impl Into<String>) -> Self {
        Self::InvalidExpression {
            expression: expression.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for mapping operations.
pub type Result<T> = std::result::Result<T, MappingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmapped_model_display() {
        let err = MappingError::UnmappedModel {
            model: "Product".to_string(),
        };
        assert_eq!(err.to_string(), "No model mapping found for 'Product'");
    }

    #[test]
    fn test_path_resolution_display() {
        let err = MappingError::path("address/city", "address", "no member or getAddress()");
        assert_eq!(
            err.to_string(),
            "Cannot resolve segment 'address' of field path 'address/city': no member or getAddress()"
        );
    }

    #[test]
    fn test_processor_invocation_display() {
        let err = MappingError::ProcessorInvocation {
            field: "name".to_string(),
            processor: "int".to_string(),
            reason: "not a number".to_string(),
        };
        assert!(err.to_string().contains("'int'"));
        assert!(err.to_string().contains("'name'"));
    }
}
