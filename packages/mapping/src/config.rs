//! Configuration constants and validation functions for the mapping engine.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{MappingError, Result};

/// Separator between the segments of a field path.
pub const PATH_SEPARATOR: char = '/';

/// Maximum number of segments in a field path.
///
/// Prevents runaway descent on malicious configuration like "a/a/a/a/...".
/// 32 levels is far beyond what any legitimate model graph would need.
pub const MAX_PATH_DEPTH: usize = 32;

/// Maximum length of a single node expression in bytes.
pub const MAX_EXPRESSION_LENGTH: usize = 1_024;

/// Maximum number of location steps in a node expression.
pub const MAX_EXPRESSION_STEPS: usize = 64;

/// Maximum size of a mapping file in bytes.
///
/// Prevents YAML bomb attacks and excessive memory usage during parsing.
/// 1 MB is far more than any mapping file needs.
pub const MAX_CONFIG_SIZE: usize = 1_000_000;

/// Field path segment pattern: an identifier, dashes allowed after the first char.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SEGMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_\-]*$").expect("valid regex"));

/// Validate a slash-delimited field path.
///
/// # Returns
/// * `Ok(())` if every segment is a valid identifier and the depth is bounded
/// * `Err(MappingError::InvalidConfig)` otherwise
///
/// # Examples
/// ```
/// use xml_mapping::config::validate_field_path;
///
/// assert!(validate_field_path("address/city").is_ok());
/// assert!(validate_field_path("address//city").is_err());
/// assert!(validate_field_path("").is_err());
/// ```
pub fn validate_field_path(path: &str) -> Result<()> {
    let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();

    if segments.len() > MAX_PATH_DEPTH {
        return Err(MappingError::InvalidConfig(format!(
            "field path '{path}' exceeds maximum depth of {MAX_PATH_DEPTH}"
        )));
    }

    if let Some(bad) = segments.iter().find(|s| !SEGMENT_PATTERN.is_match(s)) {
        return Err(MappingError::InvalidConfig(format!(
            "field path '{path}' has invalid segment '{bad}'"
        )));
    }

    Ok(())
}

/// Validate a model identifier (non-empty, no surrounding whitespace).
///
/// # Examples
/// ```
/// use xml_mapping::config::validate_model_identifier;
///
/// assert!(validate_model_identifier("Shop\\Product").is_ok());
/// assert!(validate_model_identifier(" ").is_err());
/// ```
pub fn validate_model_identifier(identifier: &str) -> Result<()> {
    if identifier.trim().is_empty() || identifier.trim() != identifier {
        return Err(MappingError::InvalidConfig(format!(
            "invalid model identifier '{identifier}'"
        )));
    }
    Ok(())
}

/// Name of the conventional getter for a segment (`city` → `getCity`).
///
/// # Examples
/// ```
/// use xml_mapping::config::getter_name;
///
/// assert_eq!(getter_name("city"), "getCity");
/// ```
pub fn getter_name(segment: &str) -> String {
    format!("get{}", capitalize(segment))
}

/// Name of the conventional setter for a segment (`city` → `setCity`).
pub fn setter_name(segment: &str) -> String {
    format!("set{}", capitalize(segment))
}

/// Uppercase the first character, leave the rest untouched.
fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
