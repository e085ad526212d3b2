//! Path accessor: read and write model fields by slash-delimited path.
//!
//! Each segment is resolved against the current model with a fixed
//! strategy: the direct member first, then the conventional accessor
//! method (`get<Segment>` for reads and descent, `set<Segment>` for the
//! final write). Intermediate segments descend into nested models.

use crate::config::{getter_name, setter_name, MAX_PATH_DEPTH, PATH_SEPARATOR};
use crate::error::{MappingError, Result};
use crate::model::{Accessor, Assignment, Model};
use crate::value::Value;

/// Split a field path into its segments.
///
/// Empty paths, empty segments and paths deeper than [`MAX_PATH_DEPTH`]
/// fail with `PathResolution`.
fn split_path(path: &str) -> Result<Vec<&str>> {
    if path.is_empty() {
        return Err(MappingError::path(path, "", "field path is empty"));
    }

    let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
    if segments.len() > MAX_PATH_DEPTH {
        return Err(MappingError::path(
            path,
            segments[MAX_PATH_DEPTH],
            format!("field path exceeds maximum depth of {MAX_PATH_DEPTH}"),
        ));
    }
    if segments.iter().any(|s| s.is_empty()) {
        return Err(MappingError::path(path, "", "field path has an empty segment"));
    }

    Ok(segments)
}

/// Read the value at `path`.
///
/// # Errors
/// Returns `PathResolution` if a segment is neither a member nor reachable
/// through its getter.
///
/// # Examples
/// ```
/// use xml_mapping::accessor::read;
/// use xml_mapping::{Record, Value};
///
/// let customer = Record::new("Customer")
///     .with_field("address", Record::new("Address").with_field("city", "Delft"));
/// assert_eq!(read(&customer, "address/city").unwrap(), Value::from("Delft"));
/// assert!(read(&customer, "address/zip").is_err());
/// ```
pub fn read(model: &dyn Model, path: &str) -> Result<Value> {
    let segments = split_path(path)?;
    let Some((last, parents)) = segments.split_last() else {
        return Err(MappingError::path(path, "", "field path is empty"));
    };

    let mut current = model;
    for segment in parents {
        current = descend(current, path, segment)?;
    }

    if let Some(value) = current.get(Accessor::Member(last)) {
        return Ok(value);
    }
    let getter = getter_name(last);
    current.get(Accessor::Method(&getter)).ok_or_else(|| {
        MappingError::path(path, last, format!("no member '{last}' or method {getter}()"))
    })
}

/// Write `value` at `path`, mutating the model in place.
///
/// # Errors
/// Returns `PathResolution` if a segment cannot be resolved and
/// `InvalidValue` if the model rejects the value.
pub fn write(model: &mut dyn Model, path: &str, value: Value) -> Result<()> {
    let segments = split_path(path)?;
    let Some((last, parents)) = segments.split_last() else {
        return Err(MappingError::path(path, "", "field path is empty"));
    };

    let mut current = model;
    for segment in parents {
        current = descend_mut(current, path, segment)?;
    }

    let value = match current.set(Accessor::Member(last), value) {
        Assignment::Applied => return Ok(()),
        Assignment::Rejected { reason } => return Err(rejected(path, reason)),
        Assignment::Missing(value) => value,
    };

    let setter = setter_name(last);
    match current.set(Accessor::Method(&setter), value) {
        Assignment::Applied => Ok(()),
        Assignment::Rejected { reason } => Err(rejected(path, reason)),
        Assignment::Missing(_) => Err(MappingError::path(
            path,
            last,
            format!("no member '{last}' or method {setter}()"),
        )),
    }
}

fn descend<'m>(model: &'m dyn Model, path: &str, segment: &str) -> Result<&'m dyn Model> {
    if let Some(child) = model.child(Accessor::Member(segment)) {
        return Ok(child);
    }
    let getter = getter_name(segment);
    model.child(Accessor::Method(&getter)).ok_or_else(|| {
        MappingError::path(
            path,
            segment,
            format!("no nested model at member '{segment}' or method {getter}()"),
        )
    })
}

fn descend_mut<'m>(model: &'m mut dyn Model, path: &str, segment: &str) -> Result<&'m mut dyn Model> {
    let getter = getter_name(segment);
    // Probe immutably first so only one mutable borrow is handed out
    let accessor = if model.child(Accessor::Member(segment)).is_some() {
        Accessor::Member(segment)
    } else if model.child(Accessor::Method(&getter)).is_some() {
        Accessor::Method(&getter)
    } else {
        return Err(MappingError::path(
            path,
            segment,
            format!("no nested model at member '{segment}' or method {getter}()"),
        ));
    };

    model.child_mut(accessor).ok_or_else(|| {
        MappingError::path(
            path,
            segment,
            format!("nested model '{}' cannot be borrowed mutably", accessor.name()),
        )
    })
}

fn rejected(path: &str, reason: String) -> MappingError {
    MappingError::InvalidValue {
        path: path.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;
    use pretty_assertions::assert_eq;

    /// Typed model whose `zip` is private and only reachable through accessors.
    #[derive(Debug, Default)]
    struct Address {
        city: String,
        zip: String,
    }

    impl Model for Address {
        fn model_name(&self) -> &str {
            "Address"
        }

        fn get(&self, accessor: Accessor<'_>) -> Option<Value> {
            match accessor {
                Accessor::Member("city") => Some(Value::from(self.city.as_str())),
                Accessor::Method("getZip") => Some(Value::from(self.zip.as_str())),
                _ => None,
            }
        }

        fn set(&mut self, accessor: Accessor<'_>, value: Value) -> Assignment {
            match (accessor, value) {
                (Accessor::Member("city"), Value::String(s)) => {
                    self.city = s;
                    Assignment::Applied
                }
                (Accessor::Method("setZip"), Value::String(s)) => {
                    self.zip = s;
                    Assignment::Applied
                }
                (Accessor::Member("city") | Accessor::Method("setZip"), other) => {
                    Assignment::Rejected {
                        reason: format!("expected string, got {}", other.type_name()),
                    }
                }
                (_, value) => Assignment::Missing(value),
            }
        }
    }

    /// Typed model exposing its address only through `getAddress`.
    #[derive(Debug, Default)]
    struct Customer {
        address: Address,
    }

    impl Model for Customer {
        fn model_name(&self) -> &str {
            "Customer"
        }

        fn get(&self, _accessor: Accessor<'_>) -> Option<Value> {
            None
        }

        fn set(&mut self, _accessor: Accessor<'_>, value: Value) -> Assignment {
            Assignment::Missing(value)
        }

        fn child(&self, accessor: Accessor<'_>) -> Option<&dyn Model> {
            match accessor {
                Accessor::Method("getAddress") => Some(&self.address as &dyn Model),
                _ => None,
            }
        }

        fn child_mut(&mut self, accessor: Accessor<'_>) -> Option<&mut dyn Model> {
            match accessor {
                Accessor::Method("getAddress") => Some(&mut self.address as &mut dyn Model),
                _ => None,
            }
        }
    }

    #[test]
    fn test_record_round_trip() {
        let mut record = Record::new("Customer")
            .with_field("name", Value::Null)
            .with_field("address", Record::new("Address").with_field("city", Value::Null));

        write(&mut record, "name", Value::from("Jan")).unwrap();
        write(&mut record, "address/city", Value::from("Delft")).unwrap();

        assert_eq!(read(&record, "name").unwrap(), Value::from("Jan"));
        assert_eq!(read(&record, "address/city").unwrap(), Value::from("Delft"));
    }

    #[test]
    fn test_getter_and_setter_fallback() {
        let mut customer = Customer::default();

        write(&mut customer, "address/city", Value::from("Delft")).unwrap();
        write(&mut customer, "address/zip", Value::from("2611")).unwrap();

        assert_eq!(customer.address.city, "Delft");
        assert_eq!(customer.address.zip, "2611");
        assert_eq!(read(&customer, "address/zip").unwrap(), Value::from("2611"));
        assert_eq!(read(&customer, "address/city").unwrap(), Value::from("Delft"));
    }

    #[test]
    fn test_unresolvable_segments() {
        let mut customer = Customer::default();

        let err = read(&customer, "billing/city").unwrap_err();
        assert!(matches!(
            &err,
            MappingError::PathResolution { segment, .. } if segment == "billing"
        ));
        assert!(err.to_string().contains("getBilling()"));

        let err = write(&mut customer, "address/street", Value::from("x")).unwrap_err();
        assert!(matches!(
            &err,
            MappingError::PathResolution { segment, .. } if segment == "street"
        ));
        assert!(err.to_string().contains("setStreet()"));
    }

    #[test]
    fn test_rejected_value() {
        let mut customer = Customer::default();
        let err = write(&mut customer, "address/city", Value::from(5)).unwrap_err();
        assert!(matches!(err, MappingError::InvalidValue { .. }));
        assert_eq!(customer.address.city, "");
    }

    #[test]
    fn test_malformed_paths() {
        let record = Record::new("X").with_field("a", 1);
        assert!(read(&record, "").is_err());
        assert!(read(&record, "a//b").is_err());
        assert!(read(&record, "/a").is_err());

        let too_deep = vec!["a"; MAX_PATH_DEPTH + 1].join("/");
        let err = read(&record, &too_deep).unwrap_err();
        assert!(err.to_string().contains("maximum depth"));
    }

    #[test]
    fn test_scalar_is_not_descended() {
        let mut record = Record::new("X").with_field("name", "n");
        assert!(write(&mut record, "name/first", Value::from("x")).is_err());
        assert_eq!(record.field("name"), Some(&Value::from("n")));
    }
}
