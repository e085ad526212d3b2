//! The model side of the mapping: accessible fields on target objects.
//!
//! Target objects implement [`Model`]. Each field is reachable either as a
//! direct member or through a conventional accessor method (`getCity` /
//! `setCity`); the path accessor tries the member first and falls back to
//! the method. [`Record`] is a ready-made dynamic model.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::config::PATH_SEPARATOR;
use crate::mapping::ModelMapping;
use crate::value::Value;

/// How a field segment is reached on a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor<'a> {
    /// Direct member named like the segment (`city`).
    Member(&'a str),
    /// Conventional accessor method (`getCity` for reads, `setCity` for writes).
    Method(&'a str),
}

impl Accessor<'_> {
    /// The member or method name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Accessor::Member(name) | Accessor::Method(name) => name,
        }
    }
}

/// Outcome of assigning a value to a model field.
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment {
    /// The value was stored.
    Applied,
    /// The model has no such member or method; the value is handed back.
    Missing(Value),
    /// The field exists but cannot hold this value.
    Rejected { reason: String },
}

/// An object the engine can map XML onto.
///
/// Only `model_name`, `get` and `set` are required. Models with nested
/// objects also implement `child` / `child_mut` so paths like
/// `address/city` can descend into them.
pub trait Model {
    /// Identifier matched against the configured model identifiers.
    fn model_name(&self) -> &str;

    /// Whether the model satisfies a configured identifier.
    ///
    /// Defaults to an exact name match. Override to let a model answer for
    /// more general identifiers (an interface or parent type).
    fn is_instance_of(&self, identifier: &str) -> bool {
        self.model_name() == identifier
    }

    /// Read a field value. `None` when the member or method does not exist.
    fn get(&self, accessor: Accessor<'_>) -> Option<Value>;

    /// Write a field value.
    fn set(&mut self, accessor: Accessor<'_>, value: Value) -> Assignment;

    /// Borrow a nested model.
    fn child(&self, _accessor: Accessor<'_>) -> Option<&dyn Model> {
        None
    }

    /// Mutably borrow a nested model.
    ///
    /// Must resolve the same accessors as [`Model::child`]; the path
    /// accessor probes with `child` before descending mutably.
    fn child_mut(&mut self, _accessor: Accessor<'_>) -> Option<&mut dyn Model> {
        None
    }
}

/// A dynamic model: an ordered set of declared members.
///
/// Records only expose direct members. Assigning to an undeclared member
/// reports it missing, so a record has to be declared (or scaffolded from a
/// mapping) before XML is mapped onto it. Nested records are stored as
/// [`Value::Object`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    name: String,
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record answering to `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Declare a member with an initial value.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Declare a member, or replace its value if it already exists.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Build a record with every field path of `mapping` declared as null.
    ///
    /// Intermediate segments become nested records.
    ///
    /// # Examples
    /// ```
    /// use xml_mapping::{FieldConfig, ModelMapping, Record, Value};
    ///
    /// let mapping = ModelMapping::new()
    ///     .with_field("name", FieldConfig::new().with_default("x"))
    ///     .with_field("address/city", FieldConfig::new().with_default("y"));
    /// let record = Record::scaffold("Product", &mapping);
    ///
    /// assert_eq!(record.field("name"), Some(&Value::Null));
    /// assert!(record.field("address").and_then(Value::as_object).is_some());
    /// ```
    #[must_use]
    pub fn scaffold(name: impl Into<String>, mapping: &ModelMapping) -> Self {
        let mut record = Self::new(name);
        for (path, _) in mapping.fields() {
            let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
            record.declare_path(&segments);
        }
        record
    }

    fn declare_path(&mut self, segments: &[&str]) {
        let Some((first, rest)) = segments.split_first() else {
            return;
        };

        if rest.is_empty() {
            if self.field(first).is_none() {
                self.insert(*first, Value::Null);
            }
            return;
        }

        if !matches!(self.field(first), Some(Value::Object(_))) {
            self.insert(*first, Record::new(*first));
        }
        if let Some(Value::Object(nested)) = self.field_mut(first) {
            nested.declare_path(rest);
        }
    }

    /// Name the record answers to.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of a declared member.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Mutable value of a declared member.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Declared members in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of declared members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no members are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Model for Record {
    fn model_name(&self) -> &str {
        &self.name
    }

    fn get(&self, accessor: Accessor<'_>) -> Option<Value> {
        match accessor {
            Accessor::Member(name) => self.field(name).cloned(),
            Accessor::Method(_) => None,
        }
    }

    fn set(&mut self, accessor: Accessor<'_>, value: Value) -> Assignment {
        let Accessor::Member(name) = accessor else {
            return Assignment::Missing(value);
        };
        match self.field_mut(name) {
            Some(slot) => {
                *slot = value;
                Assignment::Applied
            }
            None => Assignment::Missing(value),
        }
    }

    fn child(&self, accessor: Accessor<'_>) -> Option<&dyn Model> {
        match accessor {
            Accessor::Member(name) => match self.field(name) {
                Some(Value::Object(nested)) => Some(nested as &dyn Model),
                _ => None,
            },
            Accessor::Method(_) => None,
        }
    }

    fn child_mut(&mut self, accessor: Accessor<'_>) -> Option<&mut dyn Model> {
        match accessor {
            Accessor::Member(name) => match self.field_mut(name) {
                Some(Value::Object(nested)) => Some(nested as &mut dyn Model),
                _ => None,
            },
            Accessor::Method(_) => None,
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
