//! Registry mapping processor names to plain processors.

use std::collections::HashMap;
use std::sync::Arc;

use super::builtins;
use super::{Processor, ProcessorFn};
use crate::value::Value;

/// Named plain processors available to mapping files.
///
/// Mapping files refer to plain processors by name; the loader resolves
/// each name here when the configuration is built.
#[derive(Clone, Default)]
pub struct ProcessorRegistry {
    processors: HashMap<String, ProcessorFn>,
}

impl ProcessorRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            processors: HashMap::new(),
        }
    }

    /// Create a registry holding the built-in processors.
    ///
    /// # Examples
    /// ```
    /// use xml_mapping::ProcessorRegistry;
    ///
    /// let registry = ProcessorRegistry::with_builtins();
    /// assert!(registry.has_processor("trim"));
    /// assert!(registry.has_processor("date"));
    /// ```
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtins::register_builtins(&mut registry);
        registry
    }

    /// Register a processor under `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, func: F)
    where
        F: Fn(Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.processors.insert(name.into(), Arc::new(func));
    }

    /// Resolve a name into a tagged plain processor.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Processor> {
        self.processors.get(name).map(|func| Processor::Plain {
            name: name.to_string(),
            func: Arc::clone(func),
        })
    }

    /// Check if a processor is registered under `name`.
    #[must_use]
    pub fn has_processor(&self, name: &str) -> bool {
        self.processors.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.processors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for ProcessorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessorRegistry")
            .field("processors", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_register_and_resolve() {
        let mut registry = ProcessorRegistry::new();
        registry.register("exclaim", |v: Value| Ok(Value::from(format!("{}!", v.to_text()))));

        assert!(registry.has_processor("exclaim"));
        assert!(!registry.has_processor("missing"));
        assert!(registry.resolve("missing").is_none());

        let Some(Processor::Plain { name, func }) = registry.resolve("exclaim") else {
            unreachable!("registered name resolves to a plain processor");
        };
        assert_eq!(name, "exclaim");
        assert_eq!(func(Value::from("hi")).unwrap(), Value::from("hi!"));
    }

    #[test]
    fn test_registry_builtins() {
        let registry = ProcessorRegistry::with_builtins();
        for name in [
            "trim",
            "uppercase",
            "lowercase",
            "collapse_whitespace",
            "int",
            "float",
            "bool",
            "date",
            "null_if_empty",
            "text",
        ] {
            assert!(registry.has_processor(name), "missing builtin {name}");
        }
    }

    #[test]
    fn test_registry_names_sorted() {
        let mut registry = ProcessorRegistry::new();
        registry.register("b", Ok);
        registry.register("a", Ok);
        assert_eq!(registry.names(), vec!["a", "b"]);
    }
}
