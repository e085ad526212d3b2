//! Value processors applied to a field value before it is written.
//!
//! Processors are tagged when the configuration is built: a [`Processor::Plain`]
//! wraps a function of the value alone, a [`Processor::Bound`] names a
//! target and method that the caller's [`ProcessorContext`] resolves at
//! mapping time. Bound processors also see the field's old value and the model.

mod builtins;
mod registry;

use std::fmt;
use std::sync::Arc;

pub use registry::ProcessorRegistry;

use crate::model::Model;
use crate::value::Value;

/// Signature of a plain processor.
pub type ProcessorFn = Arc<dyn Fn(Value) -> Result<Value, String> + Send + Sync>;

/// A processor reference, tagged at configuration time.
#[derive(Clone)]
pub enum Processor {
    /// Function of the current value only.
    Plain { name: String, func: ProcessorFn },
    /// Method resolved against the calling context.
    Bound { target: String, method: String },
}

impl Processor {
    /// Wrap a function as a plain processor.
    pub fn plain<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        Processor::Plain {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Reference a method of the calling context.
    pub fn bound(target: impl Into<String>, method: impl Into<String>) -> Self {
        Processor::Bound {
            target: target.into(),
            method: method.into(),
        }
    }

    /// Human readable reference, used in errors and logs.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Processor::Plain { name, .. } => name.clone(),
            Processor::Bound { target, method } => format!("{target}::{method}"),
        }
    }

    /// Whether the processor is resolved against the calling context.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        matches!(self, Processor::Bound { .. })
    }
}

impl fmt::Debug for Processor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Processor::Plain { name, .. } => f.debug_tuple("Plain").field(name).finish(),
            Processor::Bound { target, method } => f
                .debug_struct("Bound")
                .field("target", target)
                .field("method", method)
                .finish(),
        }
    }
}

/// The caller of a mapping run, resolving bound processors.
///
/// Whatever invokes the engine passes itself (or a facade over its state)
/// as the context, so bound processors can use the caller's instance state.
pub trait ProcessorContext {
    /// Invoke `method` on `target` with the current value, the field's value
    /// before mapping, and the model being mapped.
    ///
    /// Returns `None` when the context does not know the target or method.
    fn invoke(
        &self,
        target: &str,
        method: &str,
        value: Value,
        old_value: &Value,
        model: &dyn Model,
    ) -> Option<Result<Value, String>>;
}

/// Context for callers without bound processors. Resolves nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContext;

impl ProcessorContext for NoContext {
    fn invoke(
        &self,
        _target: &str,
        _method: &str,
        _value: Value,
        _old_value: &Value,
        _model: &dyn Model,
    ) -> Option<Result<Value, String>> {
        None
    }
}
