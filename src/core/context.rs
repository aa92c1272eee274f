//! Ready-made context values
//!
//! The logger is generic over its context type, so any `Clone + Send + Sync`
//! value works. This module provides two common shapes:
//! - `LogContext`: ordered key-value fields that serialize as a JSON object
//! - `AnyContext`: a type-erased value whose shape is checked at runtime by
//!   the hooks and formatters that read it

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::any::{type_name, Any};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

/// Key-value context, serialized as a flat JSON object with sorted keys
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogContext {
    fields: BTreeMap<String, FieldValue>,
}

impl LogContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Add a field to the context
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a field to the context (mutable version)
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
    }

    /// Get a field value by key
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Remove a field, returning its value
    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.fields.remove(key)
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Format fields as key=value pairs
    pub fn format_fields(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

/// Type-erased context
///
/// Cloning is cheap: the value sits behind an `Arc` and is never mutated in
/// place. Use [`AnyContext::map`] to derive an updated copy.
///
/// # Example
///
/// ```
/// use context_logger::AnyContext;
///
/// let ctx = AnyContext::new(42u32);
/// assert_eq!(*ctx.downcast_ref::<u32>().unwrap(), 42);
///
/// let err = ctx.downcast_ref::<String>().unwrap_err();
/// assert_eq!(err.to_string(), "u32: not implementing alloc::string::String");
/// ```
#[derive(Clone)]
pub struct AnyContext {
    value: Option<Arc<dyn Any + Send + Sync>>,
    type_name: &'static str,
}

impl AnyContext {
    const EMPTY: &'static str = "<empty>";

    /// Wrap `value`
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Some(Arc::new(value)),
            type_name: type_name::<T>(),
        }
    }

    /// A context holding nothing
    pub fn empty() -> Self {
        Self {
            value: None,
            type_name: Self::EMPTY,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Name of the concrete type held, `<empty>` when there is none
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Borrow the value as `T`, failing with a capability mismatch otherwise
    pub fn downcast_ref<T: Any>(&self) -> Result<&T> {
        self.value
            .as_deref()
            .and_then(|value| value.downcast_ref::<T>())
            .ok_or_else(|| LoggerError::capability(self.type_name, type_name::<T>()))
    }

    /// Build a new context from a copy of the current `T` value
    pub fn map<T, F>(&self, update: F) -> Result<Self>
    where
        T: Any + Send + Sync + Clone,
        F: FnOnce(T) -> T,
    {
        let current = self.downcast_ref::<T>()?.clone();
        Ok(Self::new(update(current)))
    }
}

impl Default for AnyContext {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for AnyContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AnyContext").field(&self.type_name).finish()
    }
}
