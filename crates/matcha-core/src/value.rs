//! Runtime value model.
//!
//! Matchers never see host types directly. Every actual value is first turned
//! into a [`Value`] through [`Inspect`](crate::inspect::Inspect), which gives the
//! engine the little introspection it needs: the runtime kind, zero-ness, sequence
//! elements and named record fields.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use crate::inspect::Inspect;

/// A dynamically typed value under test.
///
/// Equality is structural (`PartialEq` is derived), so comparing two sequences
/// or two records compares them element by element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// Absent value (`None`, JSON `null`)
    Nil,
    Bool(bool),
    /// Signed integers of any width, plus `u8`..`u32`
    Int(i64),
    /// `u64` and `usize`
    Uint(u64),
    Float(f64),
    Str(String),
    Uuid(Uuid),
    Time(DateTime<Utc>),
    /// Ordered sequence (slice, array, `Vec`)
    Seq(Vec<Value>),
    /// Record-like value with named fields
    Struct(StructValue),
    /// A non-nil reference to another value
    Ref(Box<Value>),
}

/// Runtime kind of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Nil,
    Bool,
    Int,
    Uint,
    Float,
    Str,
    Uuid,
    Time,
    Seq,
    Struct,
    Ref,
}

impl ValueKind {
    /// Stable label used in diagnostics
    pub fn label(&self) -> &'static str {
        match self {
            ValueKind::Nil => "Nil",
            ValueKind::Bool => "Bool",
            ValueKind::Int => "Int",
            ValueKind::Uint => "Uint",
            ValueKind::Float => "Float",
            ValueKind::Str => "String",
            ValueKind::Uuid => "Uuid",
            ValueKind::Time => "Time",
            ValueKind::Seq => "Slice",
            ValueKind::Struct => "Struct",
            ValueKind::Ref => "Pointer",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Value {
    /// Build a reference value pointing at `value`
    pub fn reference<T: Inspect + ?Sized>(value: &T) -> Self {
        Value::Ref(Box::new(value.inspect()))
    }

    /// Start a record value; add fields with [`StructValue::field`]
    pub fn structure(type_name: impl Into<String>) -> StructValue {
        StructValue::new(type_name)
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Nil => ValueKind::Nil,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Uint(_) => ValueKind::Uint,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
            Value::Uuid(_) => ValueKind::Uuid,
            Value::Time(_) => ValueKind::Time,
            Value::Seq(_) => ValueKind::Seq,
            Value::Struct(_) => ValueKind::Struct,
            Value::Ref(_) => ValueKind::Ref,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Whether this is the zero value of its kind.
    ///
    /// Nil, `false`, `0`, `""`, the nil UUID, the Unix epoch, an empty
    /// sequence, and a record whose fields are all zero. A reference is never
    /// zero, whatever it points at.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Nil => true,
            Value::Bool(b) => !b,
            Value::Int(n) => *n == 0,
            Value::Uint(n) => *n == 0,
            Value::Float(n) => *n == 0.0,
            Value::Str(s) => s.is_empty(),
            Value::Uuid(id) => id.is_nil(),
            Value::Time(t) => *t == DateTime::<Utc>::default(),
            Value::Seq(items) => items.is_empty(),
            Value::Struct(s) => s.fields.iter().all(|(_, v)| v.is_zero()),
            Value::Ref(_) => false,
        }
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Value::Struct(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Strip one level of reference
    pub fn deref_once(&self) -> Option<&Value> {
        match self {
            Value::Ref(inner) => Some(inner),
            _ => None,
        }
    }
}

/// Named-field access, the only capability the field-map matcher relies on.
pub trait FieldAccess {
    /// Type name used in diagnostics
    fn type_name(&self) -> &str;

    /// Look up a field by its exact name
    fn field_by_name(&self, name: &str) -> Option<&Value>;

    /// Number of visible fields
    fn field_count(&self) -> usize;
}

/// A record value: a type name and its fields in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructValue {
    pub type_name: String,
    pub fields: Vec<(String, Value)>,
}

impl StructValue {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field. Lookups return the first field with a given name.
    pub fn field<T: Inspect + ?Sized>(mut self, name: impl Into<String>, value: &T) -> Self {
        self.fields.push((name.into(), value.inspect()));
        self
    }

    /// Append a field that is already a [`Value`]
    pub fn field_value(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.push((name.into(), value));
        self
    }

    pub fn build(self) -> Value {
        Value::Struct(self)
    }
}

impl FieldAccess for StructValue {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn field_by_name(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    fn field_count(&self) -> usize {
        self.fields.len()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Uint(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Uuid(id) => write!(f, "{id}"),
            Value::Time(t) => f.write_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Value::Seq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Struct(s) => write!(f, "{s}"),
            Value::Ref(inner) => write!(f, "&{inner}"),
        }
    }
}

impl fmt::Display for StructValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fields.is_empty() {
            return write!(f, "{} {{}}", self.type_name);
        }
        write!(f, "{} {{ ", self.type_name)?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        f.write_str(" }")
    }
}
