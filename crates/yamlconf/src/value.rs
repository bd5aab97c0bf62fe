//! Typed configuration values
//!
//! Values stored in a [`ConfigNode`] after interpolation and casting.
//! A leaf is a primitive, a list of primitives, or null; a section is a
//! nested node.

use std::fmt;

use crate::config::ConfigNode;
use crate::document::RawValue;

/// A single typed scalar
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Boolean value
    Bool(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
}

impl Primitive {
    /// Get as boolean if this is a Bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Primitive::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i64 if this is an Integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Primitive::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64 if this is a Float or Integer
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Primitive::Float(f) => Some(*f),
            Primitive::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get as str if this is a String
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Primitive::String(s) => Some(s),
            _ => None,
        }
    }

    /// Falsy primitives are `false`, `0`, `0.0` and the empty string
    pub fn is_truthy(&self) -> bool {
        match self {
            Primitive::Bool(b) => *b,
            Primitive::Integer(i) => *i != 0,
            Primitive::Float(f) => *f != 0.0,
            Primitive::String(s) => !s.is_empty(),
        }
    }

    /// Returns the type name of this primitive
    pub fn type_name(&self) -> &'static str {
        match self {
            Primitive::Bool(_) => "boolean",
            Primitive::Integer(_) => "integer",
            Primitive::Float(_) => "float",
            Primitive::String(_) => "string",
        }
    }

    pub(crate) fn to_raw(&self) -> RawValue {
        match self {
            Primitive::Bool(b) => RawValue::Bool(*b),
            Primitive::Integer(i) => RawValue::Integer(*i),
            Primitive::Float(f) => RawValue::Float(*f),
            Primitive::String(s) => RawValue::String(s.clone()),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Bool(b) => write!(f, "{}", b),
            Primitive::Integer(i) => write!(f, "{}", i),
            Primitive::Float(n) => write!(f, "{}", n),
            Primitive::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for Primitive {
    fn from(b: bool) -> Self {
        Primitive::Bool(b)
    }
}

impl From<i64> for Primitive {
    fn from(i: i64) -> Self {
        Primitive::Integer(i)
    }
}

impl From<i32> for Primitive {
    fn from(i: i32) -> Self {
        Primitive::Integer(i as i64)
    }
}

impl From<f64> for Primitive {
    fn from(f: f64) -> Self {
        Primitive::Float(f)
    }
}

impl From<String> for Primitive {
    fn from(s: String) -> Self {
        Primitive::String(s)
    }
}

impl From<&str> for Primitive {
    fn from(s: &str) -> Self {
        Primitive::String(s.to_string())
    }
}

/// A value stored in a config node
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value (empty source string or list, or an explicit null)
    #[default]
    Null,
    /// A single primitive
    Scalar(Primitive),
    /// A list of primitives
    List(Vec<Primitive>),
    /// A nested section
    Node(ConfigNode),
}

impl Value {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get as boolean if this is a boolean scalar
    pub fn as_bool(&self) -> Option<bool> {
        self.as_scalar().and_then(Primitive::as_bool)
    }

    /// Get as i64 if this is an integer scalar
    pub fn as_i64(&self) -> Option<i64> {
        self.as_scalar().and_then(Primitive::as_i64)
    }

    /// Get as f64 if this is a float or integer scalar
    pub fn as_f64(&self) -> Option<f64> {
        self.as_scalar().and_then(Primitive::as_f64)
    }

    /// Get as str if this is a string scalar
    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Primitive::as_str)
    }

    /// Get the primitive if this is a scalar
    pub fn as_scalar(&self) -> Option<&Primitive> {
        match self {
            Value::Scalar(p) => Some(p),
            _ => None,
        }
    }

    /// Get as slice if this is a List
    pub fn as_list(&self) -> Option<&[Primitive]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get the nested section if this is a Node
    pub fn as_node(&self) -> Option<&ConfigNode> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Truthiness used by multi-key lookups: null, falsy primitives, empty
    /// lists and empty sections are all falsy
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Scalar(p) => p.is_truthy(),
            Value::List(items) => !items.is_empty(),
            Value::Node(node) => !node.is_empty(),
        }
    }

    /// Returns the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Scalar(p) => p.type_name(),
            Value::List(_) => "list",
            Value::Node(_) => "section",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Scalar(p) => write!(f, "{}", p),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Node(node) => write!(f, "{}", node),
        }
    }
}

impl From<Primitive> for Value {
    fn from(p: Primitive) -> Self {
        Value::Scalar(p)
    }
}

macro_rules! scalar_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Scalar(Primitive::from(v))
                }
            }
        )*
    };
}

scalar_from!(bool, i64, i32, f64, String, &str);

impl From<Vec<Primitive>> for Value {
    fn from(items: Vec<Primitive>) -> Self {
        Value::List(items)
    }
}

impl From<ConfigNode> for Value {
    fn from(node: ConfigNode) -> Self {
        Value::Node(node)
    }
}
