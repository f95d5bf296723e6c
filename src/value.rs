use std::cmp::Ordering;
use std::fmt;

use crate::error::{ArborError, Result};

/// Runtime value of an Arbor expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Str(String),
    List(Vec<Value>),
    Bool(bool),
    None,
}

/// Runtime tag of a [`Value`]; gates which operators accept it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Int,
    Str,
    List,
    Bool,
    None,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueType::Int => "int",
            ValueType::Str => "str",
            ValueType::List => "list",
            ValueType::Bool => "bool",
            ValueType::None => "none",
        })
    }
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Integer(_) => ValueType::Int,
            Value::Str(_) => ValueType::Str,
            Value::List(_) => ValueType::List,
            Value::Bool(_) => ValueType::Bool,
            Value::None => ValueType::None,
        }
    }

    /// Ordering between two values of the same tag.
    ///
    /// Lists compare lexicographically; `none` has no order.
    pub fn compare(&self, other: &Value) -> Result<Ordering> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Ok(a.cmp(b)),
            (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Ok(a.cmp(b)),
            (Value::List(a), Value::List(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    if x == y {
                        continue;
                    }
                    if x.value_type() != y.value_type() {
                        return Err(ArborError::type_error(format!(
                            "cannot order list elements of type {} and {}",
                            x.value_type(),
                            y.value_type()
                        )));
                    }
                    return x.compare(y);
                }
                Ok(a.len().cmp(&b.len()))
            }
            _ => Err(ArborError::type_error(format!(
                "values of type {} and {} have no ordering",
                self.value_type(),
                other.value_type()
            ))),
        }
    }

    /// Form used for a value nested inside a printed list.
    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "\"{}\"", s),
            other => write!(f, "{}", other),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => {
                let mut buf: itoa::Buffer = itoa::Buffer::new();
                f.write_str(buf.format(*n))
            }

            Value::Str(s) => write!(f, "{}", s),

            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt_nested(f)?;
                }
                f.write_str("]")
            }

            Value::Bool(b) => write!(f, "{}", b),

            Value::None => write!(f, "none"),
        }
    }
}
