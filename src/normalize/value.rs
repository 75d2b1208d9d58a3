//! Normalized value model
//!
//! A closed sum type over everything a JSON record can hold once floats
//! have been replaced by exact decimals.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use std::fmt;

/// A normalized record: field name to value, in source order
pub type Item = IndexMap<String, AttrValue>;

/// A numeric scalar after normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Number {
    /// Signed integer, passed through unchanged
    Integer(i64),
    /// Unsigned integer above `i64::MAX`, passed through unchanged
    Unsigned(u64),
    /// Integer outside the 64-bit range, kept as its source digits
    BigInteger(String),
    /// Exact decimal built from a float's shortest text
    Decimal(Decimal),
    /// Exact decimal outside the 96-bit `Decimal` range, kept as
    /// scientific text (e.g. `1e300`)
    Exponent(String),
}

impl Number {
    /// Whether this number came from a float
    pub fn is_decimal(&self) -> bool {
        matches!(self, Number::Decimal(_) | Number::Exponent(_))
    }

    /// The decimal value, if it fits in a `Decimal`
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Number::Decimal(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{i}"),
            Number::Unsigned(u) => write!(f, "{u}"),
            Number::Decimal(d) => write!(f, "{d}"),
            Number::BigInteger(text) | Number::Exponent(text) => f.write_str(text),
        }
    }
}

/// A normalized JSON-shaped value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<AttrValue>),
    Map(Item),
}

impl AttrValue {
    /// Borrow the nested map, if this is one
    pub fn as_map(&self) -> Option<&Item> {
        match self {
            AttrValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow the list, if this is one
    pub fn as_list(&self) -> Option<&[AttrValue]> {
        match self {
            AttrValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the number, if this is one
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            AttrValue::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Borrow the string, if this is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Renders scalars bare (`O1`, `42.5`) and containers as compact JSON-like
/// text. Used for progress lines, not for serialization.
impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Null => f.write_str("null"),
            AttrValue::Bool(b) => write!(f, "{b}"),
            AttrValue::Number(n) => write!(f, "{n}"),
            AttrValue::String(s) => f.write_str(s),
            AttrValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            AttrValue::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}
