//! Runtime values for the Sift matching engine.
//!
//! # Heap Enforcement
//!
//! All heap allocations go through factory methods on `Value`. `Heap<T>` has
//! a private constructor, so external code cannot build heap variants
//! directly:
//!
//! ```text
//! let s = Value::string("hello");                   // OK
//! let seq = Value::sequence(vec![Value::Int(1)]);   // OK
//! let s = Value::Str(Heap::new(...));               // ERROR: Heap::new is pub(super)
//! ```
//!
//! # Acyclicity
//!
//! Values are immutable and built bottom-up, so a value can never contain
//! itself. Equality and matching therefore always terminate.

mod heap;
mod object;

use std::fmt;

use rustc_hash::FxHashMap;
use sift_ir::{Name, StringLookup};

use crate::ValueError;

pub use heap::Heap;
pub use object::ObjectValue;

/// Runtime value a match subject is built from.
#[derive(Clone)]
pub enum Value {
    // Scalars (inline, no heap allocation)
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Boolean singleton (`True` / `False`).
    Bool(bool),
    /// The `None` singleton.
    None,

    // Heap types
    /// String value. Never matched by sequence patterns.
    Str(Heap<String>),
    /// Ordered sequence of values.
    Sequence(Heap<Vec<Value>>),
    /// Insertion-ordered key/value entries with keys unique under `equals`.
    Mapping(Heap<Vec<(Value, Value)>>),
    /// Class instance. Compared by identity.
    Object(Heap<ObjectValue>),
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create a sequence value.
    #[inline]
    pub fn sequence(items: Vec<Value>) -> Self {
        Value::Sequence(Heap::new(items))
    }

    /// Create a mapping value, rejecting keys that compare equal.
    ///
    /// `Int(1)` and `Float(1.0)` are the same key.
    pub fn mapping(entries: Vec<(Value, Value)>) -> Result<Self, ValueError> {
        for (i, (key, _)) in entries.iter().enumerate() {
            if entries[..i].iter().any(|(seen, _)| seen.equals(key)) {
                return Err(ValueError::DuplicateKey {
                    key: key.to_string(),
                });
            }
        }
        Ok(Value::Mapping(Heap::new(entries)))
    }

    /// Create a mapping from entries drawn out of an existing mapping.
    ///
    /// Keys of a well-formed mapping are already unique, so no check is made
    /// beyond a debug assertion.
    pub fn sub_mapping<'a>(entries: impl IntoIterator<Item = &'a (Value, Value)>) -> Self {
        let entries: Vec<(Value, Value)> = entries.into_iter().cloned().collect();
        debug_assert!(
            entries
                .iter()
                .enumerate()
                .all(|(i, (k, _))| entries[..i].iter().all(|(seen, _)| !seen.equals(k))),
            "sub_mapping given duplicate keys"
        );
        Value::Mapping(Heap::new(entries))
    }

    /// Create an object value.
    ///
    /// No registry check happens here; use `TypeRegistry::instantiate` in
    /// `sift_match` to validate fields against a declared type.
    #[inline]
    pub fn object(type_tag: Name, fields: FxHashMap<Name, Value>) -> Self {
        Value::Object(Heap::new(ObjectValue::new(type_tag, fields)))
    }
}

// Accessors

impl Value {
    /// Try to convert to an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to convert to a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to convert to a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to convert to a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Try to view as sequence elements.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Try to view as mapping entries.
    pub fn as_mapping(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Try to view as an object.
    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Find the entry for `key` in a mapping, comparing keys with `equals`.
    ///
    /// Returns the entry index alongside the value so callers can track which
    /// entries were consumed.
    pub fn mapping_lookup(&self, key: &Value) -> Option<(usize, &Value)> {
        self.as_mapping()?
            .iter()
            .enumerate()
            .find(|(_, (k, _))| k.equals(key))
            .map(|(i, (_, v))| (i, v))
    }

    /// Type name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::None => "NoneType",
            Value::Str(_) => "str",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
            Value::Object(_) => "object",
        }
    }
}

// Matching predicates

impl Value {
    /// Check if this value is truthy.
    ///
    /// Zero, empty containers, `False` and `None` are falsy; objects and
    /// everything else are truthy. NaN is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::None => false,
            Value::Str(s) => !s.is_empty(),
            Value::Sequence(items) => !items.is_empty(),
            Value::Mapping(entries) => !entries.is_empty(),
            Value::Object(_) => true,
        }
    }

    /// Identity test for the singletons.
    ///
    /// Only `True`, `False` and `None` have identity in this model; every
    /// other pair returns `false`, including an object compared to itself.
    pub fn same_identity(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::None, Value::None) => true,
            _ => false,
        }
    }

    /// Check structural equality with another value.
    ///
    /// - Numbers compare by mathematical value (`Int(1)` equals `Float(1.0)`)
    /// - `Bool` never equals a number
    /// - Sequences compare element-wise, mappings entry-wise ignoring order
    /// - Objects are equal only to themselves (same allocation)
    #[allow(clippy::float_cmp, reason = "exact numeric equality is the contract")]
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(i), Value::Float(f)) | (Value::Float(f), Value::Int(i)) => {
                int_equals_float(*i, *f)
            }
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::None, Value::None) => true,
            (Value::Str(a), Value::Str(b)) => **a == **b,
            (Value::Sequence(a), Value::Sequence(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.equals(y))
            }
            (Value::Mapping(a), Value::Mapping(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, value)| {
                        b.iter()
                            .find(|(other_key, _)| other_key.equals(key))
                            .is_some_and(|(_, other_value)| other_value.equals(value))
                    })
            }
            (Value::Object(a), Value::Object(b)) => Heap::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Render for user output, resolving object type and field names.
    pub fn display_with<I: StringLookup>(&self, interner: &I) -> String {
        match self {
            Value::Sequence(items) => {
                let inner: Vec<_> = items.iter().map(|v| v.display_with(interner)).collect();
                format!("[{}]", inner.join(", "))
            }
            Value::Mapping(entries) => {
                let inner: Vec<_> = entries
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k.display_with(interner), v.display_with(interner)))
                    .collect();
                format!("{{{}}}", inner.join(", "))
            }
            Value::Object(obj) => obj.display_with(interner),
            _ => self.to_string(),
        }
    }
}

/// Exact comparison of an integer with a float.
///
/// Goes through the float's integral value rather than widening the integer,
/// which would round large integers and report false equalities.
#[allow(clippy::float_cmp, reason = "fract() of an integral float is exactly 0.0")]
fn int_equals_float(i: i64, f: f64) -> bool {
    // 2^63, exactly representable.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f.fract() != 0.0 || !(-LIMIT..LIMIT).contains(&f) {
        return false;
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "f is integral and within i64 range"
    )]
    let truncated = f as i64;
    truncated == i
}

// Trait Implementations

impl PartialEq for Value {
    /// Same relation as [`Value::equals`].
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(n) => write!(f, "Float({n:?})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::None => write!(f, "None"),
            Value::Str(s) => write!(f, "Str({:?})", &***s),
            Value::Sequence(items) => write!(f, "Sequence({:?})", &**items),
            Value::Mapping(entries) => write!(f, "Mapping({:?})", &**entries),
            Value::Object(obj) => {
                let mut fields: Vec<_> = obj.fields().collect();
                fields.sort_by_key(|(name, _)| *name);
                write!(f, "Object({:?}, {fields:?})", obj.type_tag())
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n:?}"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::None => write!(f, "None"),
            Value::Str(s) => write!(f, "{:?}", &***s),
            Value::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Mapping(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::Object(obj) => write!(f, "<object {:?}>", obj.type_tag()),
        }
    }
}

#[cfg(test)]
mod tests;
