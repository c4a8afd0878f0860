//! Attribute values and self-rendering defined-type leaves.
//!
//! A [`Value`] is what an attribute slot holds: nothing, a leaf, a handle to
//! another entity, or a collection of further values. Leaves know how to write
//! themselves as ISO 10303-21 tokens; entity handles and collections are
//! rendered by the exporter, which has to assign instance names first.

use std::fmt::Write as _;
use std::hash::{Hash, Hasher};

use crate::model::EntityKey;

/// Types that render themselves as a single STEP token.
pub trait ToStep {
    /// The token text, e.g. `'text'`, `1.5`, `.T.`.
    fn to_step(&self) -> String;
}

/// A primitive STEP value.
#[derive(Debug, Clone)]
pub enum Primitive {
    /// Integer, written in decimal.
    Integer(i64),
    /// Real number. Must be finite.
    Real(f64),
    /// String, written quoted and escaped.
    String(String),
    /// Boolean, written `.T.` or `.F.`.
    Boolean(bool),
    /// Logical, where `None` is unknown (`.U.`).
    Logical(Option<bool>),
    /// Enumeration item, written `.NAME.`.
    Enumeration(String),
}

// Reals compare by bit pattern so that identity is a proper equivalence
// relation and agrees with hashing.
impl PartialEq for Primitive {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Real(a), Self::Real(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Logical(a), Self::Logical(b)) => a == b,
            (Self::Enumeration(a), Self::Enumeration(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Primitive {}

impl Hash for Primitive {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Integer(v) => v.hash(state),
            Self::Real(v) => v.to_bits().hash(state),
            Self::String(v) | Self::Enumeration(v) => v.hash(state),
            Self::Boolean(v) => v.hash(state),
            Self::Logical(v) => v.hash(state),
        }
    }
}

impl ToStep for Primitive {
    fn to_step(&self) -> String {
        match self {
            Self::Integer(v) => v.to_string(),
            Self::Real(v) => format_real(*v),
            Self::String(v) => encode_string(v),
            Self::Boolean(true) | Self::Logical(Some(true)) => ".T.".into(),
            Self::Boolean(false) | Self::Logical(Some(false)) => ".F.".into(),
            Self::Logical(None) => ".U.".into(),
            Self::Enumeration(v) => format!(".{}.", v.to_ascii_uppercase()),
        }
    }
}

/// A defined-type leaf: a primitive tagged with the schema type it belongs to.
///
/// The tag is what a select-typed slot wraps the token in, so an `IfcLabel`
/// stored in an `IfcValue` slot is written `IFCLABEL('text')`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Leaf {
    type_name: Option<&'static str>,
    value: Primitive,
}

impl Leaf {
    /// Create a leaf of the named defined type.
    pub fn new(type_name: &'static str, value: Primitive) -> Self {
        Self {
            type_name: Some(type_name),
            value,
        }
    }

    /// Create a leaf with no defined type. It is never wrapped.
    pub fn untyped(value: Primitive) -> Self {
        Self {
            type_name: None,
            value,
        }
    }

    /// Defined-type name, if any.
    pub fn type_name(&self) -> Option<&'static str> {
        self.type_name
    }

    /// The underlying primitive.
    pub fn value(&self) -> &Primitive {
        &self.value
    }
}

impl ToStep for Leaf {
    fn to_step(&self) -> String {
        self.value.to_step()
    }
}

/// The content of one attribute slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Value {
    /// Unset (`$`).
    #[default]
    Null,
    /// Primitive or defined-type leaf.
    Leaf(Leaf),
    /// Handle of another entity in the same model.
    Ref(EntityKey),
    /// Ordered collection (LIST / ARRAY).
    List(Vec<Value>),
    /// Unordered collection (SET / BAG). Written in insertion order.
    Set(Vec<Value>),
}

impl Value {
    /// A string leaf of the given defined type.
    pub fn string(type_name: &'static str, value: impl Into<String>) -> Self {
        Self::Leaf(Leaf::new(type_name, Primitive::String(value.into())))
    }

    /// An `IfcLabel` leaf.
    pub fn label(value: impl Into<String>) -> Self {
        Self::string("IfcLabel", value)
    }

    /// A real leaf of the given defined type.
    pub fn real(type_name: &'static str, value: f64) -> Self {
        Self::Leaf(Leaf::new(type_name, Primitive::Real(value)))
    }

    /// An integer leaf of the given defined type.
    pub fn integer(type_name: &'static str, value: i64) -> Self {
        Self::Leaf(Leaf::new(type_name, Primitive::Integer(value)))
    }

    /// A boolean leaf of the given defined type.
    pub fn boolean(type_name: &'static str, value: bool) -> Self {
        Self::Leaf(Leaf::new(type_name, Primitive::Boolean(value)))
    }

    /// An enumeration item of the given enumeration type.
    pub fn enumeration(type_name: &'static str, item: impl Into<String>) -> Self {
        Self::Leaf(Leaf::new(type_name, Primitive::Enumeration(item.into())))
    }

    /// An ordered collection.
    pub fn list<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// An unordered collection.
    pub fn set<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Self::Set(items.into_iter().collect())
    }

    /// Check if this is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get as an entity handle.
    pub fn as_entity(&self) -> Option<EntityKey> {
        match self {
            Self::Ref(key) => Some(*key),
            _ => None,
        }
    }

    /// Visit every entity handle in this value, descending into collections.
    pub fn for_each_entity(&self, f: &mut impl FnMut(EntityKey)) {
        match self {
            Self::Ref(key) => f(*key),
            Self::List(items) | Self::Set(items) => {
                for item in items {
                    item.for_each_entity(f);
                }
            }
            Self::Null | Self::Leaf(_) => {}
        }
    }

    /// Whether any real inside this value is NaN or infinite.
    pub fn has_non_finite_real(&self) -> bool {
        match self {
            Self::Leaf(leaf) => matches!(leaf.value(), Primitive::Real(v) if !v.is_finite()),
            Self::List(items) | Self::Set(items) => items.iter().any(Value::has_non_finite_real),
            Self::Null | Self::Ref(_) => false,
        }
    }
}

impl From<EntityKey> for Value {
    fn from(key: EntityKey) -> Self {
        Self::Ref(key)
    }
}

impl From<Leaf> for Value {
    fn from(leaf: Leaf) -> Self {
        Self::Leaf(leaf)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Format a finite real as a STEP REAL token.
///
/// The token always carries a decimal point and an uppercase exponent marker:
/// `1.`, `0.5`, `1.E-10`.
pub fn format_real(value: f64) -> String {
    let repr = format!("{value:?}");
    let (mantissa, exponent) = match repr.split_once('e') {
        Some((m, e)) => (m, Some(e)),
        None => (repr.as_str(), None),
    };

    let mut out = if mantissa.contains('.') {
        mantissa.trim_end_matches('0').to_string()
    } else {
        format!("{mantissa}.")
    };
    if let Some(exponent) = exponent {
        out.push('E');
        out.push_str(exponent);
    }
    out
}

/// Quote and escape a string as a STEP string literal.
///
/// Apostrophes and backslashes are doubled. Anything outside printable ASCII
/// goes into `\X2\...\X0\` runs of UTF-16 code units.
pub fn encode_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');

    let mut wide = false;
    for ch in value.chars() {
        if (' '..='~').contains(&ch) {
            if wide {
                out.push_str("\\X0\\");
                wide = false;
            }
            match ch {
                '\'' => out.push_str("''"),
                '\\' => out.push_str("\\\\"),
                _ => out.push(ch),
            }
        } else {
            if !wide {
                out.push_str("\\X2\\");
                wide = true;
            }
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                let _ = write!(out, "{unit:04X}");
            }
        }
    }
    if wide {
        out.push_str("\\X0\\");
    }

    out.push('\'');
    out
}
