//! Static entity type tables.
//!
//! Each schema entity type is described once by a `'static` [`TypeDef`]. The
//! table lists only what the type itself declares; inherited attributes are
//! reached through `supertype` and merged by
//! [`EntityDescriptor`](crate::EntityDescriptor).

use std::fmt;

/// How a slot's declared type affects rendering of its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Leaves are written bare.
    Plain,
    /// The slot (or the element type of a collection slot) is a select type:
    /// leaves are wrapped in their defined-type tag, `IFCLABEL('x')`.
    Select,
}

/// One forward attribute declared by a type.
#[derive(Debug)]
pub struct AttributeDef {
    /// Attribute name as spelled in the schema.
    pub name: &'static str,
    /// Position in the record, continued from the supertype's attributes.
    pub order: Option<u16>,
    /// Rendering kind.
    pub kind: ValueKind,
}

impl AttributeDef {
    /// A plain attribute at `order`.
    pub const fn new(name: &'static str, order: u16) -> Self {
        Self {
            name,
            order: Some(order),
            kind: ValueKind::Plain,
        }
    }

    /// A select-typed attribute at `order`.
    pub const fn select(name: &'static str, order: u16) -> Self {
        Self {
            name,
            order: Some(order),
            kind: ValueKind::Select,
        }
    }

    /// An attribute without an order index. Resolving a type that declares one
    /// fails.
    pub const fn unordered(name: &'static str) -> Self {
        Self {
            name,
            order: None,
            kind: ValueKind::Plain,
        }
    }
}

/// One inverse (back-reference) attribute declared by a type.
#[derive(Debug)]
pub struct InverseDef {
    /// Attribute name as spelled in the schema.
    pub name: &'static str,
    /// Position among inverse attributes.
    pub order: u16,
}

impl InverseDef {
    /// An inverse attribute at `order`.
    pub const fn new(name: &'static str, order: u16) -> Self {
        Self { name, order }
    }
}

/// Declaration of one entity type.
pub struct TypeDef {
    /// Schema name, e.g. `IfcWall`.
    pub name: &'static str,
    /// Direct supertype.
    pub supertype: Option<&'static TypeDef>,
    /// Abstract types cannot be instantiated.
    pub is_abstract: bool,
    /// Forward attributes declared by this type.
    pub attributes: &'static [AttributeDef],
    /// Inverse attributes declared by this type.
    pub inverses: &'static [InverseDef],
    /// Inherited attributes this type redeclares as derived (written `*`).
    pub derived: &'static [&'static str],
}

impl TypeDef {
    /// Uppercase record tag, e.g. `IFCWALL`.
    pub fn step_tag(&self) -> String {
        self.name.to_ascii_uppercase()
    }

    /// This type followed by its supertypes, most derived first.
    pub fn chain(&'static self) -> impl Iterator<Item = &'static TypeDef> {
        std::iter::successors(Some(self), |ty| ty.supertype)
    }

    /// Whether this type or a supertype declares the forward attribute `name`.
    pub fn declares_attribute(&'static self, name: &str) -> bool {
        self.find_attribute(name).is_some()
    }

    /// Look up a forward attribute declared by this type or a supertype.
    pub fn find_attribute(&'static self, name: &str) -> Option<&'static AttributeDef> {
        self.chain()
            .flat_map(|ty| ty.attributes.iter())
            .find(|attr| attr.name == name)
    }

    /// Look up an inverse attribute declared by this type or a supertype.
    pub fn find_inverse(&'static self, name: &str) -> Option<&'static InverseDef> {
        self.chain()
            .flat_map(|ty| ty.inverses.iter())
            .find(|inv| inv.name == name)
    }

    /// Whether this type is `other` or inherits from it.
    pub fn is_subtype_of(&'static self, other: &TypeDef) -> bool {
        self.chain().any(|ty| std::ptr::eq(ty, other))
    }
}

impl fmt::Debug for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDef")
            .field("name", &self.name)
            .field("supertype", &self.supertype.map(|ty| ty.name))
            .field("is_abstract", &self.is_abstract)
            .finish_non_exhaustive()
    }
}
