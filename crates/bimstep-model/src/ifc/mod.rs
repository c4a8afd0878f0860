//! A subset of the IFC4 schema and a small sample project built from it.

#[allow(missing_docs)]
pub mod schema;
pub mod sample;

pub use schema::*;

use crate::schema::TypeDef;

/// Find a declared type by name, ignoring ASCII case (`IfcWall`, `IFCWALL`).
pub fn type_by_name(name: &str) -> Option<&'static TypeDef> {
    ALL_TYPES
        .iter()
        .copied()
        .find(|ty| ty.name.eq_ignore_ascii_case(name))
}
