//! Error types for model construction and schema metadata.

use thiserror::Error;

use crate::model::EntityKey;

/// Errors raised while building a [`Model`](crate::Model).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Abstract entity types cannot be instantiated.
    #[error("{entity} is abstract and cannot be instantiated")]
    AbstractType {
        /// Entity type name.
        entity: &'static str,
    },

    /// Attribute name is not declared anywhere on the type chain.
    #[error("{entity} has no attribute named {attribute}")]
    UnknownAttribute {
        /// Entity type name.
        entity: &'static str,
        /// Offending attribute name.
        attribute: String,
    },

    /// Inverse attribute name is not declared anywhere on the type chain.
    #[error("{entity} has no inverse attribute named {attribute}")]
    UnknownInverse {
        /// Entity type name.
        entity: &'static str,
        /// Offending inverse attribute name.
        attribute: String,
    },

    /// STEP has no token for NaN or infinity.
    #[error("non-finite real in {entity}.{attribute}")]
    NonFiniteReal {
        /// Entity type name.
        entity: &'static str,
        /// Attribute holding the value.
        attribute: &'static str,
    },

    /// Handle does not name a live instance.
    #[error("missing entity {0:?}")]
    MissingEntity(EntityKey),
}

/// Errors raised while resolving an entity type's attribute metadata.
///
/// These are configuration errors in a schema table. They are fatal and never
/// retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// A forward attribute was declared without an order index.
    #[error("attribute {entity}.{attribute} has no order index")]
    MissingOrder {
        /// Type being resolved.
        entity: &'static str,
        /// Attribute lacking the index.
        attribute: &'static str,
    },

    /// Two forward attributes of one effective type share an order index.
    #[error("attributes {first} and {second} of {entity} share order index {order}")]
    DuplicateOrder {
        /// Type being resolved.
        entity: &'static str,
        /// The shared index.
        order: u16,
        /// Attribute that claimed the index first.
        first: &'static str,
        /// Attribute that collided with it.
        second: &'static str,
    },

    /// A derived override names an attribute the type chain never declares.
    #[error("{entity} marks unknown attribute {attribute} as derived")]
    UnknownDerived {
        /// Type being resolved.
        entity: &'static str,
        /// Name listed in the override set.
        attribute: &'static str,
    },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
