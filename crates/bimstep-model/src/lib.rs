#![warn(missing_docs)]

//! Building-model data for STEP export.
//!
//! Provides the pieces an ISO 10303-21 writer consumes:
//! - [`Model`]: an arena of entity instances addressed by [`EntityKey`] handles
//! - [`Value`] / [`Leaf`]: attribute contents, with leaves that render themselves
//! - [`TypeDef`]: static per-type attribute tables
//! - [`EntityDescriptor`]: the resolved, ordered record layout of a type
//!
//! # Example
//!
//! ```
//! use bimstep_model::{ifc, Model, Value};
//!
//! let mut model = Model::new();
//! let person = model.create(&ifc::IFC_PERSON, [("GivenName", Value::label("Ada"))]).unwrap();
//! assert_eq!(model.get(person).unwrap().attribute("GivenName"), &Value::label("Ada"));
//! ```

mod descriptor;
mod error;
mod model;
mod schema;
mod value;

pub mod ifc;

pub use descriptor::{descriptor_for, EntityDescriptor, ForwardAttribute, InverseAttribute};
pub use error::{MetadataError, ModelError, Result};
pub use model::{EntityKey, Identity, Instance, Model};
pub use schema::{AttributeDef, InverseDef, TypeDef, ValueKind};
pub use value::{encode_string, format_real, Leaf, Primitive, ToStep, Value};
