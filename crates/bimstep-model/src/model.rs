//! Entity arena.
//!
//! Instances live in a [`SlotMap`] and point at each other through
//! [`EntityKey`] handles, so a cyclic model is just a set of handles. Identity
//! is structural over forward attributes only: inverse attributes are stored
//! beside them and never compared, which keeps equality and hashing from
//! following a back-reference.

use std::collections::{BTreeMap, HashSet};

use slotmap::{new_key_type, SlotMap};

use crate::error::{ModelError, Result};
use crate::schema::TypeDef;
use crate::value::Value;

new_key_type! {
    /// Handle of an entity instance inside a [`Model`].
    pub struct EntityKey;
}

static NULL: Value = Value::Null;

/// One entity instance.
#[derive(Debug, Clone)]
pub struct Instance {
    type_def: &'static TypeDef,
    attributes: BTreeMap<&'static str, Value>,
    inverses: BTreeMap<&'static str, Value>,
}

impl Instance {
    fn new(type_def: &'static TypeDef) -> Self {
        Self {
            type_def,
            attributes: BTreeMap::new(),
            inverses: BTreeMap::new(),
        }
    }

    /// The instance's type.
    pub fn type_def(&self) -> &'static TypeDef {
        self.type_def
    }

    /// Value of a forward attribute; unset attributes read as [`Value::Null`].
    pub fn attribute(&self, name: &str) -> &Value {
        self.attributes.get(name).unwrap_or(&NULL)
    }

    /// Value of an inverse attribute, if set.
    pub fn inverse(&self, name: &str) -> Option<&Value> {
        self.inverses.get(name)
    }

    /// Structural identity over the type and forward attributes.
    pub fn identity(&self) -> Identity {
        Identity {
            type_name: self.type_def.name,
            attributes: self
                .attributes
                .iter()
                .map(|(name, value)| (*name, value.clone()))
                .collect(),
        }
    }
}

/// Value identity of an instance.
///
/// Two instances with the same type and the same forward attribute values
/// (entity handles compared as handles) are the same entity and are written
/// once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    type_name: &'static str,
    attributes: Vec<(&'static str, Value)>,
}

impl Identity {
    /// Type name of the identified instance.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

/// Arena of entity instances.
#[derive(Debug, Default)]
pub struct Model {
    instances: SlotMap<EntityKey, Instance>,
}

impl Model {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an instance of `ty` with every attribute unset.
    pub fn insert(&mut self, ty: &'static TypeDef) -> Result<EntityKey> {
        if ty.is_abstract {
            return Err(ModelError::AbstractType { entity: ty.name });
        }
        Ok(self.instances.insert(Instance::new(ty)))
    }

    /// Add an instance of `ty` and set the given forward attributes.
    pub fn create<I>(&mut self, ty: &'static TypeDef, attributes: I) -> Result<EntityKey>
    where
        I: IntoIterator<Item = (&'static str, Value)>,
    {
        let key = self.insert(ty)?;
        for (name, value) in attributes {
            if let Err(err) = self.set(key, name, value) {
                self.instances.remove(key);
                return Err(err);
            }
        }
        Ok(key)
    }

    /// Set a forward attribute. Setting [`Value::Null`] clears it.
    pub fn set(&mut self, key: EntityKey, name: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let ty = self.instance(key)?.type_def;
        let attr = ty
            .find_attribute(name)
            .ok_or_else(|| ModelError::UnknownAttribute {
                entity: ty.name,
                attribute: name.to_string(),
            })?;
        if value.has_non_finite_real() {
            return Err(ModelError::NonFiniteReal {
                entity: ty.name,
                attribute: attr.name,
            });
        }
        self.check_handles(&value)?;

        let instance = self.instance_mut(key)?;
        if value.is_null() {
            instance.attributes.remove(attr.name);
        } else {
            instance.attributes.insert(attr.name, value);
        }
        Ok(())
    }

    /// Set an inverse attribute. Setting [`Value::Null`] clears it.
    pub fn set_inverse(
        &mut self,
        key: EntityKey,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<()> {
        let value = value.into();
        let ty = self.instance(key)?.type_def;
        let inv = ty.find_inverse(name).ok_or_else(|| ModelError::UnknownInverse {
            entity: ty.name,
            attribute: name.to_string(),
        })?;
        self.check_handles(&value)?;

        let instance = self.instance_mut(key)?;
        if value.is_null() {
            instance.inverses.remove(inv.name);
        } else {
            instance.inverses.insert(inv.name, value);
        }
        Ok(())
    }

    /// Append `target` to a set-valued inverse attribute, creating the set on
    /// first use.
    pub fn push_inverse(&mut self, key: EntityKey, name: &str, target: EntityKey) -> Result<()> {
        let ty = self.instance(key)?.type_def;
        let inv = ty.find_inverse(name).ok_or_else(|| ModelError::UnknownInverse {
            entity: ty.name,
            attribute: name.to_string(),
        })?;
        self.instance(target)?;

        let slot = self
            .instance_mut(key)?
            .inverses
            .entry(inv.name)
            .or_insert_with(|| Value::Set(Vec::new()));
        match slot {
            Value::Set(items) | Value::List(items) => items.push(Value::Ref(target)),
            other => *other = Value::set([other.clone(), Value::Ref(target)]),
        }
        Ok(())
    }

    /// Look up an instance.
    pub fn get(&self, key: EntityKey) -> Option<&Instance> {
        self.instances.get(key)
    }

    /// Remove an instance. Handles that still point at it become dangling.
    pub fn remove(&mut self, key: EntityKey) -> Option<Instance> {
        self.instances.remove(key)
    }

    /// Number of instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether the model has no instances.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Iterate over all instances.
    pub fn iter(&self) -> impl Iterator<Item = (EntityKey, &Instance)> {
        self.instances.iter()
    }

    /// Distinct types present in the model, in first-seen order.
    pub fn types(&self) -> Vec<&'static TypeDef> {
        let mut seen = HashSet::new();
        self.instances
            .values()
            .map(|instance| instance.type_def)
            .filter(|ty| seen.insert(*ty as *const TypeDef))
            .collect()
    }

    fn instance(&self, key: EntityKey) -> Result<&Instance> {
        self.instances.get(key).ok_or(ModelError::MissingEntity(key))
    }

    fn instance_mut(&mut self, key: EntityKey) -> Result<&mut Instance> {
        self.instances
            .get_mut(key)
            .ok_or(ModelError::MissingEntity(key))
    }

    fn check_handles(&self, value: &Value) -> Result<()> {
        let mut dangling = None;
        value.for_each_entity(&mut |key| {
            if dangling.is_none() && !self.instances.contains_key(key) {
                dangling = Some(key);
            }
        });
        match dangling {
            Some(key) => Err(ModelError::MissingEntity(key)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AttributeDef, InverseDef};

    static ABSTRACT: TypeDef = TypeDef {
        name: "TestAbstract",
        supertype: None,
        is_abstract: true,
        attributes: &[AttributeDef::new("Name", 0)],
        inverses: &[],
        derived: &[],
    };

    static NODE: TypeDef = TypeDef {
        name: "TestNode",
        supertype: Some(&ABSTRACT),
        is_abstract: false,
        attributes: &[AttributeDef::new("Size", 1), AttributeDef::new("Next", 2)],
        inverses: &[InverseDef::new("Owners", 0)],
        derived: &[],
    };

    #[test]
    fn test_abstract_type_rejected() {
        let mut model = Model::new();
        assert_eq!(
            model.insert(&ABSTRACT),
            Err(ModelError::AbstractType {
                entity: "TestAbstract"
            })
        );
    }

    #[test]
    fn test_set_and_read_back() {
        let mut model = Model::new();
        let a = model.insert(&NODE).unwrap();
        let b = model
            .create(&NODE, [("Name", Value::label("b")), ("Next", Value::Ref(a))])
            .unwrap();

        let instance = model.get(b).unwrap();
        assert_eq!(instance.attribute("Name"), &Value::label("b"));
        assert_eq!(instance.attribute("Next").as_entity(), Some(a));
        assert!(instance.attribute("Size").is_null());

        model.set(b, "Name", Value::Null).unwrap();
        assert!(model.get(b).unwrap().attribute("Name").is_null());
    }

    #[test]
    fn test_unknown_attribute_rejected() {
        let mut model = Model::new();
        let a = model.insert(&NODE).unwrap();
        let err = model.set(a, "Colour", Value::label("red")).unwrap_err();
        assert!(matches!(err, ModelError::UnknownAttribute { .. }));
        let err = model.set_inverse(a, "Users", Value::Null).unwrap_err();
        assert!(matches!(err, ModelError::UnknownInverse { .. }));
    }

    #[test]
    fn test_non_finite_real_rejected() {
        let mut model = Model::new();
        let a = model.insert(&NODE).unwrap();
        let err = model.set(a, "Size", Value::real("IfcReal", f64::NAN)).unwrap_err();
        assert_eq!(
            err,
            ModelError::NonFiniteReal {
                entity: "TestNode",
                attribute: "Size"
            }
        );
    }

    #[test]
    fn test_dangling_handle_rejected() {
        let mut model = Model::new();
        let a = model.insert(&NODE).unwrap();
        let gone = model.insert(&NODE).unwrap();
        model.remove(gone);
        let err = model.set(a, "Next", Value::list([Value::Ref(gone)])).unwrap_err();
        assert_eq!(err, ModelError::MissingEntity(gone));
        // A failed create leaves nothing behind.
        assert!(model.create(&NODE, [("Next", Value::Ref(gone))]).is_err());
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn test_identity_is_structural() {
        let mut model = Model::new();
        let a = model.create(&NODE, [("Name", Value::label("x"))]).unwrap();
        let b = model.create(&NODE, [("Name", Value::label("x"))]).unwrap();
        let c = model.create(&NODE, [("Name", Value::label("y"))]).unwrap();

        let id = |key| model.get(key).unwrap().identity();
        assert_eq!(id(a), id(b));
        assert_ne!(id(a), id(c));
    }

    #[test]
    fn test_identity_ignores_inverses() {
        let mut model = Model::new();
        let a = model.create(&NODE, [("Size", Value::integer("IfcInteger", 1))]).unwrap();
        let b = model.create(&NODE, [("Next", Value::Ref(a))]).unwrap();
        let before = model.get(a).unwrap().identity();

        // a <-> b cycle through the inverse slot
        model.push_inverse(a, "Owners", b).unwrap();
        model.push_inverse(a, "Owners", b).unwrap();
        assert_eq!(model.get(a).unwrap().identity(), before);
        assert_eq!(
            model.get(a).unwrap().inverse("Owners"),
            Some(&Value::set([Value::Ref(b), Value::Ref(b)]))
        );
    }

    #[test]
    fn test_types_are_distinct() {
        let mut model = Model::new();
        model.insert(&NODE).unwrap();
        model.insert(&NODE).unwrap();
        let types = model.types();
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].name, "TestNode");
        assert_eq!(model.iter().count(), 2);
        assert_eq!(
            model.iter().next().map(|(_, instance)| instance.identity().type_name()),
            Some("TestNode")
        );
    }
}
