//! Resolved attribute metadata for an entity type.
//!
//! [`EntityDescriptor::resolve`] flattens a [`TypeDef`] and its supertypes into
//! the record layout the exporter needs: forward attributes sorted by order
//! index, inverse attributes in their own sequence, and the set of attributes
//! this concrete type writes as derived. Descriptors are immutable, so
//! [`descriptor_for`] caches one per type for the life of the process.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use crate::error::MetadataError;
use crate::schema::{TypeDef, ValueKind};

/// A forward attribute in record position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardAttribute {
    /// Attribute name.
    pub name: &'static str,
    /// Order index; records list attributes ascending by this.
    pub order: u16,
    /// Rendering kind.
    pub kind: ValueKind,
    /// Type that declared the attribute.
    pub declared_in: &'static str,
    /// Written as `*` for this concrete type.
    pub derived: bool,
}

/// An inverse attribute, deferred until after the owning record is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InverseAttribute {
    /// Attribute name.
    pub name: &'static str,
    /// Order index among inverse attributes.
    pub order: u16,
    /// Type that declared the attribute.
    pub declared_in: &'static str,
}

/// Flattened metadata for one concrete entity type.
#[derive(Debug, Clone)]
pub struct EntityDescriptor {
    type_name: &'static str,
    tag: String,
    forward: Vec<ForwardAttribute>,
    inverse: Vec<InverseAttribute>,
    derived: BTreeSet<&'static str>,
}

impl EntityDescriptor {
    /// Resolve the metadata of `ty`, merging every supertype's declarations.
    ///
    /// Fails if a forward attribute has no order index, if two forward
    /// attributes share one, or if a derived override names an attribute the
    /// chain does not declare.
    pub fn resolve(ty: &'static TypeDef) -> Result<Self, MetadataError> {
        let mut chain: Vec<&'static TypeDef> = ty.chain().collect();
        chain.reverse();

        let derived: BTreeSet<&'static str> = chain
            .iter()
            .flat_map(|t| t.derived.iter().copied())
            .collect();

        let mut forward = Vec::new();
        let mut claimed: HashMap<u16, &'static str> = HashMap::new();
        for t in &chain {
            for attr in t.attributes {
                let order = attr.order.ok_or(MetadataError::MissingOrder {
                    entity: ty.name,
                    attribute: attr.name,
                })?;
                if let Some(first) = claimed.insert(order, attr.name) {
                    return Err(MetadataError::DuplicateOrder {
                        entity: ty.name,
                        order,
                        first,
                        second: attr.name,
                    });
                }
                forward.push(ForwardAttribute {
                    name: attr.name,
                    order,
                    kind: attr.kind,
                    declared_in: t.name,
                    derived: derived.contains(attr.name),
                });
            }
        }
        forward.sort_by_key(|attr| attr.order);

        if let Some(unknown) = derived
            .iter()
            .copied()
            .find(|name| !forward.iter().any(|attr| attr.name == *name))
        {
            return Err(MetadataError::UnknownDerived {
                entity: ty.name,
                attribute: unknown,
            });
        }

        // Stable sort keeps supertype declarations ahead on equal indices.
        let mut inverse: Vec<InverseAttribute> = chain
            .iter()
            .flat_map(|t| {
                t.inverses.iter().map(|inv| InverseAttribute {
                    name: inv.name,
                    order: inv.order,
                    declared_in: t.name,
                })
            })
            .collect();
        inverse.sort_by_key(|inv| inv.order);

        Ok(Self {
            type_name: ty.name,
            tag: ty.step_tag(),
            forward,
            inverse,
            derived,
        })
    }

    /// Schema name of the type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Uppercase record tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Forward attributes in record order.
    pub fn forward(&self) -> &[ForwardAttribute] {
        &self.forward
    }

    /// Inverse attributes in their own order.
    pub fn inverse(&self) -> &[InverseAttribute] {
        &self.inverse
    }

    /// Whether `name` is written as `*` for this type.
    pub fn is_derived(&self, name: &str) -> bool {
        self.derived.contains(name)
    }

    /// Names written as `*` for this type.
    pub fn derived(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.derived.iter().copied()
    }
}

type DescriptorCache = RwLock<HashMap<usize, Arc<EntityDescriptor>>>;

static DESCRIPTORS: OnceLock<DescriptorCache> = OnceLock::new();

/// Cached [`EntityDescriptor::resolve`]. Each type is resolved at most once
/// successfully; failures are not cached.
pub fn descriptor_for(ty: &'static TypeDef) -> Result<Arc<EntityDescriptor>, MetadataError> {
    let cache = DESCRIPTORS.get_or_init(Default::default);
    let key = ty as *const TypeDef as usize;

    if let Some(descriptor) = cache.read().get(&key) {
        return Ok(Arc::clone(descriptor));
    }

    let resolved = Arc::new(EntityDescriptor::resolve(ty)?);
    let mut cache = cache.write();
    Ok(Arc::clone(cache.entry(key).or_insert(resolved)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AttributeDef, InverseDef};

    static ROOT: TypeDef = TypeDef {
        name: "TestRoot",
        supertype: None,
        is_abstract: true,
        attributes: &[AttributeDef::new("Id", 0), AttributeDef::new("Name", 1)],
        inverses: &[InverseDef::new("Owners", 1)],
        derived: &[],
    };

    // Declares its attributes out of order on purpose.
    static SHAPE: TypeDef = TypeDef {
        name: "TestShape",
        supertype: Some(&ROOT),
        is_abstract: false,
        attributes: &[AttributeDef::new("Radius", 3), AttributeDef::select("Tag", 2)],
        inverses: &[InverseDef::new("Users", 0)],
        derived: &[],
    };

    static DERIVED_SHAPE: TypeDef = TypeDef {
        name: "TestDerivedShape",
        supertype: Some(&SHAPE),
        is_abstract: false,
        attributes: &[],
        inverses: &[],
        derived: &["Name"],
    };

    static CLASHING: TypeDef = TypeDef {
        name: "TestClashing",
        supertype: Some(&ROOT),
        is_abstract: false,
        attributes: &[AttributeDef::new("Other", 1)],
        inverses: &[],
        derived: &[],
    };

    static UNORDERED: TypeDef = TypeDef {
        name: "TestUnordered",
        supertype: Some(&ROOT),
        is_abstract: false,
        attributes: &[AttributeDef::unordered("Loose")],
        inverses: &[],
        derived: &[],
    };

    static BAD_OVERRIDE: TypeDef = TypeDef {
        name: "TestBadOverride",
        supertype: Some(&ROOT),
        is_abstract: false,
        attributes: &[],
        inverses: &[],
        derived: &["Nope"],
    };

    #[test]
    fn test_merges_hierarchy_in_order() {
        let d = EntityDescriptor::resolve(&SHAPE).unwrap();
        let names: Vec<_> = d.forward().iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["Id", "Name", "Tag", "Radius"]);
        assert_eq!(d.forward()[0].declared_in, "TestRoot");
        assert_eq!(d.forward()[2].kind, ValueKind::Select);
        assert_eq!(d.tag(), "TESTSHAPE");

        let inverses: Vec<_> = d.inverse().iter().map(|a| a.name).collect();
        assert_eq!(inverses, vec!["Users", "Owners"]);
    }

    #[test]
    fn test_derived_override_applies_to_concrete_type_only() {
        let derived = EntityDescriptor::resolve(&DERIVED_SHAPE).unwrap();
        assert!(derived.is_derived("Name"));
        assert!(derived.forward()[1].derived);
        assert_eq!(derived.derived().collect::<Vec<_>>(), vec!["Name"]);

        let plain = EntityDescriptor::resolve(&SHAPE).unwrap();
        assert!(!plain.is_derived("Name"));
    }

    #[test]
    fn test_duplicate_order_is_rejected() {
        let err = EntityDescriptor::resolve(&CLASHING).unwrap_err();
        assert_eq!(
            err,
            MetadataError::DuplicateOrder {
                entity: "TestClashing",
                order: 1,
                first: "Name",
                second: "Other",
            }
        );
    }

    #[test]
    fn test_missing_order_is_rejected() {
        let err = EntityDescriptor::resolve(&UNORDERED).unwrap_err();
        assert_eq!(
            err,
            MetadataError::MissingOrder {
                entity: "TestUnordered",
                attribute: "Loose",
            }
        );
    }

    #[test]
    fn test_unknown_derived_is_rejected() {
        let err = EntityDescriptor::resolve(&BAD_OVERRIDE).unwrap_err();
        assert!(matches!(err, MetadataError::UnknownDerived { attribute: "Nope", .. }));
    }

    #[test]
    fn test_cache_resolves_once() {
        let a = descriptor_for(&SHAPE).unwrap();
        let b = descriptor_for(&SHAPE).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(descriptor_for(&CLASHING).is_err());
    }
}
