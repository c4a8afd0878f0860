//! IFC4 entity declarations.
//!
//! Attribute order follows the IFC4 EXPRESS schema. Only the inverse
//! attributes the exporter needs to reach relationship objects are declared.

use crate::schema::{AttributeDef as A, InverseDef as I, TypeDef};

// Kernel

pub static IFC_ROOT: TypeDef = TypeDef {
    name: "IfcRoot",
    supertype: None,
    is_abstract: true,
    attributes: &[
        A::new("GlobalId", 0),
        A::new("OwnerHistory", 1),
        A::new("Name", 2),
        A::new("Description", 3),
    ],
    inverses: &[],
    derived: &[],
};

pub static IFC_OBJECT_DEFINITION: TypeDef = TypeDef {
    name: "IfcObjectDefinition",
    supertype: Some(&IFC_ROOT),
    is_abstract: true,
    attributes: &[],
    inverses: &[I::new("IsDecomposedBy", 0), I::new("Decomposes", 1)],
    derived: &[],
};

pub static IFC_OBJECT: TypeDef = TypeDef {
    name: "IfcObject",
    supertype: Some(&IFC_OBJECT_DEFINITION),
    is_abstract: true,
    attributes: &[A::new("ObjectType", 4)],
    inverses: &[I::new("IsDefinedBy", 0)],
    derived: &[],
};

pub static IFC_CONTEXT: TypeDef = TypeDef {
    name: "IfcContext",
    supertype: Some(&IFC_OBJECT_DEFINITION),
    is_abstract: true,
    attributes: &[
        A::new("ObjectType", 4),
        A::new("LongName", 5),
        A::new("Phase", 6),
        A::new("RepresentationContexts", 7),
        A::new("UnitsInContext", 8),
    ],
    inverses: &[],
    derived: &[],
};

pub static IFC_PROJECT: TypeDef = TypeDef {
    name: "IfcProject",
    supertype: Some(&IFC_CONTEXT),
    is_abstract: false,
    attributes: &[],
    inverses: &[],
    derived: &[],
};

// Products and spatial structure

pub static IFC_PRODUCT: TypeDef = TypeDef {
    name: "IfcProduct",
    supertype: Some(&IFC_OBJECT),
    is_abstract: true,
    attributes: &[A::new("ObjectPlacement", 5), A::new("Representation", 6)],
    inverses: &[],
    derived: &[],
};

pub static IFC_ELEMENT: TypeDef = TypeDef {
    name: "IfcElement",
    supertype: Some(&IFC_PRODUCT),
    is_abstract: true,
    attributes: &[A::new("Tag", 7)],
    inverses: &[I::new("ContainedInStructure", 0)],
    derived: &[],
};

pub static IFC_BUILDING_ELEMENT: TypeDef = TypeDef {
    name: "IfcBuildingElement",
    supertype: Some(&IFC_ELEMENT),
    is_abstract: true,
    attributes: &[],
    inverses: &[],
    derived: &[],
};

pub static IFC_WALL: TypeDef = TypeDef {
    name: "IfcWall",
    supertype: Some(&IFC_BUILDING_ELEMENT),
    is_abstract: false,
    attributes: &[A::new("PredefinedType", 8)],
    inverses: &[],
    derived: &[],
};

pub static IFC_SPATIAL_ELEMENT: TypeDef = TypeDef {
    name: "IfcSpatialElement",
    supertype: Some(&IFC_PRODUCT),
    is_abstract: true,
    attributes: &[A::new("LongName", 7)],
    inverses: &[I::new("ContainsElements", 0)],
    derived: &[],
};

pub static IFC_SPATIAL_STRUCTURE_ELEMENT: TypeDef = TypeDef {
    name: "IfcSpatialStructureElement",
    supertype: Some(&IFC_SPATIAL_ELEMENT),
    is_abstract: true,
    attributes: &[A::new("CompositionType", 8)],
    inverses: &[],
    derived: &[],
};

pub static IFC_BUILDING: TypeDef = TypeDef {
    name: "IfcBuilding",
    supertype: Some(&IFC_SPATIAL_STRUCTURE_ELEMENT),
    is_abstract: false,
    attributes: &[
        A::new("ElevationOfRefHeight", 9),
        A::new("ElevationOfTerrain", 10),
        A::new("BuildingAddress", 11),
    ],
    inverses: &[],
    derived: &[],
};

// Relationships

pub static IFC_RELATIONSHIP: TypeDef = TypeDef {
    name: "IfcRelationship",
    supertype: Some(&IFC_ROOT),
    is_abstract: true,
    attributes: &[],
    inverses: &[],
    derived: &[],
};

pub static IFC_REL_DECOMPOSES: TypeDef = TypeDef {
    name: "IfcRelDecomposes",
    supertype: Some(&IFC_RELATIONSHIP),
    is_abstract: true,
    attributes: &[],
    inverses: &[],
    derived: &[],
};

pub static IFC_REL_AGGREGATES: TypeDef = TypeDef {
    name: "IfcRelAggregates",
    supertype: Some(&IFC_REL_DECOMPOSES),
    is_abstract: false,
    attributes: &[A::new("RelatingObject", 4), A::new("RelatedObjects", 5)],
    inverses: &[],
    derived: &[],
};

pub static IFC_REL_CONNECTS: TypeDef = TypeDef {
    name: "IfcRelConnects",
    supertype: Some(&IFC_RELATIONSHIP),
    is_abstract: true,
    attributes: &[],
    inverses: &[],
    derived: &[],
};

pub static IFC_REL_CONTAINED_IN_SPATIAL_STRUCTURE: TypeDef = TypeDef {
    name: "IfcRelContainedInSpatialStructure",
    supertype: Some(&IFC_REL_CONNECTS),
    is_abstract: false,
    attributes: &[A::new("RelatedElements", 4), A::new("RelatingStructure", 5)],
    inverses: &[],
    derived: &[],
};

pub static IFC_REL_DEFINES: TypeDef = TypeDef {
    name: "IfcRelDefines",
    supertype: Some(&IFC_RELATIONSHIP),
    is_abstract: true,
    attributes: &[],
    inverses: &[],
    derived: &[],
};

pub static IFC_REL_DEFINES_BY_PROPERTIES: TypeDef = TypeDef {
    name: "IfcRelDefinesByProperties",
    supertype: Some(&IFC_REL_DEFINES),
    is_abstract: false,
    attributes: &[
        A::new("RelatedObjects", 4),
        A::new("RelatingPropertyDefinition", 5),
    ],
    inverses: &[],
    derived: &[],
};

// Properties

pub static IFC_PROPERTY_DEFINITION: TypeDef = TypeDef {
    name: "IfcPropertyDefinition",
    supertype: Some(&IFC_ROOT),
    is_abstract: true,
    attributes: &[],
    inverses: &[],
    derived: &[],
};

pub static IFC_PROPERTY_SET_DEFINITION: TypeDef = TypeDef {
    name: "IfcPropertySetDefinition",
    supertype: Some(&IFC_PROPERTY_DEFINITION),
    is_abstract: true,
    attributes: &[],
    inverses: &[],
    derived: &[],
};

pub static IFC_PROPERTY_SET: TypeDef = TypeDef {
    name: "IfcPropertySet",
    supertype: Some(&IFC_PROPERTY_SET_DEFINITION),
    is_abstract: false,
    attributes: &[A::new("HasProperties", 4)],
    inverses: &[],
    derived: &[],
};

pub static IFC_PROPERTY: TypeDef = TypeDef {
    name: "IfcProperty",
    supertype: None,
    is_abstract: true,
    attributes: &[A::new("Name", 0), A::new("Description", 1)],
    inverses: &[],
    derived: &[],
};

pub static IFC_SIMPLE_PROPERTY: TypeDef = TypeDef {
    name: "IfcSimpleProperty",
    supertype: Some(&IFC_PROPERTY),
    is_abstract: true,
    attributes: &[],
    inverses: &[],
    derived: &[],
};

pub static IFC_PROPERTY_SINGLE_VALUE: TypeDef = TypeDef {
    name: "IfcPropertySingleValue",
    supertype: Some(&IFC_SIMPLE_PROPERTY),
    is_abstract: false,
    attributes: &[A::select("NominalValue", 2), A::new("Unit", 3)],
    inverses: &[],
    derived: &[],
};

pub static IFC_PROPERTY_ENUMERATED_VALUE: TypeDef = TypeDef {
    name: "IfcPropertyEnumeratedValue",
    supertype: Some(&IFC_SIMPLE_PROPERTY),
    is_abstract: false,
    attributes: &[
        A::select("EnumerationValues", 2),
        A::new("EnumerationReference", 3),
    ],
    inverses: &[],
    derived: &[],
};

// Actors and ownership

pub static IFC_PERSON: TypeDef = TypeDef {
    name: "IfcPerson",
    supertype: None,
    is_abstract: false,
    attributes: &[
        A::new("Identification", 0),
        A::new("FamilyName", 1),
        A::new("GivenName", 2),
        A::new("MiddleNames", 3),
        A::new("PrefixTitles", 4),
        A::new("SuffixTitles", 5),
        A::new("Roles", 6),
        A::new("Addresses", 7),
    ],
    inverses: &[I::new("EngagedIn", 0)],
    derived: &[],
};

pub static IFC_ORGANIZATION: TypeDef = TypeDef {
    name: "IfcOrganization",
    supertype: None,
    is_abstract: false,
    attributes: &[
        A::new("Identification", 0),
        A::new("Name", 1),
        A::new("Description", 2),
        A::new("Roles", 3),
        A::new("Addresses", 4),
    ],
    inverses: &[I::new("Engages", 0)],
    derived: &[],
};

pub static IFC_PERSON_AND_ORGANIZATION: TypeDef = TypeDef {
    name: "IfcPersonAndOrganization",
    supertype: None,
    is_abstract: false,
    attributes: &[
        A::new("ThePerson", 0),
        A::new("TheOrganization", 1),
        A::new("Roles", 2),
    ],
    inverses: &[],
    derived: &[],
};

pub static IFC_APPLICATION: TypeDef = TypeDef {
    name: "IfcApplication",
    supertype: None,
    is_abstract: false,
    attributes: &[
        A::new("ApplicationDeveloper", 0),
        A::new("Version", 1),
        A::new("ApplicationFullName", 2),
        A::new("ApplicationIdentifier", 3),
    ],
    inverses: &[],
    derived: &[],
};

pub static IFC_OWNER_HISTORY: TypeDef = TypeDef {
    name: "IfcOwnerHistory",
    supertype: None,
    is_abstract: false,
    attributes: &[
        A::new("OwningUser", 0),
        A::new("OwningApplication", 1),
        A::new("State", 2),
        A::new("ChangeAction", 3),
        A::new("LastModifiedDate", 4),
        A::new("LastModifyingUser", 5),
        A::new("LastModifyingApplication", 6),
        A::new("CreationDate", 7),
    ],
    inverses: &[],
    derived: &[],
};

// Units

pub static IFC_NAMED_UNIT: TypeDef = TypeDef {
    name: "IfcNamedUnit",
    supertype: None,
    is_abstract: true,
    attributes: &[A::new("Dimensions", 0), A::new("UnitType", 1)],
    inverses: &[],
    derived: &[],
};

pub static IFC_SI_UNIT: TypeDef = TypeDef {
    name: "IfcSIUnit",
    supertype: Some(&IFC_NAMED_UNIT),
    is_abstract: false,
    attributes: &[A::new("Prefix", 2), A::new("Name", 3)],
    inverses: &[],
    derived: &["Dimensions"],
};

pub static IFC_UNIT_ASSIGNMENT: TypeDef = TypeDef {
    name: "IfcUnitAssignment",
    supertype: None,
    is_abstract: false,
    attributes: &[A::new("Units", 0)],
    inverses: &[],
    derived: &[],
};

// Geometry

pub static IFC_REPRESENTATION_ITEM: TypeDef = TypeDef {
    name: "IfcRepresentationItem",
    supertype: None,
    is_abstract: true,
    attributes: &[],
    inverses: &[],
    derived: &[],
};

pub static IFC_GEOMETRIC_REPRESENTATION_ITEM: TypeDef = TypeDef {
    name: "IfcGeometricRepresentationItem",
    supertype: Some(&IFC_REPRESENTATION_ITEM),
    is_abstract: true,
    attributes: &[],
    inverses: &[],
    derived: &[],
};

pub static IFC_CARTESIAN_POINT: TypeDef = TypeDef {
    name: "IfcCartesianPoint",
    supertype: Some(&IFC_GEOMETRIC_REPRESENTATION_ITEM),
    is_abstract: false,
    attributes: &[A::new("Coordinates", 0)],
    inverses: &[],
    derived: &[],
};

pub static IFC_DIRECTION: TypeDef = TypeDef {
    name: "IfcDirection",
    supertype: Some(&IFC_GEOMETRIC_REPRESENTATION_ITEM),
    is_abstract: false,
    attributes: &[A::new("DirectionRatios", 0)],
    inverses: &[],
    derived: &[],
};

pub static IFC_PLACEMENT: TypeDef = TypeDef {
    name: "IfcPlacement",
    supertype: Some(&IFC_GEOMETRIC_REPRESENTATION_ITEM),
    is_abstract: true,
    attributes: &[A::new("Location", 0)],
    inverses: &[],
    derived: &[],
};

pub static IFC_AXIS2_PLACEMENT_3D: TypeDef = TypeDef {
    name: "IfcAxis2Placement3D",
    supertype: Some(&IFC_PLACEMENT),
    is_abstract: false,
    attributes: &[A::new("Axis", 1), A::new("RefDirection", 2)],
    inverses: &[],
    derived: &[],
};

pub static IFC_CSG_PRIMITIVE_3D: TypeDef = TypeDef {
    name: "IfcCsgPrimitive3D",
    supertype: Some(&IFC_GEOMETRIC_REPRESENTATION_ITEM),
    is_abstract: true,
    attributes: &[A::new("Position", 0)],
    inverses: &[],
    derived: &[],
};

pub static IFC_RIGHT_CIRCULAR_CYLINDER: TypeDef = TypeDef {
    name: "IfcRightCircularCylinder",
    supertype: Some(&IFC_CSG_PRIMITIVE_3D),
    is_abstract: false,
    attributes: &[A::new("Height", 1), A::new("Radius", 2)],
    inverses: &[],
    derived: &[],
};

pub static IFC_OBJECT_PLACEMENT: TypeDef = TypeDef {
    name: "IfcObjectPlacement",
    supertype: None,
    is_abstract: true,
    attributes: &[A::new("PlacementRelTo", 0)],
    inverses: &[],
    derived: &[],
};

pub static IFC_LOCAL_PLACEMENT: TypeDef = TypeDef {
    name: "IfcLocalPlacement",
    supertype: Some(&IFC_OBJECT_PLACEMENT),
    is_abstract: false,
    attributes: &[A::new("RelativePlacement", 1)],
    inverses: &[],
    derived: &[],
};

// Representation

pub static IFC_REPRESENTATION_CONTEXT: TypeDef = TypeDef {
    name: "IfcRepresentationContext",
    supertype: None,
    is_abstract: true,
    attributes: &[A::new("ContextIdentifier", 0), A::new("ContextType", 1)],
    inverses: &[],
    derived: &[],
};

pub static IFC_GEOMETRIC_REPRESENTATION_CONTEXT: TypeDef = TypeDef {
    name: "IfcGeometricRepresentationContext",
    supertype: Some(&IFC_REPRESENTATION_CONTEXT),
    is_abstract: false,
    attributes: &[
        A::new("CoordinateSpaceDimension", 2),
        A::new("Precision", 3),
        A::new("WorldCoordinateSystem", 4),
        A::new("TrueNorth", 5),
    ],
    inverses: &[],
    derived: &[],
};

pub static IFC_REPRESENTATION: TypeDef = TypeDef {
    name: "IfcRepresentation",
    supertype: None,
    is_abstract: true,
    attributes: &[
        A::new("ContextOfItems", 0),
        A::new("RepresentationIdentifier", 1),
        A::new("RepresentationType", 2),
        A::new("Items", 3),
    ],
    inverses: &[],
    derived: &[],
};

pub static IFC_SHAPE_MODEL: TypeDef = TypeDef {
    name: "IfcShapeModel",
    supertype: Some(&IFC_REPRESENTATION),
    is_abstract: true,
    attributes: &[],
    inverses: &[],
    derived: &[],
};

pub static IFC_SHAPE_REPRESENTATION: TypeDef = TypeDef {
    name: "IfcShapeRepresentation",
    supertype: Some(&IFC_SHAPE_MODEL),
    is_abstract: false,
    attributes: &[],
    inverses: &[],
    derived: &[],
};

pub static IFC_PRODUCT_REPRESENTATION: TypeDef = TypeDef {
    name: "IfcProductRepresentation",
    supertype: None,
    is_abstract: true,
    attributes: &[
        A::new("Name", 0),
        A::new("Description", 1),
        A::new("Representations", 2),
    ],
    inverses: &[],
    derived: &[],
};

pub static IFC_PRODUCT_DEFINITION_SHAPE: TypeDef = TypeDef {
    name: "IfcProductDefinitionShape",
    supertype: Some(&IFC_PRODUCT_REPRESENTATION),
    is_abstract: false,
    attributes: &[],
    inverses: &[I::new("ShapeOfProduct", 0)],
    derived: &[],
};

/// Every declared type, supertypes first.
pub static ALL_TYPES: &[&TypeDef] = &[
    &IFC_ROOT,
    &IFC_OBJECT_DEFINITION,
    &IFC_OBJECT,
    &IFC_CONTEXT,
    &IFC_PROJECT,
    &IFC_PRODUCT,
    &IFC_ELEMENT,
    &IFC_BUILDING_ELEMENT,
    &IFC_WALL,
    &IFC_SPATIAL_ELEMENT,
    &IFC_SPATIAL_STRUCTURE_ELEMENT,
    &IFC_BUILDING,
    &IFC_RELATIONSHIP,
    &IFC_REL_DECOMPOSES,
    &IFC_REL_AGGREGATES,
    &IFC_REL_CONNECTS,
    &IFC_REL_CONTAINED_IN_SPATIAL_STRUCTURE,
    &IFC_REL_DEFINES,
    &IFC_REL_DEFINES_BY_PROPERTIES,
    &IFC_PROPERTY_DEFINITION,
    &IFC_PROPERTY_SET_DEFINITION,
    &IFC_PROPERTY_SET,
    &IFC_PROPERTY,
    &IFC_SIMPLE_PROPERTY,
    &IFC_PROPERTY_SINGLE_VALUE,
    &IFC_PROPERTY_ENUMERATED_VALUE,
    &IFC_PERSON,
    &IFC_ORGANIZATION,
    &IFC_PERSON_AND_ORGANIZATION,
    &IFC_APPLICATION,
    &IFC_OWNER_HISTORY,
    &IFC_NAMED_UNIT,
    &IFC_SI_UNIT,
    &IFC_UNIT_ASSIGNMENT,
    &IFC_REPRESENTATION_ITEM,
    &IFC_GEOMETRIC_REPRESENTATION_ITEM,
    &IFC_CARTESIAN_POINT,
    &IFC_DIRECTION,
    &IFC_PLACEMENT,
    &IFC_AXIS2_PLACEMENT_3D,
    &IFC_CSG_PRIMITIVE_3D,
    &IFC_RIGHT_CIRCULAR_CYLINDER,
    &IFC_OBJECT_PLACEMENT,
    &IFC_LOCAL_PLACEMENT,
    &IFC_REPRESENTATION_CONTEXT,
    &IFC_GEOMETRIC_REPRESENTATION_CONTEXT,
    &IFC_REPRESENTATION,
    &IFC_SHAPE_MODEL,
    &IFC_SHAPE_REPRESENTATION,
    &IFC_PRODUCT_REPRESENTATION,
    &IFC_PRODUCT_DEFINITION_SHAPE,
];
