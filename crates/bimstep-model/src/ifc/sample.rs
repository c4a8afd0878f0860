//! A minimal but complete IFC project: owner history, units, one building
//! containing one wall with a cylindrical body and a property set.

use crate::error::Result;
use crate::model::{EntityKey, Model};
use crate::value::Value;

use super::schema::*;

/// Handles of the interesting instances in the sample project.
#[derive(Debug, Clone, Copy)]
pub struct SampleProject {
    /// The `IfcProject` root.
    pub project: EntityKey,
    /// The owning user's `IfcPerson`.
    pub person: EntityKey,
    /// The shared `IfcOwnerHistory`.
    pub owner_history: EntityKey,
    /// The world coordinate system, shared by the context and the placements.
    pub world: EntityKey,
    /// The `IfcBuilding`.
    pub building: EntityKey,
    /// The `IfcWall`.
    pub wall: EntityKey,
}

/// Populate `model` with the sample project and return its handles.
///
/// The building and the wall are reachable from the project only through
/// inverse attributes (`IsDecomposedBy`, `ContainsElements`, `IsDefinedBy`).
pub fn simple_wall_project(model: &mut Model) -> Result<SampleProject> {
    let person = model.create(&IFC_PERSON, [("GivenName", Value::label(""))])?;
    let organization = model.create(&IFC_ORGANIZATION, [("Name", Value::label("bimstep"))])?;
    let user = model.create(
        &IFC_PERSON_AND_ORGANIZATION,
        [
            ("ThePerson", Value::Ref(person)),
            ("TheOrganization", Value::Ref(organization)),
        ],
    )?;
    let application = model.create(
        &IFC_APPLICATION,
        [
            ("ApplicationDeveloper", Value::Ref(organization)),
            ("Version", Value::label("0.1")),
            ("ApplicationFullName", Value::label("bimstep")),
            ("ApplicationIdentifier", Value::string("IfcIdentifier", "bimstep")),
        ],
    )?;
    let owner_history = model.create(
        &IFC_OWNER_HISTORY,
        [
            ("OwningUser", Value::Ref(user)),
            ("OwningApplication", Value::Ref(application)),
            ("ChangeAction", Value::enumeration("IfcChangeActionEnum", "ADDED")),
            ("CreationDate", Value::integer("IfcTimeStamp", 1_700_000_000)),
        ],
    )?;

    let origin = model.create(
        &IFC_CARTESIAN_POINT,
        [("Coordinates", lengths(&[0.0, 0.0, 0.0]))],
    )?;
    let world = model.create(&IFC_AXIS2_PLACEMENT_3D, [("Location", Value::Ref(origin))])?;
    let context = model.create(
        &IFC_GEOMETRIC_REPRESENTATION_CONTEXT,
        [
            ("ContextType", Value::label("Model")),
            ("CoordinateSpaceDimension", Value::integer("IfcDimensionCount", 3)),
            ("Precision", Value::real("IfcReal", 0.001)),
            ("WorldCoordinateSystem", Value::Ref(world)),
        ],
    )?;

    let millimetre = model.create(
        &IFC_SI_UNIT,
        [
            ("UnitType", Value::enumeration("IfcUnitEnum", "LENGTHUNIT")),
            ("Prefix", Value::enumeration("IfcSIPrefix", "MILLI")),
            ("Name", Value::enumeration("IfcSIUnitName", "METRE")),
        ],
    )?;
    let units = model.create(
        &IFC_UNIT_ASSIGNMENT,
        [("Units", Value::set([Value::Ref(millimetre)]))],
    )?;

    let project = model.create(
        &IFC_PROJECT,
        [
            ("GlobalId", guid("0YvctVUKr0kugbFTf53O9L")),
            ("OwnerHistory", Value::Ref(owner_history)),
            ("Name", Value::label("Sample project")),
            ("RepresentationContexts", Value::set([Value::Ref(context)])),
            ("UnitsInContext", Value::Ref(units)),
        ],
    )?;

    let placement = model.create(
        &IFC_LOCAL_PLACEMENT,
        [("RelativePlacement", Value::Ref(world))],
    )?;
    let building = model.create(
        &IFC_BUILDING,
        [
            ("GlobalId", guid("2FCZDorxHDT8NI01kdXi8P")),
            ("OwnerHistory", Value::Ref(owner_history)),
            ("Name", Value::label("Building")),
            ("ObjectPlacement", Value::Ref(placement)),
            ("CompositionType", Value::enumeration("IfcElementCompositionEnum", "ELEMENT")),
        ],
    )?;

    let cylinder = model.create(
        &IFC_RIGHT_CIRCULAR_CYLINDER,
        [
            ("Position", Value::Ref(world)),
            ("Height", Value::real("IfcPositiveLengthMeasure", 3000.0)),
            ("Radius", Value::real("IfcPositiveLengthMeasure", 150.0)),
        ],
    )?;
    let body = model.create(
        &IFC_SHAPE_REPRESENTATION,
        [
            ("ContextOfItems", Value::Ref(context)),
            ("RepresentationIdentifier", Value::label("Body")),
            ("RepresentationType", Value::label("CSG")),
            ("Items", Value::set([Value::Ref(cylinder)])),
        ],
    )?;
    let shape = model.create(
        &IFC_PRODUCT_DEFINITION_SHAPE,
        [("Representations", Value::list([Value::Ref(body)]))],
    )?;
    let wall = model.create(
        &IFC_WALL,
        [
            ("GlobalId", guid("1hOSvn6df7F8_7GcBWlRGQ")),
            ("OwnerHistory", Value::Ref(owner_history)),
            ("Name", Value::label("Wall")),
            ("ObjectPlacement", Value::Ref(placement)),
            ("Representation", Value::Ref(shape)),
            ("PredefinedType", Value::enumeration("IfcWallTypeEnum", "STANDARD")),
        ],
    )?;
    model.push_inverse(shape, "ShapeOfProduct", wall)?;

    let aggregates = model.create(
        &IFC_REL_AGGREGATES,
        [
            ("GlobalId", guid("3Ww0dFXf5Dp8vD0Gj3bWz$")),
            ("OwnerHistory", Value::Ref(owner_history)),
            ("RelatingObject", Value::Ref(project)),
            ("RelatedObjects", Value::set([Value::Ref(building)])),
        ],
    )?;
    model.push_inverse(project, "IsDecomposedBy", aggregates)?;
    model.push_inverse(building, "Decomposes", aggregates)?;

    let containment = model.create(
        &IFC_REL_CONTAINED_IN_SPATIAL_STRUCTURE,
        [
            ("GlobalId", guid("0Xx9ZzY8n5Iv2mZC7vyL1g")),
            ("OwnerHistory", Value::Ref(owner_history)),
            ("RelatedElements", Value::set([Value::Ref(wall)])),
            ("RelatingStructure", Value::Ref(building)),
        ],
    )?;
    model.push_inverse(building, "ContainsElements", containment)?;
    model.push_inverse(wall, "ContainedInStructure", containment)?;

    let is_external = model.create(
        &IFC_PROPERTY_SINGLE_VALUE,
        [
            ("Name", Value::string("IfcIdentifier", "IsExternal")),
            ("NominalValue", Value::boolean("IfcBoolean", true)),
        ],
    )?;
    let status = model.create(
        &IFC_PROPERTY_ENUMERATED_VALUE,
        [
            ("Name", Value::string("IfcIdentifier", "Status")),
            (
                "EnumerationValues",
                Value::list([Value::label("New"), Value::label("Existing")]),
            ),
        ],
    )?;
    let pset = model.create(
        &IFC_PROPERTY_SET,
        [
            ("GlobalId", guid("2Tf0Y3YgD6Wv4rH1x9o_kD")),
            ("OwnerHistory", Value::Ref(owner_history)),
            ("Name", Value::label("Pset_WallCommon")),
            (
                "HasProperties",
                Value::set([Value::Ref(is_external), Value::Ref(status)]),
            ),
        ],
    )?;
    let defines = model.create(
        &IFC_REL_DEFINES_BY_PROPERTIES,
        [
            ("GlobalId", guid("1b0z5Qf4X1EhQ3a7yZp2Lm")),
            ("OwnerHistory", Value::Ref(owner_history)),
            ("RelatedObjects", Value::set([Value::Ref(wall)])),
            ("RelatingPropertyDefinition", Value::Ref(pset)),
        ],
    )?;
    model.push_inverse(wall, "IsDefinedBy", defines)?;

    Ok(SampleProject {
        project,
        person,
        owner_history,
        world,
        building,
        wall,
    })
}

fn guid(value: &str) -> Value {
    Value::string("IfcGloballyUniqueId", value)
}

fn lengths(values: &[f64]) -> Value {
    Value::list(
        values
            .iter()
            .map(|v| Value::real("IfcLengthMeasure", *v)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_builds() {
        let mut model = Model::new();
        let sample = simple_wall_project(&mut model).unwrap();
        assert_eq!(model.len(), 23);

        let wall = model.get(sample.wall).unwrap();
        assert_eq!(wall.type_def().name, "IfcWall");
        assert!(wall.inverse("IsDefinedBy").is_some());
        assert_eq!(
            model.get(sample.project).unwrap().attribute("OwnerHistory").as_entity(),
            Some(sample.owner_history)
        );
    }
}
