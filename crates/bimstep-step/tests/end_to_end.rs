//! Whole-file exports of the bundled sample project.

use std::collections::HashMap;
use std::fs;

use bimstep_model::{ifc, AttributeDef, Model, TypeDef, Value};
use bimstep_step::{
    write_step, write_step_to_buffer, InverseFailurePolicy, StepError, StepHeader, StepWriter,
    WriterOptions,
};

const SAMPLE_DATA: &str = "\
#1=IFCPERSON($,$,'',$,$,$,$,$);
#2=IFCORGANIZATION($,'bimstep',$,$,$);
#3=IFCPERSONANDORGANIZATION(#1,#2,$);
#4=IFCAPPLICATION(#2,'0.1','bimstep','bimstep');
#5=IFCOWNERHISTORY(#3,#4,$,.ADDED.,$,$,$,1700000000);
#6=IFCCARTESIANPOINT((0.,0.,0.));
#7=IFCAXIS2PLACEMENT3D(#6,$,$);
#8=IFCGEOMETRICREPRESENTATIONCONTEXT($,'Model',3,0.001,#7,$);
#9=IFCSIUNIT(*,.LENGTHUNIT.,.MILLI.,.METRE.);
#10=IFCUNITASSIGNMENT((#9));
#11=IFCPROJECT('0YvctVUKr0kugbFTf53O9L',#5,'Sample project',$,$,$,$,(#8),#10);
#12=IFCLOCALPLACEMENT($,#7);
#13=IFCBUILDING('2FCZDorxHDT8NI01kdXi8P',#5,'Building',$,$,#12,$,$,.ELEMENT.,$,$,$);
#14=IFCRELAGGREGATES('3Ww0dFXf5Dp8vD0Gj3bWz$',#5,$,$,#11,(#13));
#15=IFCRIGHTCIRCULARCYLINDER(#7,3000.,150.);
#16=IFCSHAPEREPRESENTATION(#8,'Body','CSG',(#15));
#17=IFCPRODUCTDEFINITIONSHAPE($,$,(#16));
#18=IFCWALL('1hOSvn6df7F8_7GcBWlRGQ',#5,'Wall',$,$,#12,#17,$,.STANDARD.);
#19=IFCRELCONTAINEDINSPATIALSTRUCTURE('0Xx9ZzY8n5Iv2mZC7vyL1g',#5,$,$,(#18),#13);
#20=IFCPROPERTYSINGLEVALUE('IsExternal',$,IFCBOOLEAN(.T.),$);
#21=IFCPROPERTYENUMERATEDVALUE('Status',$,(IFCLABEL('New'),IFCLABEL('Existing')),$);
#22=IFCPROPERTYSET('2Tf0Y3YgD6Wv4rH1x9o_kD',#5,'Pset_WallCommon',$,(#20,#21));
#23=IFCRELDEFINESBYPROPERTIES('1b0z5Qf4X1EhQ3a7yZp2Lm',#5,$,$,(#18),#22);
";

fn sample() -> (Model, ifc::sample::SampleProject) {
    let mut model = Model::new();
    let sample = ifc::sample::simple_wall_project(&mut model).unwrap();
    (model, sample)
}

fn export(model: &Model, root: bimstep_model::EntityKey, options: WriterOptions) -> String {
    let bytes = write_step_to_buffer(model, root, "HEADER;\nENDSEC;\n", options).unwrap();
    String::from_utf8(bytes).unwrap()
}

/// The lines between `DATA;` and the closing `ENDSEC;`.
fn data_section(text: &str) -> String {
    let start = text.find("DATA;\n").unwrap() + "DATA;\n".len();
    let end = text.rfind("ENDSEC;\n").unwrap();
    text[start..end].to_string()
}

/// Each record with every `#id` reference replaced by the referenced
/// record's own canonical text, so the result no longer depends on id order.
fn canonical_records(data: &str) -> Vec<String> {
    let bodies: HashMap<u64, String> = data
        .lines()
        .map(|line| {
            let (id, body) = line.trim_end_matches(';').split_once('=').unwrap();
            (id[1..].parse().unwrap(), body.to_string())
        })
        .collect();

    fn expand(id: u64, bodies: &HashMap<u64, String>, memo: &mut HashMap<u64, String>) -> String {
        if let Some(done) = memo.get(&id) {
            return done.clone();
        }
        let body = &bodies[&id];
        let mut out = String::new();
        let mut rest = body.as_str();
        while let Some(pos) = rest.find('#') {
            out.push_str(&rest[..pos]);
            let digits: String = rest[pos + 1..].chars().take_while(char::is_ascii_digit).collect();
            out.push('{');
            out.push_str(&expand(digits.parse().unwrap(), bodies, memo));
            out.push('}');
            rest = &rest[pos + 1 + digits.len()..];
        }
        out.push_str(rest);
        memo.insert(id, out.clone());
        out
    }

    let mut memo = HashMap::new();
    let mut records: Vec<String> = bodies.keys().map(|&id| expand(id, &bodies, &mut memo)).collect();
    records.sort();
    records
}

#[test]
fn test_sample_project_data_section() {
    let (model, sample) = sample();
    let text = export(&model, sample.project, WriterOptions::sequential());
    assert_eq!(data_section(&text), SAMPLE_DATA);
}

#[test]
fn test_sample_project_envelope() {
    let (model, sample) = sample();
    let text = export(&model, sample.project, WriterOptions::sequential());
    assert!(text.starts_with("ISO-10303-21;\nHEADER;\nENDSEC;\nDATA;\n#1=IFCPERSON("));
    assert!(text.ends_with("ENDSEC;\nEND-ISO-10303-21;\n"));
}

#[test]
fn test_reruns_are_byte_identical() {
    let (model, sample) = sample();
    let first = export(&model, sample.project, WriterOptions::sequential());
    let second = export(&model, sample.project, WriterOptions::sequential());
    assert_eq!(first, second);
}

#[test]
fn test_other_roots() {
    let (model, sample) = sample();

    // the wall reaches the building only through its containment relation
    let text = export(&model, sample.wall, WriterOptions::sequential());
    let data = data_section(&text);
    assert_eq!(data.lines().count(), 23);
    assert!(data.contains("=IFCWALL('1hOSvn6df7F8_7GcBWlRGQ',#5,'Wall',"));

    let text = export(&model, sample.person, WriterOptions::sequential());
    assert_eq!(data_section(&text), "#1=IFCPERSON($,$,'',$,$,$,$,$);\n");
}

#[test]
fn test_parallel_matches_sequential() {
    let (model, sample) = sample();
    let sequential = data_section(&export(&model, sample.project, WriterOptions::sequential()));
    for threads in [1, 2, 8] {
        let parallel = data_section(&export(&model, sample.project, WriterOptions::parallel(threads)));
        assert_eq!(parallel.lines().count(), 23, "{threads} threads");
        assert_eq!(
            canonical_records(&parallel),
            canonical_records(&sequential),
            "{threads} threads"
        );
    }
}

#[test]
fn test_write_step_to_file() {
    let (model, sample) = sample();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.ifc");
    let header = StepHeader::default().with_name("sample.ifc");

    let summary = write_step(&model, sample.project, &header, &path, WriterOptions::default()).unwrap();
    assert_eq!(summary.records, 23);
    assert_eq!(summary.root_id, 11);
    assert_eq!(summary.skipped_inverse, 0);

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("FILE_NAME('sample.ifc',"));
    assert!(content.contains("FILE_SCHEMA(('IFC4'));"));
    assert_eq!(data_section(&content), SAMPLE_DATA);
}

#[test]
fn test_metadata_error_aborts_before_output() {
    static UNORDERED: TypeDef = TypeDef {
        name: "TestUnordered",
        supertype: None,
        is_abstract: false,
        attributes: &[AttributeDef::unordered("Text")],
        inverses: &[],
        derived: &[],
    };

    let (mut model, sample) = sample();
    model.insert(&UNORDERED).unwrap();
    for options in [WriterOptions::sequential(), WriterOptions::parallel(2)] {
        let mut out = Vec::new();
        let err = StepWriter::new(&model)
            .with_options(options)
            .write(sample.project, &StepHeader::default(), &mut out)
            .unwrap_err();
        assert!(matches!(err, StepError::Metadata(_)), "{err}");
        assert!(out.is_empty());
    }
}

#[test]
fn test_dangling_relationship_under_both_policies() {
    let (mut model, sample) = sample();
    let stray = model
        .create(&ifc::IFC_BUILDING, [("Name", Value::label("Gone"))])
        .unwrap();
    let dangling = model
        .create(
            &ifc::IFC_REL_AGGREGATES,
            [
                ("RelatingObject", Value::Ref(sample.project)),
                ("RelatedObjects", Value::set([Value::Ref(stray)])),
            ],
        )
        .unwrap();
    model
        .push_inverse(sample.project, "IsDecomposedBy", dangling)
        .unwrap();
    model.remove(stray);

    for options in [WriterOptions::sequential(), WriterOptions::parallel(4)] {
        let err = StepWriter::new(&model)
            .with_options(options)
            .write(sample.project, "", &mut Vec::new())
            .unwrap_err();
        assert!(matches!(err, StepError::MissingEntity(key) if key == stray));

        let options = options.with_inverse_failure(InverseFailurePolicy::LogAndSkip);
        let summary = StepWriter::new(&model)
            .with_options(options)
            .write(sample.project, "", &mut Vec::new())
            .unwrap();
        assert_eq!(summary.records, 23);
        assert_eq!(summary.skipped_inverse, 1);
    }
}
