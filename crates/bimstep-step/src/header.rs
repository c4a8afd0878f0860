//! The `HEADER;` section.

use bimstep_model::encode_string;
use serde::{Deserialize, Serialize};

/// Supplies the pre-rendered `HEADER; ... ENDSEC;` block spliced between
/// `ISO-10303-21;` and `DATA;`.
pub trait Header {
    /// The header block text.
    fn to_step(&self) -> String;
}

impl Header for str {
    fn to_step(&self) -> String {
        self.to_string()
    }
}

impl Header for String {
    fn to_step(&self) -> String {
        self.clone()
    }
}

/// FILE_DESCRIPTION / FILE_NAME / FILE_SCHEMA header fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepHeader {
    /// Free-form description entries, usually the MVD view definition.
    pub description: Vec<String>,
    /// Implementation level, `2;1` for conformance class 1.
    pub implementation_level: String,
    /// Name of the exchange structure, usually the file name.
    pub name: String,
    /// ISO 8601 creation time stamp.
    pub time_stamp: String,
    /// Authors.
    pub author: Vec<String>,
    /// Authors' organizations.
    pub organization: Vec<String>,
    /// System that produced the file.
    pub preprocessor_version: String,
    /// System the data originated in.
    pub originating_system: String,
    /// Person who approved the file.
    pub authorization: String,
    /// Schema identifiers.
    pub schema: Vec<String>,
}

impl Default for StepHeader {
    fn default() -> Self {
        Self {
            description: vec!["ViewDefinition [CoordinationView]".to_string()],
            implementation_level: "2;1".to_string(),
            name: String::new(),
            time_stamp: String::new(),
            author: vec![String::new()],
            organization: vec![String::new()],
            preprocessor_version: "bimstep".to_string(),
            originating_system: "bimstep".to_string(),
            authorization: String::new(),
            schema: vec!["IFC4".to_string()],
        }
    }
}

impl StepHeader {
    /// Set the file name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the time stamp.
    pub fn with_time_stamp(mut self, time_stamp: impl Into<String>) -> Self {
        self.time_stamp = time_stamp.into();
        self
    }
}

fn string_list(items: &[String]) -> String {
    let items: Vec<String> = items.iter().map(|item| encode_string(item)).collect();
    format!("({})", items.join(","))
}

impl Header for StepHeader {
    fn to_step(&self) -> String {
        let mut out = String::from("HEADER;\n");
        out.push_str(&format!(
            "FILE_DESCRIPTION({},{});\n",
            string_list(&self.description),
            encode_string(&self.implementation_level)
        ));
        out.push_str(&format!(
            "FILE_NAME({},{},{},{},{},{},{});\n",
            encode_string(&self.name),
            encode_string(&self.time_stamp),
            string_list(&self.author),
            string_list(&self.organization),
            encode_string(&self.preprocessor_version),
            encode_string(&self.originating_system),
            encode_string(&self.authorization)
        ));
        out.push_str(&format!("FILE_SCHEMA({});\n", string_list(&self.schema)));
        out.push_str("ENDSEC;\n");
        out
    }
}
