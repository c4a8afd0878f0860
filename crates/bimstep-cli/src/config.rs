//! Optional TOML configuration for `bimstep demo`.
//!
//! ```toml
//! [header]
//! name = "wall.ifc"
//! author = ["A. Builder"]
//!
//! [writer]
//! inverse_failure = "log-and-skip"
//! [writer.mode.parallel]
//! threads = 4
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use bimstep_step::{StepHeader, WriterOptions};
use serde::{Deserialize, Serialize};

/// Contents of a configuration file. Missing tables keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub header: StepHeader,
    pub writer: WriterOptions,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bimstep_step::{InverseFailurePolicy, Mode};

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bimstep.toml");
        fs::write(
            &path,
            "[header]\nname = \"wall.ifc\"\n\n[writer]\ninverse_failure = \"log-and-skip\"\n\
             [writer.mode.parallel]\nthreads = 4\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.header.name, "wall.ifc");
        assert_eq!(config.header.schema, vec!["IFC4"]);
        assert_eq!(config.writer.mode, Mode::Parallel { threads: 4 });
        assert_eq!(config.writer.inverse_failure, InverseFailurePolicy::LogAndSkip);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = Config::load(Path::new("/nonexistent/bimstep.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/bimstep.toml"));
    }
}
