//! STEP file writer: runs a traversal over a [`Model`] inside the
//! `ISO-10303-21;` envelope.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use bimstep_model::{descriptor_for, EntityKey, Model};
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, StepError};
use crate::header::Header;
use crate::parallel::ParallelRun;
use crate::traversal::{RunOutcome, Traversal};

/// How a failure while writing an entity reached only through an inverse
/// attribute is handled.
///
/// Failures on the forward graph of the root always abort, as do sink
/// failures: the output would be missing a record that something refers to,
/// or could not be written at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InverseFailurePolicy {
    /// Abort the run with the first failure.
    #[default]
    Abort,
    /// Log the failure, skip that inverse entry and keep going.
    LogAndSkip,
}

impl InverseFailurePolicy {
    /// Decide what a failed inverse visit means for the run: `Err` aborts,
    /// `Ok` means the entry was skipped.
    pub(crate) fn absorb(self, err: StepError) -> Result<()> {
        if err.is_io() || self == Self::Abort {
            return Err(err);
        }
        warn!(error = %err, "skipping inverse attribute entry");
        Ok(())
    }
}

/// Single-threaded or pooled traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Deterministic depth-first traversal on the calling thread.
    #[default]
    Sequential,
    /// Sibling collections and inverse attributes are written by a worker
    /// pool. Ids stay unique but their order may vary between runs.
    Parallel {
        /// Worker count; 0 uses the available parallelism.
        #[serde(default)]
        threads: usize,
    },
}

/// Options for one export run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterOptions {
    /// Traversal mode.
    pub mode: Mode,
    /// Handling of failures on inverse-only entities.
    pub inverse_failure: InverseFailurePolicy,
}

impl WriterOptions {
    /// Single-threaded, aborting on any failure.
    pub fn sequential() -> Self {
        Self::default()
    }

    /// Pooled with `threads` workers (0 = available parallelism).
    pub fn parallel(threads: usize) -> Self {
        Self {
            mode: Mode::Parallel { threads },
            ..Self::default()
        }
    }

    /// Replace the inverse failure policy.
    pub fn with_inverse_failure(mut self, policy: InverseFailurePolicy) -> Self {
        self.inverse_failure = policy;
        self
    }
}

/// What a completed export wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteSummary {
    /// Instance id of the root entity.
    pub root_id: u64,
    /// Number of `#id=...;` records in the `DATA` section.
    pub records: usize,
    /// Inverse entries skipped under [`InverseFailurePolicy::LogAndSkip`].
    pub skipped_inverse: usize,
}

impl From<RunOutcome> for WriteSummary {
    fn from(outcome: RunOutcome) -> Self {
        Self {
            root_id: outcome.root_id,
            records: outcome.records,
            skipped_inverse: outcome.skipped_inverse,
        }
    }
}

/// Writes one model as a STEP exchange structure to any [`Write`] sink.
///
/// Every call starts from a fresh identity registry, so ids always begin at
/// `#1` and nothing carries over between runs.
#[derive(Debug, Clone, Copy)]
pub struct StepWriter<'m> {
    model: &'m Model,
    options: WriterOptions,
}

impl<'m> StepWriter<'m> {
    /// Writer with default (sequential) options.
    pub fn new(model: &'m Model) -> Self {
        Self {
            model,
            options: WriterOptions::default(),
        }
    }

    /// Replace the options.
    pub fn with_options(mut self, options: WriterOptions) -> Self {
        self.options = options;
        self
    }

    /// Current options.
    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// Resolve the record layout of every type present in the model.
    pub fn validate(&self) -> Result<()> {
        for ty in self.model.types() {
            descriptor_for(ty)?;
        }
        Ok(())
    }

    /// Write the envelope, the header and every entity reachable from `root`.
    ///
    /// Metadata errors and a missing root are reported before anything is
    /// written. Any later error leaves a partial, unterminated file behind.
    pub fn write<W, H>(&self, root: EntityKey, header: &H, out: &mut W) -> Result<WriteSummary>
    where
        W: Write + Send,
        H: Header + ?Sized,
    {
        self.validate()?;
        if self.model.get(root).is_none() {
            return Err(StepError::MissingEntity(root));
        }
        let pool = match self.options.mode {
            Mode::Sequential => None,
            Mode::Parallel { threads } => Some(build_pool(threads)?),
        };

        writeln!(out, "ISO-10303-21;")?;
        let header = header.to_step();
        out.write_all(header.as_bytes())?;
        if !header.is_empty() && !header.ends_with('\n') {
            writeln!(out)?;
        }
        writeln!(out, "DATA;")?;

        let policy = self.options.inverse_failure;
        let outcome = match &pool {
            None => Traversal::new(self.model, &mut *out, policy).run(root)?,
            Some(pool) => ParallelRun::new(self.model, &mut *out, policy).run(pool, root)?,
        };

        writeln!(out, "ENDSEC;")?;
        writeln!(out, "END-ISO-10303-21;")?;
        out.flush()?;

        debug!(
            records = outcome.records,
            skipped = outcome.skipped_inverse,
            root = outcome.root_id,
            mode = ?self.options.mode,
            "STEP data section written"
        );
        Ok(outcome.into())
    }
}

fn build_pool(threads: usize) -> Result<ThreadPool> {
    let threads = match threads {
        0 => std::thread::available_parallelism().map_or(1, |n| n.get()),
        n => n,
    };
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|index| format!("bimstep-step-{index}"))
        .build()?;
    Ok(pool)
}

/// Write a STEP file to a path.
///
/// # Arguments
///
/// * `model` - Model holding every entity to export
/// * `root` - Entity the traversal starts from, usually the `IfcProject`
/// * `header` - Header section collaborator
/// * `path` - Output file path
/// * `options` - Traversal mode and failure policy
///
/// # Returns
///
/// A summary of the records written.
pub fn write_step<H: Header + ?Sized>(
    model: &Model,
    root: EntityKey,
    header: &H,
    path: impl AsRef<Path>,
    options: WriterOptions,
) -> Result<WriteSummary> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    StepWriter::new(model)
        .with_options(options)
        .write(root, header, &mut out)
}

/// Write a STEP file into a byte buffer.
///
/// # Arguments
///
/// * `model` - Model holding every entity to export
/// * `root` - Entity the traversal starts from
/// * `header` - Header section collaborator
/// * `options` - Traversal mode and failure policy
///
/// # Returns
///
/// The complete file contents.
pub fn write_step_to_buffer<H: Header + ?Sized>(
    model: &Model,
    root: EntityKey,
    header: &H,
    options: WriterOptions,
) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    StepWriter::new(model)
        .with_options(options)
        .write(root, header, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::StepHeader;
    use bimstep_model::{AttributeDef, TypeDef, Value};
    use std::io;

    static NOTE: TypeDef = TypeDef {
        name: "TestNote",
        supertype: None,
        is_abstract: false,
        attributes: &[AttributeDef::new("Text", 0)],
        inverses: &[],
        derived: &[],
    };

    static BROKEN: TypeDef = TypeDef {
        name: "TestBroken",
        supertype: None,
        is_abstract: false,
        attributes: &[AttributeDef::new("A", 0), AttributeDef::new("B", 0)],
        inverses: &[],
        derived: &[],
    };

    /// Accepts `budget` bytes, then fails every write.
    struct FailingWriter {
        budget: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget < buf.len() {
                return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
            }
            self.budget -= buf.len();
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn note_model() -> (Model, EntityKey) {
        let mut model = Model::new();
        let note = model.create(&NOTE, [("Text", Value::label("hi"))]).unwrap();
        (model, note)
    }

    #[test]
    fn test_envelope() {
        let (model, note) = note_model();
        let header = "HEADER;\nENDSEC;";
        let bytes = write_step_to_buffer(&model, note, header, WriterOptions::sequential()).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "ISO-10303-21;\nHEADER;\nENDSEC;\nDATA;\n#1=TESTNOTE('hi');\nENDSEC;\nEND-ISO-10303-21;\n"
        );
    }

    #[test]
    fn test_summary() {
        let (model, note) = note_model();
        let mut out = Vec::new();
        let summary = StepWriter::new(&model)
            .write(note, &StepHeader::default(), &mut out)
            .unwrap();
        assert_eq!(
            summary,
            WriteSummary {
                root_id: 1,
                records: 1,
                skipped_inverse: 0
            }
        );
    }

    #[test]
    fn test_metadata_error_writes_nothing() {
        let (mut model, note) = note_model();
        model.insert(&BROKEN).unwrap();
        let mut out = Vec::new();
        let err = StepWriter::new(&model)
            .write(note, "", &mut out)
            .unwrap_err();
        assert!(matches!(err, StepError::Metadata(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_root_writes_nothing() {
        let (mut model, note) = note_model();
        model.remove(note);
        let mut out = Vec::new();
        let err = StepWriter::new(&model).write(note, "", &mut out).unwrap_err();
        assert!(matches!(err, StepError::MissingEntity(key) if key == note));
        assert!(out.is_empty());
    }

    #[test]
    fn test_io_failure_propagates() {
        let (model, note) = note_model();
        for options in [WriterOptions::sequential(), WriterOptions::parallel(2)] {
            // room for the envelope start, not for the record
            let mut out = FailingWriter { budget: 20 };
            let err = StepWriter::new(&model)
                .with_options(options)
                .write(note, "", &mut out)
                .unwrap_err();
            assert!(err.is_io(), "{options:?}: {err}");
        }
    }

    #[test]
    fn test_policy_never_absorbs_io_errors() {
        let io_err = StepError::Io(io::Error::new(io::ErrorKind::Other, "gone"));
        assert!(InverseFailurePolicy::LogAndSkip.absorb(io_err).is_err());

        let (_, note) = note_model();
        let missing = StepError::MissingEntity(note);
        assert!(InverseFailurePolicy::LogAndSkip.absorb(missing).is_ok());
        let missing = StepError::MissingEntity(note);
        assert!(InverseFailurePolicy::Abort.absorb(missing).is_err());
    }

    #[test]
    fn test_options_from_toml() {
        let options: WriterOptions = toml::from_str(
            "inverse_failure = \"log-and-skip\"\n[mode.parallel]\nthreads = 3\n",
        )
        .unwrap();
        assert_eq!(
            options,
            WriterOptions::parallel(3).with_inverse_failure(InverseFailurePolicy::LogAndSkip)
        );

        let options: WriterOptions = toml::from_str("mode = \"sequential\"").unwrap();
        assert_eq!(options, WriterOptions::sequential());
        let options: WriterOptions = toml::from_str("").unwrap();
        assert_eq!(options, WriterOptions::default());
    }
}
