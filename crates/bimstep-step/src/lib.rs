#![warn(missing_docs)]

//! ISO 10303-21 (STEP) export for bimstep building models.
//!
//! Walks the entity graph of a [`Model`](bimstep_model::Model) from a root
//! entity and writes one `#id=TYPE(...);` record per distinct entity.
//! Forward attributes are written depth-first, so every reference points at
//! an earlier record; inverse attributes are deferred and written afterwards,
//! which breaks the cycles they would otherwise close. The traversal runs
//! either on the calling thread or on a rayon worker pool.
//!
//! # Example
//!
//! ```
//! use bimstep_model::{ifc, Model};
//! use bimstep_step::{write_step_to_buffer, StepHeader, WriterOptions};
//!
//! let mut model = Model::new();
//! let sample = ifc::sample::simple_wall_project(&mut model).unwrap();
//! let bytes = write_step_to_buffer(
//!     &model,
//!     sample.project,
//!     &StepHeader::default(),
//!     WriterOptions::sequential(),
//! )
//! .unwrap();
//! let text = String::from_utf8(bytes).unwrap();
//! assert!(text.contains("#1=IFCPERSON($,$,'',$,$,$,$,$);"));
//! ```

mod error;
mod header;
mod parallel;
mod registry;
mod render;
mod traversal;
mod writer;

pub use error::{Result, StepError};
pub use header::{Header, StepHeader};
pub use registry::IdentityRegistry;
pub use writer::{
    write_step, write_step_to_buffer, InverseFailurePolicy, Mode, StepWriter, WriteSummary,
    WriterOptions,
};
