//! Error types for STEP export.

use bimstep_model::{EntityKey, MetadataError};
use thiserror::Error;

/// Errors that can occur while writing a STEP file.
#[derive(Error, Debug)]
pub enum StepError {
    /// I/O error writing to the sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A type's attribute table is malformed.
    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    /// A handle names an instance that is not in the model.
    #[error("Missing entity reference: {0:?}")]
    MissingEntity(EntityKey),

    /// Forward attributes lead back to an entity still being written.
    #[error("Forward reference cycle through {entity} ({key:?})")]
    ForwardCycle {
        /// Type of the entity reached twice.
        entity: &'static str,
        /// Its handle.
        key: EntityKey,
    },

    /// The worker pool could not be started.
    #[error("Worker pool error: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

impl StepError {
    /// Whether the sink itself failed. Such errors abort a run under every
    /// policy, since nothing further can be written.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

/// Result type for STEP export.
pub type Result<T> = std::result::Result<T, StepError>;
