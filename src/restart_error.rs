//! RestartError: Unified error type for field-restart public APIs
//!
//! Every fallible operation in the crate reports through this enum. A restart
//! load is atomic-or-abort: no variant is retried here, and callers are
//! expected to terminate the restart sequence on any of them rather than
//! proceed with a partially restored field.

use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for restart-load operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RestartError {
    /// The store failed to serve a read for an otherwise valid request.
    #[error("store read failed for dataset `{dataset}` at step {step}: {reason}")]
    StoreRead {
        /// Dataset path that was requested.
        dataset: String,
        /// Restart step of the request.
        step: u64,
        /// Backend-specific description of the failure.
        reason: String,
    },
    /// The named dataset is not present in the checkpoint for this step.
    #[error("dataset `{0}` not present in checkpoint step {1}")]
    MissingDataset(String, u64),
    /// The requested domain lies (partly) outside what was checkpointed.
    #[error("requested domain offset={offset:?} size={size:?} lies outside the checkpointed domain")]
    DomainOutOfBounds {
        /// Requested global offset per axis.
        offset: Vec<usize>,
        /// Requested size per axis.
        size: Vec<usize>,
    },
    /// A read returned a buffer whose length disagrees with the read key.
    #[error("partitioned read returned {found} elements, expected {expected}")]
    ReadLengthMismatch {
        /// Product of the domain descriptor's size components.
        expected: usize,
        /// Element count actually returned.
        found: usize,
    },
    /// A domain descriptor with a zero size component was used as a read key.
    #[error("domain size must be positive on every axis, got {size:?}")]
    EmptyDomain {
        /// Offending size vector.
        size: Vec<usize>,
    },
    /// Source and destination field layouts differ in a clone.
    #[error("field layouts differ: source data space {src:?}, destination data space {dst:?}")]
    LayoutMismatch {
        /// Source data-space size per axis.
        src: Vec<usize>,
        /// Destination data-space size per axis.
        dst: Vec<usize>,
    },
    /// The visible local window does not fit inside the interior region.
    #[error("scatter target escapes the interior on axis {axis}: window end {end} > interior {interior}")]
    ScatterOutOfInterior {
        /// Axis on which the window overruns the interior.
        axis: usize,
        /// `local_window_offset + local_window_size` on that axis.
        end: usize,
        /// Interior extent on that axis.
        interior: usize,
    },
    /// A vector component index with no dataset label (labels cover x/y/z).
    #[error("component index {0} has no dataset label (components are labelled x/y/z)")]
    UnknownComponent(usize),
    /// Lookup of an unregistered field name.
    #[error("field `{0}` is not registered")]
    UnknownField(String),
    /// A field name was registered twice.
    #[error("field `{0}` is already registered")]
    DuplicateField(String),
    /// The host-to-device transfer could not be confirmed complete.
    #[error("device transfer did not complete: {0}")]
    TransferIncomplete(String),
}

/// Coarse classification of [`RestartError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartErrorKind {
    /// Store-side failure; the checkpoint cannot serve this rank's request.
    StoreRead,
    /// Caller contract violation; a programming defect, not a runtime state.
    Precondition,
    /// The device gate could not confirm the host-to-device transfer.
    Transfer,
}

impl RestartError {
    /// Map a variant onto its failure class.
    pub fn kind(&self) -> RestartErrorKind {
        use RestartError::*;
        match self {
            StoreRead { .. } | MissingDataset(..) | DomainOutOfBounds { .. }
            | ReadLengthMismatch { .. } => RestartErrorKind::StoreRead,
            EmptyDomain { .. } | LayoutMismatch { .. } | ScatterOutOfInterior { .. }
            | UnknownComponent(_) | UnknownField(_) | DuplicateField(_) => {
                RestartErrorKind::Precondition
            }
            TransferIncomplete(_) => RestartErrorKind::Transfer,
        }
    }
}
