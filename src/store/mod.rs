//! Partitioned checkpoint store interface.
//!
//! The store itself (file handling, dataset location, parallel read
//! scheduling) is an external collaborator; this module fixes the seam: the
//! dataset key convention, the per-read result contract, and the
//! [`PartitionedStore`] trait the loader reads through. [`MemoryStore`] is
//! the in-process backend used for serial runs and tests.

pub mod memory;

pub use memory::MemoryStore;

use crate::grid::DomainDescriptor;
use crate::restart_error::RestartError;

/// Dataset labels for the vector components of a field.
pub const COMPONENT_LABELS: [&str; 3] = ["x", "y", "z"];

/// Compose the store dataset path for one component of a named field:
/// `fields/<fieldName>/<componentLabel>`.
///
/// # Errors
/// Returns `Err(UnknownComponent)` for component indices beyond the labelled
/// range.
pub fn dataset_path(field_name: &str, component: usize) -> Result<String, RestartError> {
    let label = COMPONENT_LABELS
        .get(component)
        .ok_or(RestartError::UnknownComponent(component))?;
    Ok(format!("fields/{field_name}/{label}"))
}

/// Flat buffer returned by one partitioned read.
///
/// Elements are ordered by the crate's shared row-major convention (last axis
/// fastest) over the requested domain. The caller owns the buffer for the
/// duration of the scatter step and drops it afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct ReadResult<V> {
    data: Vec<V>,
}

impl<V> ReadResult<V> {
    /// Wrap a flat component buffer.
    pub fn from_vec(data: Vec<V>) -> Self {
        Self { data }
    }

    /// Element count of the read.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the read returned zero elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the flat sample buffer.
    pub fn data(&self) -> &[V] {
        &self.data
    }

    /// Take ownership of the flat sample buffer.
    pub fn into_vec(self) -> Vec<V> {
        self.data
    }
}

/// Rank-aware persistence collaborator capable of serving a sub-rectangle of
/// a checkpointed dataset.
///
/// `Send + Sync` because every rank issues its own reads and a shared backend
/// must be able to serve them concurrently; there is no coordination at this
/// layer beyond that bound.
pub trait PartitionedStore<V, const D: usize>: Send + Sync {
    /// Read the given domain of `dataset` at `step`.
    ///
    /// Implementations guarantee that a successful result holds exactly
    /// `domain.len()` elements in the shared row-major order.
    ///
    /// # Errors
    /// `MissingDataset` if the dataset is absent for this step,
    /// `DomainOutOfBounds` if the request is not covered by the checkpoint,
    /// `StoreRead` for backend-specific failures. Never retried here.
    fn read_domain(
        &self,
        step: u64,
        dataset: &str,
        domain: &DomainDescriptor<D>,
    ) -> Result<ReadResult<V>, RestartError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_paths_use_xyz_labels() {
        assert_eq!(dataset_path("E", 0).unwrap(), "fields/E/x");
        assert_eq!(dataset_path("B", 2).unwrap(), "fields/B/z");
        assert_eq!(
            dataset_path("E", 3).unwrap_err(),
            RestartError::UnknownComponent(3)
        );
    }
}
