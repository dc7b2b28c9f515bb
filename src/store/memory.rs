//! In-memory partitioned store.
//!
//! Holds whole checkpointed global datasets and serves sub-rectangles of
//! them, one flat buffer per read, in the shared row-major order. This is the
//! serial/test stand-in for an external parallel store; ranks may share one
//! instance and read concurrently.

use dashmap::DashMap;

use crate::grid::{DomainDescriptor, coord_of, linear_index};
use crate::restart_error::RestartError;
use crate::store::{PartitionedStore, ReadResult};

/// One checkpointed dataset: its global domain and the flat data covering it.
#[derive(Clone, Debug)]
struct GlobalDataset<V, const D: usize> {
    domain: DomainDescriptor<D>,
    data: Vec<V>,
}

/// Concurrent in-memory checkpoint store keyed by `(step, dataset path)`.
#[derive(Debug, Default)]
pub struct MemoryStore<V, const D: usize> {
    datasets: DashMap<(u64, String), GlobalDataset<V, D>>,
}

impl<V, const D: usize> MemoryStore<V, D>
where
    V: Clone + Send + Sync,
{
    /// Empty store.
    pub fn new() -> Self {
        Self {
            datasets: DashMap::new(),
        }
    }

    /// Stage checkpoint contents for a dataset: `data` covers `domain` in the
    /// shared row-major order. Re-inserting a key replaces the dataset.
    ///
    /// # Errors
    /// Returns `Err(ReadLengthMismatch)` if `data.len()` disagrees with the
    /// domain size, and `Err(EmptyDomain)` for a zero-sized domain.
    pub fn insert(
        &self,
        step: u64,
        dataset: impl Into<String>,
        domain: DomainDescriptor<D>,
        data: Vec<V>,
    ) -> Result<(), RestartError> {
        domain.validate()?;
        if data.len() != domain.len() {
            return Err(RestartError::ReadLengthMismatch {
                expected: domain.len(),
                found: data.len(),
            });
        }
        self.datasets
            .insert((step, dataset.into()), GlobalDataset { domain, data });
        Ok(())
    }

    /// Global domain of a staged dataset, if present.
    pub fn domain_of(&self, step: u64, dataset: &str) -> Option<DomainDescriptor<D>> {
        self.datasets
            .get(&(step, dataset.to_owned()))
            .map(|ds| ds.domain)
    }
}

impl<V, const D: usize> PartitionedStore<V, D> for MemoryStore<V, D>
where
    V: Clone + Send + Sync,
{
    fn read_domain(
        &self,
        step: u64,
        dataset: &str,
        domain: &DomainDescriptor<D>,
    ) -> Result<ReadResult<V>, RestartError> {
        domain.validate()?;
        let entry = self
            .datasets
            .get(&(step, dataset.to_owned()))
            .ok_or_else(|| RestartError::MissingDataset(dataset.to_owned(), step))?;
        if !entry.domain.contains(domain) {
            return Err(RestartError::DomainOutOfBounds {
                offset: domain.offset.to_vec(),
                size: domain.size.to_vec(),
            });
        }

        let count = domain.len();
        let mut out = Vec::with_capacity(count);
        for linear in 0..count {
            let local = coord_of(&domain.size, linear);
            let mut stored = [0usize; D];
            for d in 0..D {
                stored[d] = domain.offset[d] + local[d] - entry.domain.offset[d];
            }
            out.push(entry.data[linear_index(&entry.domain.size, &stored)].clone());
        }
        Ok(ReadResult::from_vec(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_4x4() -> MemoryStore<f64, 2> {
        let store = MemoryStore::new();
        let domain = DomainDescriptor::new([0, 0], [4, 4]);
        let data: Vec<f64> = (0..16).map(f64::from).collect();
        store.insert(100, "fields/E/x", domain, data).unwrap();
        store
    }

    #[test]
    fn full_domain_read_returns_data_verbatim() {
        let store = store_4x4();
        let out = store
            .read_domain(100, "fields/E/x", &DomainDescriptor::new([0, 0], [4, 4]))
            .unwrap();
        assert_eq!(out.len(), 16);
        assert_eq!(out.data()[5], 5.0);
    }

    #[test]
    fn sub_rectangle_read_is_row_major_last_axis_fastest() {
        let store = store_4x4();
        let out = store
            .read_domain(100, "fields/E/x", &DomainDescriptor::new([1, 1], [2, 2]))
            .unwrap();
        // rows 1..3, cols 1..3 of a 4x4 counted grid
        assert_eq!(out.into_vec(), vec![5.0, 6.0, 9.0, 10.0]);
    }

    #[test]
    fn offset_dataset_serves_global_coordinates() {
        let store = MemoryStore::new();
        let domain = DomainDescriptor::new([0, 8], [2, 2]);
        store
            .insert(7, "fields/B/y", domain, vec![1.0, 2.0, 3.0, 4.0])
            .unwrap();
        let out = store
            .read_domain(7, "fields/B/y", &DomainDescriptor::new([1, 9], [1, 1]))
            .unwrap();
        assert_eq!(out.into_vec(), vec![4.0]);
    }

    #[test]
    fn domain_of_reports_the_staged_domain() {
        let store = store_4x4();
        assert_eq!(
            store.domain_of(100, "fields/E/x"),
            Some(DomainDescriptor::new([0, 0], [4, 4]))
        );
        assert_eq!(store.domain_of(100, "fields/E/y"), None);

        // re-insertion replaces the dataset, domain included
        store
            .insert(
                100,
                "fields/E/x",
                DomainDescriptor::new([0, 4], [2, 2]),
                vec![0.0; 4],
            )
            .unwrap();
        assert_eq!(
            store.domain_of(100, "fields/E/x"),
            Some(DomainDescriptor::new([0, 4], [2, 2]))
        );
    }

    #[test]
    fn missing_dataset_is_reported() {
        let store = store_4x4();
        let err = store
            .read_domain(100, "fields/E/y", &DomainDescriptor::new([0, 0], [1, 1]))
            .unwrap_err();
        assert_eq!(err, RestartError::MissingDataset("fields/E/y".into(), 100));
        // same dataset at a different step is also missing
        assert!(matches!(
            store
                .read_domain(101, "fields/E/x", &DomainDescriptor::new([0, 0], [1, 1]))
                .unwrap_err(),
            RestartError::MissingDataset(..)
        ));
    }

    #[test]
    fn out_of_bounds_request_is_rejected() {
        let store = store_4x4();
        let err = store
            .read_domain(100, "fields/E/x", &DomainDescriptor::new([2, 2], [4, 4]))
            .unwrap_err();
        assert!(matches!(err, RestartError::DomainOutOfBounds { .. }));
    }

    #[test]
    fn zero_sized_request_is_a_precondition_violation() {
        let store = store_4x4();
        let err = store
            .read_domain(100, "fields/E/x", &DomainDescriptor::new([0, 0], [0, 4]))
            .unwrap_err();
        assert_eq!(err, RestartError::EmptyDomain { size: vec![0, 4] });
    }

    #[test]
    fn insert_checks_data_length() {
        let store: MemoryStore<f64, 2> = MemoryStore::new();
        let err = store
            .insert(
                0,
                "fields/E/x",
                DomainDescriptor::new([0, 0], [2, 2]),
                vec![1.0],
            )
            .unwrap_err();
        assert_eq!(
            err,
            RestartError::ReadLengthMismatch {
                expected: 4,
                found: 1
            }
        );
    }
}
