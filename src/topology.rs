//! Rank topology collaborator: where one compute rank sits in the Cartesian
//! rank grid and where its local domain starts in global coordinates.

/// Topology service interface consumed by the window/coordinate mapper.
///
/// One instance describes the calling rank; the mapper needs the rank's
/// static global offset and its grid position (to decide whether the window's
/// leading-edge offset applies).
pub trait RankTopology<const D: usize> {
    /// Global offset of this rank's local domain, per axis.
    fn global_offset(&self) -> [usize; D];
    /// Position of this rank within the Cartesian rank grid.
    fn position(&self) -> [usize; D];
    /// Number of ranks per axis.
    fn extent(&self) -> [usize; D];
}

/// Uniform Cartesian decomposition: every rank owns a local domain of the
/// same size, so the global offset is position times local size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CartesianTopology<const D: usize> {
    position: [usize; D],
    extent: [usize; D],
    local_size: [usize; D],
}

impl<const D: usize> CartesianTopology<D> {
    /// Describe the rank at `position` in a grid of `extent` ranks, each
    /// owning a `local_size` domain.
    pub fn new(position: [usize; D], extent: [usize; D], local_size: [usize; D]) -> Self {
        debug_assert!(
            (0..D).all(|d| position[d] < extent[d]),
            "rank position outside the rank grid"
        );
        Self {
            position,
            extent,
            local_size,
        }
    }
}

impl<const D: usize> RankTopology<D> for CartesianTopology<D> {
    fn global_offset(&self) -> [usize; D] {
        let mut offset = self.position;
        for d in 0..D {
            offset[d] *= self.local_size[d];
        }
        offset
    }

    fn position(&self) -> [usize; D] {
        self.position
    }

    fn extent(&self) -> [usize; D] {
        self.extent
    }
}
