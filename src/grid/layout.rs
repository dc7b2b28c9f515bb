//! GridLayout: a rank-local buffer described as an interior region plus a
//! symmetric guard (halo) margin on every axis.
//!
//! The guard cells exist for neighbour exchange in the physics loop and are
//! never populated by a restart load; the layout only has to know how wide
//! they are so destination coordinates can jump over them.

use serde::{Deserialize, Serialize};

use crate::debug_invariants::DebugInvariants;
use crate::restart_error::RestartError;

/// Convert a per-axis coordinate into a flat index, row-major with the
/// **last axis varying fastest**.
///
/// This is the one ordering convention of the crate: partitioned reads return
/// elements in this order and the scatter step consumes them in this order.
#[inline]
pub fn linear_index<const D: usize>(size: &[usize; D], coord: &[usize; D]) -> usize {
    let mut idx = 0usize;
    for d in 0..D {
        debug_assert!(coord[d] < size[d], "coordinate out of range on axis {d}");
        idx = idx * size[d] + coord[d];
    }
    idx
}

/// Inverse of [`linear_index`]: recover the per-axis coordinate of a flat
/// index within a box of the given size.
#[inline]
pub fn coord_of<const D: usize>(size: &[usize; D], mut linear: usize) -> [usize; D] {
    let mut coord = [0usize; D];
    for d in (0..D).rev() {
        coord[d] = linear % size[d];
        linear /= size[d];
    }
    debug_assert_eq!(linear, 0, "linear index out of range");
    coord
}

/// Immutable description of a field's local buffer: interior extent plus a
/// symmetric guard margin per axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout<const D: usize> {
    #[serde(with = "crate::grid::axes_serde")]
    interior: [usize; D],
    #[serde(with = "crate::grid::axes_serde")]
    guard: [usize; D],
}

impl<const D: usize> GridLayout<D> {
    /// Build a layout from an interior extent and a guard width per axis.
    ///
    /// # Errors
    /// Returns `Err(EmptyDomain)` if the interior is zero on any axis.
    pub fn new(interior: [usize; D], guard: [usize; D]) -> Result<Self, RestartError> {
        let layout = Self { interior, guard };
        layout.validate_invariants()?;
        Ok(layout)
    }

    /// Interior extent per axis (guard excluded).
    #[inline]
    pub fn interior(&self) -> [usize; D] {
        self.interior
    }

    /// Guard width per axis.
    #[inline]
    pub fn guard(&self) -> [usize; D] {
        self.guard
    }

    /// Full data-space extent per axis: `interior + 2 * guard`.
    #[inline]
    pub fn data_size(&self) -> [usize; D] {
        let mut size = self.interior;
        for d in 0..D {
            size[d] += 2 * self.guard[d];
        }
        size
    }

    /// Total number of cells in the full buffer, guards included.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.data_size().iter().product()
    }

    /// Whether a data-space coordinate falls strictly inside the interior
    /// (i.e. outside the guard margin on every axis).
    #[inline]
    pub fn in_interior(&self, coord: &[usize; D]) -> bool {
        (0..D).all(|d| coord[d] >= self.guard[d] && coord[d] < self.guard[d] + self.interior[d])
    }
}

impl<const D: usize> DebugInvariants for GridLayout<D> {
    fn debug_assert_invariants(&self) {
        crate::restart_debug_assert_ok!(self.validate_invariants(), "GridLayout invalid");
    }

    fn validate_invariants(&self) -> Result<(), RestartError> {
        if self.interior.iter().any(|&n| n == 0) {
            return Err(RestartError::EmptyDomain {
                size: self.interior.to_vec(),
            });
        }
        Ok(())
    }
}
