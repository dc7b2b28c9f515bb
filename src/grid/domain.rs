//! DomainDescriptor: the offset + size pair used as a partitioned-store read
//! key, expressed in global coordinate units.
//!
//! Descriptors are derived per rank per restart step and never persisted; the
//! serde derives exist so callers can log or ship read keys as metadata.

use itertools::izip;
use serde::{Deserialize, Serialize};

use crate::debug_invariants::DebugInvariants;
use crate::restart_error::RestartError;

/// A rectangular region of the global simulation domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DomainDescriptor<const D: usize> {
    /// Global offset per axis.
    #[serde(with = "crate::grid::axes_serde")]
    pub offset: [usize; D],
    /// Extent per axis.
    #[serde(with = "crate::grid::axes_serde")]
    pub size: [usize; D],
}

impl<const D: usize> DomainDescriptor<D> {
    /// Build a descriptor from a global offset and size.
    pub fn new(offset: [usize; D], size: [usize; D]) -> Self {
        Self { offset, size }
    }

    /// Number of elements a read of this domain returns.
    #[inline]
    pub fn len(&self) -> usize {
        self.size.iter().product()
    }

    /// Whether the domain covers zero cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.iter().any(|&n| n == 0)
    }

    /// Reject a descriptor that is unusable as a read key.
    ///
    /// # Errors
    /// Returns `Err(EmptyDomain)` if any size component is zero. A zero-sized
    /// read key is a caller contract violation, not a store condition.
    pub fn validate(&self) -> Result<(), RestartError> {
        self.validate_invariants()
    }

    /// Whether `other` lies entirely inside `self`.
    #[inline]
    pub fn contains(&self, other: &Self) -> bool {
        izip!(&self.offset, &self.size, &other.offset, &other.size)
            .all(|(&off, &len, &o_off, &o_len)| o_off >= off && o_off + o_len <= off + len)
    }

    /// Exclusive upper corner per axis.
    #[inline]
    pub fn end(&self) -> [usize; D] {
        let mut end = self.offset;
        for d in 0..D {
            end[d] += self.size[d];
        }
        end
    }
}

impl<const D: usize> DebugInvariants for DomainDescriptor<D> {
    fn debug_assert_invariants(&self) {
        crate::restart_debug_assert_ok!(self.validate_invariants(), "DomainDescriptor invalid");
    }

    fn validate_invariants(&self) -> Result<(), RestartError> {
        if self.is_empty() {
            return Err(RestartError::EmptyDomain {
                size: self.size.to_vec(),
            });
        }
        Ok(())
    }
}
