//! Pluggable storage for Field host buffers.
//!
//! This trait abstracts how a field's flat host buffer is stored. The restart
//! path only needs whole-buffer semantics: allocate, neutral-fill before a
//! load, slice access for scatter, and a checked full copy for cloning.

use core::fmt::{self, Debug};

use crate::restart_error::RestartError;

/// Contiguous, indexable host storage for `V` with slice access.
pub trait HostStorage<V>: Debug {
    /// Construct a buffer of `len`, filled with `fill`.
    fn with_len(len: usize, fill: V) -> Self
    where
        V: Clone;

    /// Current length in elements.
    fn len(&self) -> usize;

    /// Whether the buffer holds zero elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entire read-only buffer.
    fn as_slice(&self) -> &[V];

    /// Entire mutable buffer.
    fn as_mut_slice(&mut self) -> &mut [V];

    /// Overwrite every element with `fill`.
    fn fill(&mut self, fill: V)
    where
        V: Clone,
    {
        self.as_mut_slice().fill(fill);
    }

    /// Replace the whole buffer with `src`, which must match in length.
    ///
    /// # Errors
    /// Returns `Err(LayoutMismatch)` without touching the buffer when the
    /// lengths differ; a partial copy is never performed.
    fn copy_from(&mut self, src: &[V]) -> Result<(), RestartError>
    where
        V: Clone,
    {
        let dst = self.as_mut_slice();
        if dst.len() != src.len() {
            return Err(RestartError::LayoutMismatch {
                src: vec![src.len()],
                dst: vec![dst.len()],
            });
        }
        dst.clone_from_slice(src);
        Ok(())
    }
}

/// `Vec`-backed storage (default).
#[derive(Clone)]
pub struct VecStorage<V>(pub(crate) Vec<V>);

impl<V> Debug for VecStorage<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VecStorage")
            .field("len", &self.0.len())
            .finish()
    }
}

impl<V> HostStorage<V> for VecStorage<V> {
    fn with_len(len: usize, fill: V) -> Self
    where
        V: Clone,
    {
        Self(vec![fill; len])
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn as_slice(&self) -> &[V] {
        &self.0
    }

    fn as_mut_slice(&mut self) -> &mut [V] {
        &mut self.0
    }
}

impl<V> From<Vec<V>> for VecStorage<V> {
    fn from(v: Vec<V>) -> Self {
        Self(v)
    }
}

impl<V> VecStorage<V> {
    pub fn into_inner(self) -> Vec<V> {
        self.0
    }
}
