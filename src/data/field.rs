//! Field: a named, multi-component array over a [`GridLayout`], with a
//! host-resident buffer.
//!
//! Cells are stored array-of-structures (`[V; C]` per cell) so a per-component
//! scatter writes one slot of a cell without touching its siblings. The
//! device-resident counterpart lives behind a
//! [`DeviceRuntime`](crate::device::DeviceRuntime) and is synchronized
//! explicitly, never automatically.

use std::marker::PhantomData;

use num_traits::Zero;

use crate::data::storage::{HostStorage, VecStorage};
use crate::grid::{GridLayout, linear_index};

/// A named C-component field over a D-dimensional local grid.
#[derive(Clone, Debug)]
pub struct Field<V, const D: usize, const C: usize, St = VecStorage<[V; C]>> {
    name: String,
    layout: GridLayout<D>,
    host: St,
    _value: PhantomData<V>,
}

impl<V, const D: usize, const C: usize, St> Field<V, D, C, St>
where
    V: Copy + Zero,
    St: HostStorage<[V; C]>,
{
    /// The neutral cell value: all components zero.
    #[inline]
    pub fn neutral() -> [V; C] {
        [V::zero(); C]
    }

    /// Allocate a field with every cell at the neutral value.
    ///
    /// The name doubles as the dataset key in the partitioned store.
    pub fn new(name: impl Into<String>, layout: GridLayout<D>) -> Self {
        Self {
            name: name.into(),
            layout,
            host: St::with_len(layout.cell_count(), Self::neutral()),
            _value: PhantomData,
        }
    }

    /// Reset every cell, guards included, to the neutral value.
    pub fn fill_neutral(&mut self) {
        self.host.fill(Self::neutral());
    }
}

impl<V, const D: usize, const C: usize, St> Field<V, D, C, St>
where
    St: HostStorage<[V; C]>,
{
    /// Stable name; used as the store dataset key.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Layout of the local buffer.
    #[inline]
    pub fn layout(&self) -> &GridLayout<D> {
        &self.layout
    }

    /// Host buffer, flat in the shared row-major order.
    #[inline]
    pub fn host(&self) -> &St {
        &self.host
    }

    /// Mutable host buffer.
    #[inline]
    pub fn host_mut(&mut self) -> &mut St {
        &mut self.host
    }

    /// Cell at a data-space coordinate (guard cells addressable).
    #[inline]
    pub fn cell(&self, coord: &[usize; D]) -> &[V; C] {
        &self.host.as_slice()[linear_index(&self.layout.data_size(), coord)]
    }

    /// Mutable cell at a data-space coordinate.
    #[inline]
    pub fn cell_mut(&mut self, coord: &[usize; D]) -> &mut [V; C] {
        let idx = linear_index(&self.layout.data_size(), coord);
        &mut self.host.as_mut_slice()[idx]
    }
}
