//! Moving-window state and the window/coordinate mapper.
//!
//! A moving-window simulation translates the visible global domain along one
//! axis over time; `slide_count` counts how many full local-domain-widths it
//! has shifted since step 0. On restart, the slide that accumulated before
//! the checkpoint was written has to be folded into every rank's read offset,
//! or the load fetches spatially wrong data without any observable error.

use serde::{Deserialize, Serialize};

use crate::grid::DomainDescriptor;
use crate::topology::RankTopology;

/// Snapshot of the moving window at one simulation step.
///
/// Produced by the window-tracking collaborator and consumed read-only here.
/// The global pair describes the currently visible window in global
/// coordinates; the local pair is the sub-rectangle of this rank's interior
/// that is actually valid after sliding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovingWindowState<const D: usize> {
    /// Cumulative slide count; monotonically non-decreasing over a run.
    pub slide_count: usize,
    /// Axis along which the window slides.
    pub sliding_axis: usize,
    /// Extent of one rank's local domain per axis.
    #[serde(with = "crate::grid::axes_serde")]
    pub local_domain_size: [usize; D],
    /// Offset of the visible global window.
    #[serde(with = "crate::grid::axes_serde")]
    pub global_window_offset: [usize; D],
    /// Size of the visible global window.
    #[serde(with = "crate::grid::axes_serde")]
    pub global_window_size: [usize; D],
    /// Offset of the valid sub-rectangle within this rank's interior.
    #[serde(with = "crate::grid::axes_serde")]
    pub local_window_offset: [usize; D],
    /// Size of the valid sub-rectangle within this rank's interior.
    #[serde(with = "crate::grid::axes_serde")]
    pub local_window_size: [usize; D],
}

impl<const D: usize> MovingWindowState<D> {
    /// State for a window that has not slid and covers every rank's whole
    /// local domain. `global_window_size` is the local size scaled by the
    /// rank-grid extent per axis.
    pub fn unslid(
        sliding_axis: usize,
        local_domain_size: [usize; D],
        rank_extent: [usize; D],
    ) -> Self {
        let mut global_window_size = local_domain_size;
        for d in 0..D {
            global_window_size[d] *= rank_extent[d];
        }
        Self {
            slide_count: 0,
            sliding_axis,
            local_domain_size,
            global_window_offset: [0; D],
            global_window_size,
            local_window_offset: [0; D],
            local_window_size: local_domain_size,
        }
    }

    /// Same window state with a different cumulative slide count.
    pub fn with_slide_count(mut self, slide_count: usize) -> Self {
        self.slide_count = slide_count;
        self
    }
}

/// Window-tracking collaborator: yields the window state for a restart step.
///
/// Injected into the loader so the core stays testable against synthetic
/// window histories.
pub trait WindowTracker<const D: usize> {
    /// Window state at the given restart step.
    fn window_at(&self, step: u64) -> MovingWindowState<D>;
}

/// Tracker that answers every step with one captured state.
///
/// The serial stand-in for a real window-tracking service; restarts resume
/// from a single step, so one state is all a load needs.
#[derive(Clone, Debug)]
pub struct FixedWindow<const D: usize>(pub MovingWindowState<D>);

impl<const D: usize> WindowTracker<D> for FixedWindow<D> {
    fn window_at(&self, _step: u64) -> MovingWindowState<D> {
        self.0
    }
}

/// Derive the store read key for one rank from its topology and the window
/// state at the restart step.
///
/// Only the sliding axis receives the slide term
/// `slide_count * local_domain_size[sliding_axis]`. A rank at position 0
/// along the sliding axis additionally absorbs the global window's
/// leading-edge offset, because the visible window does not start at the
/// domain origin there. The read size is the currently visible local size,
/// never the full buffer size.
///
/// Pure function of its inputs; repeated invocation returns identical
/// descriptors.
pub fn read_domain<const D: usize, T: RankTopology<D>>(
    topology: &T,
    window: &MovingWindowState<D>,
) -> DomainDescriptor<D> {
    let axis = window.sliding_axis;
    let mut offset = topology.global_offset();
    offset[axis] += window.slide_count * window.local_domain_size[axis];
    if topology.position()[axis] == 0 {
        offset[axis] += window.global_window_offset[axis];
    }
    DomainDescriptor::new(offset, window.local_window_size)
}
