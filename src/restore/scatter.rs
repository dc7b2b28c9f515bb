//! Scatter one component's flat read result into a field's host buffer.
//!
//! Source and destination both go through the shared
//! [`linear_index`]/[`coord_of`](crate::grid::coord_of) mapping, so the
//! ordering the store promised is the ordering the scatter consumes.

use crate::data::field::Field;
use crate::data::storage::HostStorage;
use crate::grid::{DomainDescriptor, GridLayout, coord_of, linear_index};
use crate::restart_error::RestartError;
use crate::window::MovingWindowState;

/// Check up front that a write of `extent` cells starting at the local window
/// offset fits inside the interior.
///
/// Every destination coordinate the scatter produces lies at
/// `guard + local_window_offset + local` with `local < extent`, so this bound
/// is exactly the guarantee that no guard cell is ever written.
///
/// # Errors
/// Returns `Err(ScatterOutOfInterior)` naming the first overrunning axis.
pub(crate) fn check_window_fits<const D: usize>(
    layout: &GridLayout<D>,
    window: &MovingWindowState<D>,
    extent: &[usize; D],
) -> Result<(), RestartError> {
    let interior = layout.interior();
    for axis in 0..D {
        let end = window.local_window_offset[axis] + extent[axis];
        if end > interior[axis] {
            return Err(RestartError::ScatterOutOfInterior {
                axis,
                end,
                interior: interior[axis],
            });
        }
    }
    Ok(())
}

/// Write one component's read result into the destination field.
///
/// For each linear index of the flat source, the destination coordinate is
/// the per-axis coordinate within the read domain plus the guard width plus
/// the local window offset; only component slot `component` of each cell is
/// written.
///
/// # Errors
/// `UnknownComponent` for a component index outside the cell,
/// `ReadLengthMismatch` if the source length disagrees with the domain, and
/// `ScatterOutOfInterior` if a write of `domain.size` cells at the window
/// offset would overrun the interior (checked before any element is written,
/// so an oversized domain cannot reach guard cells or wrap across rows).
pub fn scatter_component<V, const D: usize, const C: usize, St>(
    field: &mut Field<V, D, C, St>,
    window: &MovingWindowState<D>,
    domain: &DomainDescriptor<D>,
    component: usize,
    src: &[V],
) -> Result<(), RestartError>
where
    V: Copy,
    St: HostStorage<[V; C]>,
{
    if component >= C {
        return Err(RestartError::UnknownComponent(component));
    }
    if src.len() != domain.len() {
        return Err(RestartError::ReadLengthMismatch {
            expected: domain.len(),
            found: src.len(),
        });
    }
    check_window_fits(field.layout(), window, &domain.size)?;

    let layout = *field.layout();
    let data_size = layout.data_size();
    let mut base = layout.guard();
    for d in 0..D {
        base[d] += window.local_window_offset[d];
    }

    let buf = field.host_mut().as_mut_slice();
    for (linear, &sample) in src.iter().enumerate() {
        let local = coord_of(&domain.size, linear);
        let mut dest = base;
        for d in 0..D {
            dest[d] += local[d];
        }
        debug_assert!(layout.in_interior(&dest), "scatter destination in guard");
        buf[linear_index(&data_size, &dest)][component] = sample;
    }
    Ok(())
}
