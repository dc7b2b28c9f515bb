//! Field restart loading and cloning.
//!
//! Straight-line, rank-local logic: derive the read domain from the rank's
//! topology and the window state, read each vector component from the
//! partitioned store, scatter into the host buffer, then push to the device
//! and join. The device gate is always the last operation; a field is either
//! fully restored or the load reports failure.

use num_traits::Zero;

use crate::data::field::Field;
use crate::data::registry::FieldRegistry;
use crate::data::storage::HostStorage;
use crate::device::{DeviceRuntime, Wait};
use crate::grid::DomainDescriptor;
use crate::restart_error::RestartError;
use crate::restore::scatter::{check_window_fits, scatter_component};
use crate::store::{PartitionedStore, ReadResult, dataset_path};
use crate::topology::RankTopology;
use crate::window::{WindowTracker, read_domain};

fn read_one<V, S, const D: usize>(
    store: &S,
    step: u64,
    name: &str,
    domain: &DomainDescriptor<D>,
    component: usize,
) -> Result<ReadResult<V>, RestartError>
where
    S: PartitionedStore<V, D>,
{
    let path = dataset_path(name, component)?;
    log::trace!(
        "read from domain: dataset={path} offset={:?} size={:?}",
        domain.offset,
        domain.size
    );
    let result = store.read_domain(step, &path, domain)?;
    if result.len() != domain.len() {
        return Err(RestartError::ReadLengthMismatch {
            expected: domain.len(),
            found: result.len(),
        });
    }
    Ok(result)
}

/// Read all `components` of a field; with the `rayon` feature the reads are
/// issued concurrently, otherwise in component order.
fn read_components<V, S, const D: usize>(
    store: &S,
    step: u64,
    name: &str,
    domain: &DomainDescriptor<D>,
    components: usize,
) -> Result<Vec<ReadResult<V>>, RestartError>
where
    V: Send,
    S: PartitionedStore<V, D>,
{
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        (0..components)
            .into_par_iter()
            .map(|c| read_one(store, step, name, domain, c))
            .collect()
    }
    #[cfg(not(feature = "rayon"))]
    {
        (0..components)
            .map(|c| read_one(store, step, name, domain, c))
            .collect()
    }
}

/// Restore one field's local portion from the partitioned store.
///
/// The whole host buffer is reset to the neutral value first, so guard cells
/// are defined without ever being populated from the store. The slide count
/// accumulated before the checkpoint is folded into the read offset exactly
/// once, by the window/coordinate mapper. `device.push(..)?.wait()?` is the
/// single synchronization point and the externally observable commit of the
/// load.
///
/// # Errors
/// Any store, precondition, or transfer error aborts the load for this field
/// on this rank; no partial-field state is exposed.
pub fn load_field<V, const D: usize, const C: usize, St, S, R, T, W>(
    field: &mut Field<V, D, C, St>,
    step: u64,
    topology: &T,
    tracker: &W,
    store: &S,
    device: &R,
) -> Result<(), RestartError>
where
    V: Copy + Zero + Send + Sync,
    St: HostStorage<[V; C]>,
    S: PartitionedStore<V, D>,
    R: DeviceRuntime<[V; C]>,
    T: RankTopology<D>,
    W: WindowTracker<D>,
{
    log::debug!("begin loading field `{}` at step {step}", field.name());

    let window = tracker.window_at(step);
    field.fill_neutral();

    let domain = read_domain(topology, &window);
    domain.validate()?;
    check_window_fits(field.layout(), &window, &window.local_window_size)?;

    let results = read_components(store, step, field.name(), &domain, C)?;
    for (component, result) in results.iter().enumerate() {
        scatter_component(field, &window, &domain, component, result.data())?;
    }

    device.push(field.host().as_slice())?.wait()?;

    log::debug!("finished loading field `{}`", field.name());
    Ok(())
}

/// Restore a registered field by name.
///
/// Mirrors the registry-driven load of the surrounding restart sequence: the
/// field is looked up, loaded in place, and left registered.
pub fn load_registered_field<V, const D: usize, const C: usize, St, S, R, T, W>(
    registry: &mut FieldRegistry<V, D, C, St>,
    name: &str,
    step: u64,
    topology: &T,
    tracker: &W,
    store: &S,
    device: &R,
) -> Result<(), RestartError>
where
    V: Copy + Zero + Send + Sync,
    St: HostStorage<[V; C]>,
    S: PartitionedStore<V, D>,
    R: DeviceRuntime<[V; C]>,
    T: RankTopology<D>,
    W: WindowTracker<D>,
{
    let field = registry.get_mut(name)?;
    load_field(field, step, topology, tracker, store, device)
}

/// Deep-copy one field's host buffer into another of identical layout, then
/// commit the destination to the device.
///
/// # Errors
/// Returns `Err(LayoutMismatch)` before any element is copied when the
/// layouts differ; transfer failures surface as `TransferIncomplete`.
pub fn clone_field<V, const D: usize, const C: usize, St, R>(
    dest: &mut Field<V, D, C, St>,
    src: &Field<V, D, C, St>,
    device: &R,
) -> Result<(), RestartError>
where
    V: Copy,
    St: HostStorage<[V; C]>,
    R: DeviceRuntime<[V; C]>,
{
    log::debug!(
        "begin cloning field `{}` into `{}`",
        src.name(),
        dest.name()
    );

    if dest.layout() != src.layout() {
        return Err(RestartError::LayoutMismatch {
            src: src.layout().data_size().to_vec(),
            dst: dest.layout().data_size().to_vec(),
        });
    }
    dest.host_mut().copy_from(src.host().as_slice())?;

    device.push(dest.host().as_slice())?.wait()?;

    log::debug!("finished cloning field `{}`", src.name());
    Ok(())
}
