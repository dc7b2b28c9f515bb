#![cfg_attr(docsrs, feature(doc_cfg))]
//! # field-restart
//!
//! field-restart reconstructs per-rank field state from a partitioned
//! checkpoint store for domain-decomposed grid simulations that use a
//! continuously sliding ("moving") window. Each compute rank derives the
//! global region it must read (folding in how far the window has slid since
//! the checkpoint, the rank's position in the Cartesian rank grid, and the
//! guard margin of its local buffer), reads one flat buffer per
//! vector component, scatters it into the interior of the local buffer, and
//! commits the result to the accelerator through a blocking device gate.
//!
//! ## Collaborators
//!
//! Everything outside the coordinate arithmetic is an injected interface:
//! the partitioned store ([`store::PartitionedStore`]), the rank topology
//! ([`topology::RankTopology`]), the window tracker
//! ([`window::WindowTracker`]), and the accelerator runtime
//! ([`device::DeviceRuntime`]). Serial stand-ins ([`store::MemoryStore`],
//! [`topology::CartesianTopology`], [`window::FixedWindow`],
//! [`device::MirrorDevice`]) make the whole load path runnable and testable
//! in one process.
//!
//! ## Ordering
//!
//! One shared mapping ([`grid::linear_index`]/[`grid::coord_of`], row-major,
//! last axis fastest) is used by both the store and the scatter step, so the
//! two cannot silently disagree; an ordering mismatch would corrupt data
//! without any observable error.
//!
//! ## Features
//!
//! - `rayon`: issue the per-component store reads concurrently.
//! - `wgpu-device`: GPU device backend behind the same waitable-handle gate.
//! - `check-invariants`: validate data-structure invariants in release
//!   builds too.

// Re-export our major subsystems:
pub mod data;
pub mod debug_invariants;
pub mod device;
pub mod grid;
pub mod restart_error;
pub mod restore;
pub mod store;
pub mod topology;
pub mod window;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::data::field::Field;
    pub use crate::data::registry::FieldRegistry;
    pub use crate::data::storage::{HostStorage, VecStorage};
    pub use crate::debug_invariants::DebugInvariants;
    #[cfg(feature = "wgpu-device")]
    pub use crate::device::WgpuDevice;
    pub use crate::device::{DeviceRuntime, HostDevice, MirrorDevice, Wait};
    pub use crate::grid::{DomainDescriptor, GridLayout, coord_of, linear_index};
    pub use crate::restart_error::{RestartError, RestartErrorKind};
    pub use crate::restore::{clone_field, load_field, load_registered_field, scatter_component};
    pub use crate::store::{MemoryStore, PartitionedStore, ReadResult, dataset_path};
    pub use crate::topology::{CartesianTopology, RankTopology};
    pub use crate::window::{FixedWindow, MovingWindowState, WindowTracker, read_domain};
}
