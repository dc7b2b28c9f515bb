//! Accelerator runtime seam: push a host buffer to its device-resident
//! counterpart and join on completion.
//!
//! All handles are waitable; the restore path calls `.wait()` before the
//! loaded field is considered usable, and nothing reads the device buffer
//! before that join returns. Backends with real asynchronous transfers
//! surface their completion guarantee through [`Wait`].

#[cfg(feature = "wgpu-device")]
pub mod wgpu;

#[cfg(feature = "wgpu-device")]
pub use self::wgpu::WgpuDevice;

use std::sync::Arc;

use parking_lot::Mutex;

use crate::restart_error::RestartError;

/// Anything that can be joined on.
pub trait Wait {
    /// Block until the transfer is observably complete.
    ///
    /// # Errors
    /// Returns `Err(TransferIncomplete)` if completion cannot be confirmed;
    /// the restart attempt is fatal at that point, since the physics loop
    /// cannot run against a half-updated device buffer.
    fn wait(self) -> Result<(), RestartError>;
}

/// Accelerator runtime interface consumed by the restore path.
///
/// `push` fires the host-to-device transfer and returns a handle;
/// `push(..)?.wait()?` is the single synchronization point of a restart load.
pub trait DeviceRuntime<E> {
    /// Handle returned by [`push`](Self::push).
    type PushHandle: Wait;

    /// Request transfer of the full host buffer to the device.
    ///
    /// # Errors
    /// Backend-specific submission failures surface as `TransferIncomplete`.
    fn push(&self, host: &[E]) -> Result<Self::PushHandle, RestartError>;
}

/// A transfer that completed at push time.
#[derive(Debug)]
pub struct CompletedTransfer;

impl Wait for CompletedTransfer {
    fn wait(self) -> Result<(), RestartError> {
        Ok(())
    }
}

/// No-op device for host-only runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct HostDevice;

impl<E> DeviceRuntime<E> for HostDevice {
    type PushHandle = CompletedTransfer;

    fn push(&self, _host: &[E]) -> Result<Self::PushHandle, RestartError> {
        Ok(CompletedTransfer)
    }
}

#[derive(Debug, Default)]
struct MirrorState<E> {
    device: Vec<E>,
    staged: Option<Vec<E>>,
    pushes: usize,
    completed: usize,
}

/// Host-side device emulation: keeps a mirror of the device buffer and counts
/// pushes and completed waits.
///
/// The staged copy becomes visible as the device buffer only when the handle
/// is waited on, so a forgotten join is observable in tests.
#[derive(Clone, Debug, Default)]
pub struct MirrorDevice<E> {
    state: Arc<Mutex<MirrorState<E>>>,
}

impl<E: Clone> MirrorDevice<E> {
    /// Device with an empty mirror buffer.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MirrorState {
                device: Vec::new(),
                staged: None,
                pushes: 0,
                completed: 0,
            })),
        }
    }

    /// Current contents of the device-resident mirror.
    pub fn device_buffer(&self) -> Vec<E> {
        self.state.lock().device.clone()
    }

    /// Number of transfers fired.
    pub fn pushes(&self) -> usize {
        self.state.lock().pushes
    }

    /// Number of transfers joined to completion.
    pub fn completed(&self) -> usize {
        self.state.lock().completed
    }
}

/// Pending transfer into a [`MirrorDevice`].
#[derive(Debug)]
pub struct MirrorTransfer<E> {
    state: Arc<Mutex<MirrorState<E>>>,
}

impl<E> Wait for MirrorTransfer<E> {
    fn wait(self) -> Result<(), RestartError> {
        let mut state = self.state.lock();
        let staged = state.staged.take().ok_or_else(|| {
            RestartError::TransferIncomplete("no staged transfer to complete".into())
        })?;
        state.device = staged;
        state.completed += 1;
        Ok(())
    }
}

impl<E: Clone + Send> DeviceRuntime<E> for MirrorDevice<E> {
    type PushHandle = MirrorTransfer<E>;

    fn push(&self, host: &[E]) -> Result<Self::PushHandle, RestartError> {
        let mut state = self.state.lock();
        state.staged = Some(host.to_vec());
        state.pushes += 1;
        Ok(MirrorTransfer {
            state: Arc::clone(&self.state),
        })
    }
}
