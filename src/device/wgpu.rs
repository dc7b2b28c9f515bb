//! wgpu-backed device runtime.
//!
//! Holds one device-resident buffer sized for a field's full host buffer.
//! `push` stages the host data through the queue and records the submission
//! index; the handle's `wait` blocks until the queue reports that submission
//! drained. `read_back` stages the device buffer to a mappable buffer for
//! verification.

use std::marker::PhantomData;
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};

use crate::device::{DeviceRuntime, Wait};
use crate::restart_error::RestartError;

/// GPU-resident counterpart of one field's host buffer.
#[derive(Debug)]
pub struct WgpuDevice<E: Pod> {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    buffer: wgpu::Buffer,
    len: usize,
    _pd: PhantomData<E>,
}

impl<E> WgpuDevice<E>
where
    E: Pod + Zeroable + Send + Sync + 'static,
{
    /// Allocate a zeroed device buffer for `len` elements.
    pub fn new(device: Arc<wgpu::Device>, queue: Arc<wgpu::Queue>, len: usize) -> Self {
        let byte_len = (len * std::mem::size_of::<E>()) as u64;
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Field/WgpuDevice"),
            size: byte_len,
            usage: wgpu::BufferUsages::STORAGE
                | wgpu::BufferUsages::COPY_SRC
                | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        if byte_len > 0 {
            let zeros = vec![E::zeroed(); len];
            queue.write_buffer(&buffer, 0, bytemuck::cast_slice(&zeros));
        }
        Self {
            device,
            queue,
            buffer,
            len,
            _pd: PhantomData,
        }
    }

    /// Element capacity of the device buffer.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the device buffer holds zero elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Copy the device buffer back to host memory.
    ///
    /// # Errors
    /// Returns `Err(TransferIncomplete)` if the staging buffer cannot be
    /// mapped.
    pub fn read_back(&self) -> Result<Vec<E>, RestartError> {
        let byte_len = (self.len * std::mem::size_of::<E>()) as u64;
        let staging = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("WgpuDevice[read_back] staging"),
            size: byte_len,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let mut enc = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("WgpuDevice::read_back"),
            });
        enc.copy_buffer_to_buffer(&self.buffer, 0, &staging, 0, byte_len);
        self.queue.submit(Some(enc.finish()));

        let buffer_slice = staging.slice(..);
        let (sender, receiver) = futures_intrusive::channel::shared::oneshot_channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |res| {
            sender.send(res).ok();
        });
        let _ = self.device.poll(wgpu::Maintain::Wait);
        let res = pollster::block_on(receiver.receive());
        res.ok_or_else(|| RestartError::TransferIncomplete("staging map cancelled".into()))?
            .map_err(|e| RestartError::TransferIncomplete(format!("staging map failed: {e:?}")))?;
        let data = buffer_slice.get_mapped_range();
        let mut out = vec![E::zeroed(); self.len];
        out.copy_from_slice(bytemuck::cast_slice(&data));
        drop(data);
        staging.unmap();
        Ok(out)
    }
}

/// Pending host-to-device transfer on a [`WgpuDevice`].
#[derive(Debug)]
pub struct WgpuTransfer {
    device: Arc<wgpu::Device>,
    index: wgpu::SubmissionIndex,
}

impl Wait for WgpuTransfer {
    fn wait(self) -> Result<(), RestartError> {
        let result = self
            .device
            .poll(wgpu::Maintain::WaitForSubmissionIndex(self.index));
        if result.is_queue_empty() {
            Ok(())
        } else {
            Err(RestartError::TransferIncomplete(
                "queue not drained after submission wait".into(),
            ))
        }
    }
}

impl<E> DeviceRuntime<E> for WgpuDevice<E>
where
    E: Pod + Zeroable + Send + Sync + 'static,
{
    type PushHandle = WgpuTransfer;

    fn push(&self, host: &[E]) -> Result<Self::PushHandle, RestartError> {
        if host.len() != self.len {
            return Err(RestartError::TransferIncomplete(format!(
                "host buffer holds {} elements, device buffer holds {}",
                host.len(),
                self.len
            )));
        }
        if self.len > 0 {
            self.queue
                .write_buffer(&self.buffer, 0, bytemuck::cast_slice(host));
        }
        let index = self.queue.submit(std::iter::empty());
        Ok(WgpuTransfer {
            device: Arc::clone(&self.device),
            index,
        })
    }
}
